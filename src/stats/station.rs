// src/stats/station.rs

use std::fmt;

use super::mode;
use crate::data::TripTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// `"<start> to <end>"`
    pub trip: String,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Option<Self> {
        let trips = table.trips();
        Some(Self {
            start_station: mode(trips.iter().map(|t| t.start_station.as_str()))?.to_string(),
            end_station: mode(trips.iter().map(|t| t.end_station.as_str()))?.to_string(),
            trip: mode(
                trips
                    .iter()
                    .map(|t| format!("{} to {}", t.start_station, t.end_station)),
            )?,
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The most common station to pick up a bike is at {} station",
            self.start_station
        )?;
        writeln!(
            f,
            "The most common station to drop off a bike is {} station",
            self.end_station
        )?;
        writeln!(f, "The most common trips are from {} stations", self.trip)
    }
}
