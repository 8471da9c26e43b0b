// src/stats/time.rs

use chrono::{Month, Weekday};
use std::fmt;

use super::mode;
use crate::data::TripTable;
use crate::filter::{month_name, weekday_name};

/// Most popular times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Month,
    pub weekday: Weekday,
    /// 0..=23
    pub hour: u32,
}

impl TimeStats {
    pub fn compute(table: &TripTable) -> Option<Self> {
        let trips = table.trips();
        let month = mode(trips.iter().map(|t| t.month))?;
        let weekday = mode(trips.iter().map(|t| t.day_of_week))?;
        let hour = mode(trips.iter().map(|t| t.hour()))?;
        Some(Self {
            month: Month::try_from(month as u8).ok()?,
            weekday,
            hour,
        })
    }
}

/// 24h hour to a 12h clock label; midnight is `12 AM`, noon `12 PM`.
pub fn format_hour_12(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The most common month to travel is in {}",
            month_name(self.month)
        )?;
        writeln!(
            f,
            "The most common day of the week to travel is on {}",
            weekday_name(self.weekday)
        )?;
        writeln!(
            f,
            "The most common hour of the day to start a rental is {}",
            format_hour_12(self.hour)
        )
    }
}
