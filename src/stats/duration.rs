// src/stats/duration.rs

use std::fmt;

use crate::config::DurationUnit;
use crate::data::TripTable;

/// A minute count split into whole hours and leftover minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursMinutes {
    pub hours: u64,
    pub minutes: u64,
}

impl HoursMinutes {
    pub fn from_minutes(total: u64) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Both parts truncated toward zero.
    pub fn from_fractional_minutes(total: f64) -> Self {
        let total = total.max(0.0);
        Self {
            hours: (total / 60.0).floor() as u64,
            minutes: (total % 60.0) as u64,
        }
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours and {} minutes", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    pub total: HoursMinutes,
    pub mean: HoursMinutes,
}

impl DurationStats {
    pub fn compute(table: &TripTable, unit: DurationUnit) -> Option<Self> {
        Self::from_durations(table.trips().iter().map(|t| t.duration), unit)
    }

    pub fn from_durations<I>(durations: I, unit: DurationUnit) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let (sum, count) = durations
            .into_iter()
            .fold((0u64, 0u64), |(s, n), d| (s.saturating_add(d), n + 1));
        if count == 0 {
            return None;
        }
        let mean = sum as f64 / count as f64;
        let (total_minutes, mean_minutes) = match unit {
            DurationUnit::Minutes => (sum, mean),
            DurationUnit::Seconds => (sum / 60, mean / 60.0),
        };
        Some(Self {
            total: HoursMinutes::from_minutes(total_minutes),
            mean: HoursMinutes::from_fractional_minutes(mean_minutes),
        })
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The total amount of time all bikes have been used is for {}.",
            self.total
        )?;
        writeln!(f, "The average trip time is for {}.", self.mean)
    }
}
