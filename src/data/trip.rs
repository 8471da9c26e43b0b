// src/data/trip.rs

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;

/// Start/end time layouts seen across the city exports.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

/// One CSV row as it sits in the file, before derivation.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Whole units as configured by `DurationUnit`; fractional parts are dropped.
    pub duration: u64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// 1..=12, from `start_time`.
    pub month: u32,
    pub day_of_week: Weekday,
}

impl Trip {
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

impl TryFrom<RawTrip> for Trip {
    type Error = String;

    fn try_from(raw: RawTrip) -> Result<Self, Self::Error> {
        let start_time = parse_timestamp(&raw.start_time)
            .ok_or_else(|| format!("unparseable Start Time `{}`", raw.start_time))?;
        // a bad end time is not worth dropping the row for
        let end_time = raw.end_time.as_deref().and_then(parse_timestamp);
        if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
            return Err(format!("invalid Trip Duration {}", raw.trip_duration));
        }

        Ok(Trip {
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            start_time,
            end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            duration: raw.trip_duration as u64,
            user_type: non_blank(raw.user_type),
            gender: non_blank(raw.gender),
            birth_year: raw.birth_year.filter(|y| y.is_finite()).map(|y| y as i32),
        })
    }
}

/// Try each known layout in turn.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_matches('"');
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(start: &str, duration: f64) -> RawTrip {
        RawTrip {
            start_time: start.into(),
            end_time: None,
            trip_duration: duration,
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: Some("Subscriber".into()),
            gender: Some("  ".into()),
            birth_year: Some(1992.0),
        }
    }

    #[test]
    fn parses_all_layouts() {
        let want = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 7, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2017-01-01 00:07:00"), Some(want));
        assert_eq!(parse_timestamp("2017-01-01 00:07"), Some(want));
        assert_eq!(parse_timestamp("\"2017/01/01 00:07:00\""), Some(want));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn derives_month_weekday_and_truncates() {
        // 2017-06-23 was a Friday
        let trip = Trip::try_from(raw("2017-06-23 15:09:32", 1446.065)).unwrap();
        assert_eq!(trip.month, 6);
        assert_eq!(trip.day_of_week, Weekday::Fri);
        assert_eq!(trip.hour(), 15);
        assert_eq!(trip.duration, 1446);
        assert_eq!(trip.birth_year, Some(1992));
        assert_eq!(trip.gender, None, "blank gender is treated as missing");
    }

    #[test]
    fn rejects_bad_rows() {
        assert!(Trip::try_from(raw("not a date", 10.0)).is_err());
        assert!(Trip::try_from(raw("2017-06-23 15:09:32", -1.0)).is_err());
        assert!(Trip::try_from(raw("2017-06-23 15:09:32", f64::NAN)).is_err());
    }
}
