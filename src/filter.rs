// src/filter.rs

use chrono::{Month, Weekday};
use std::fmt;
use thiserror::Error;

use crate::config::City;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Monday first, matching `Weekday::num_days_from_monday`.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown city `{0}`")]
    UnknownCity(String),
    #[error("`{0}` is not a full month name")]
    UnknownMonth(String),
    #[error("`{0}` is not a full weekday name")]
    UnknownDay(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitySelection {
    One(City),
    All,
}

impl CitySelection {
    /// Cities to load, in concatenation order.
    pub fn cities(&self) -> Vec<City> {
        match self {
            CitySelection::One(c) => vec![*c],
            CitySelection::All => City::ALL.to_vec(),
        }
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitySelection::One(c) => c.fmt(f),
            CitySelection::All => f.write_str("All cities"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

/// A complete, validated (city, month, day) choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: CitySelection,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = match self.month {
            MonthFilter::All => "All",
            MonthFilter::Only(m) => month_name(m),
        };
        let day = match self.day {
            DayFilter::All => "All",
            DayFilter::Only(d) => weekday_name(d),
        };
        write!(f, "{} / month: {} / day: {}", self.city, month, day)
    }
}

pub fn month_name(m: Month) -> &'static str {
    MONTH_NAMES[m.number_from_month() as usize - 1]
}

pub fn weekday_name(d: Weekday) -> &'static str {
    DAY_NAMES[d.num_days_from_monday() as usize]
}

/// "new YORK city" -> "New York City"
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_city(input: &str) -> Result<CitySelection, FilterError> {
    let wanted = input.trim().to_lowercase();
    if wanted == "all" {
        return Ok(CitySelection::All);
    }
    City::ALL
        .iter()
        .find(|c| c.as_str() == wanted)
        .map(|c| CitySelection::One(*c))
        .ok_or_else(|| FilterError::UnknownCity(input.trim().to_string()))
}

pub fn parse_month(input: &str) -> Result<MonthFilter, FilterError> {
    let wanted = title_case(input);
    if wanted == "All" {
        return Ok(MonthFilter::All);
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == wanted)
        .and_then(|idx| Month::try_from(idx as u8 + 1).ok())
        .map(MonthFilter::Only)
        .ok_or_else(|| FilterError::UnknownMonth(input.trim().to_string()))
}

pub fn parse_day(input: &str) -> Result<DayFilter, FilterError> {
    let wanted = title_case(input);
    if wanted == "All" {
        return Ok(DayFilter::All);
    }
    DAY_NAMES
        .iter()
        .position(|name| *name == wanted)
        .and_then(|idx| Weekday::try_from(idx as u8).ok())
        .map(DayFilter::Only)
        .ok_or_else(|| FilterError::UnknownDay(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cities_are_case_insensitive() {
        assert_eq!(
            parse_city("  New York City "),
            Ok(CitySelection::One(City::NewYorkCity))
        );
        assert_eq!(parse_city("CHICAGO"), Ok(CitySelection::One(City::Chicago)));
        assert_eq!(parse_city("All"), Ok(CitySelection::All));
        assert_eq!(
            parse_city("boston"),
            Err(FilterError::UnknownCity("boston".into()))
        );
    }

    #[test]
    fn months_need_full_names() {
        assert_eq!(parse_month("march"), Ok(MonthFilter::Only(Month::March)));
        assert_eq!(parse_month("DECEMBER"), Ok(MonthFilter::Only(Month::December)));
        assert_eq!(parse_month("all"), Ok(MonthFilter::All));
        assert!(parse_month("mar").is_err());
        assert!(parse_month("").is_err());
        assert!(parse_month("Smarch").is_err());
    }

    #[test]
    fn days_need_full_names() {
        assert_eq!(parse_day("monday"), Ok(DayFilter::Only(Weekday::Mon)));
        assert_eq!(parse_day("SUNDAY"), Ok(DayFilter::Only(Weekday::Sun)));
        assert_eq!(parse_day(" all "), Ok(DayFilter::All));
        assert!(parse_day("tues").is_err());
    }

    #[test]
    fn names_round_trip_through_chrono() {
        for (i, name) in MONTH_NAMES.iter().enumerate() {
            let m = Month::try_from(i as u8 + 1).unwrap();
            assert_eq!(month_name(m), *name);
        }
        assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
        assert_eq!(title_case("new YORK city"), "New York City");
    }

    #[test]
    fn selection_display() {
        let sel = FilterSelection {
            city: CitySelection::One(City::Washington),
            month: MonthFilter::Only(Month::June),
            day: DayFilter::All,
        };
        assert_eq!(sel.to_string(), "Washington / month: June / day: All");
    }
}
