// src/data/mod.rs

pub mod loader;
pub mod trip;

use chrono::{Month, Weekday};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::{debug, warn};

pub use loader::{DataLoader, LoadError};
pub use trip::{RawTrip, Trip};

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];
pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";
pub const END_TIME_COLUMN: &str = "End Time";

/// Which optional columns a loaded table actually carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    /// Check the header row. Returns the first missing required column on failure.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, String> {
        let has = |name: &str| headers.iter().any(|h| h.trim() == name);
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has(c)) {
            return Err(missing.to_string());
        }
        Ok(Schema {
            has_end_time: has(END_TIME_COLUMN),
            has_gender: has(GENDER_COLUMN),
            has_birth_year: has(BIRTH_YEAR_COLUMN),
        })
    }

    /// A column is available in a combined table if any part had it.
    pub fn union(self, other: Schema) -> Schema {
        Schema {
            has_end_time: self.has_end_time || other.has_end_time,
            has_gender: self.has_gender || other.has_gender,
            has_birth_year: self.has_birth_year || other.has_birth_year,
        }
    }
}

/// Ordered trips for one city (or several, concatenated) plus their schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    trips: Vec<Trip>,
    schema: Schema,
}

impl TripTable {
    /// Parse CSV from `reader`. `source` is only used in log and error text.
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| LoadError::Csv {
                source_name: source.to_string(),
                source: e,
            })?
            .clone();
        let schema = Schema::from_headers(&headers).map_err(|column| LoadError::MissingColumn {
            source_name: source.to_string(),
            column,
        })?;
        debug!(source, ?schema, "header checked");

        let mut trips = Vec::new();
        let mut skipped = 0usize;
        for (idx, result) in rdr.deserialize::<RawTrip>().enumerate() {
            let parsed = match result {
                // the file itself failed; a partial table must not pass as a whole one
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(LoadError::Csv {
                        source_name: source.to_string(),
                        source: e,
                    });
                }
                Err(e) => Err(e.to_string()),
                Ok(raw) => Trip::try_from(raw),
            };
            match parsed {
                Ok(trip) => trips.push(trip),
                Err(reason) => {
                    skipped += 1;
                    // +2: one for the header, one for 1-based line numbers
                    warn!(source, line = idx + 2, %reason, "skipping malformed row");
                }
            }
        }
        if skipped > 0 {
            warn!(source, skipped, kept = trips.len(), "some rows were skipped");
        }

        Ok(Self { trips, schema })
    }

    /// Append `other` after `self`, keeping row order.
    pub fn concat(mut self, other: TripTable) -> TripTable {
        self.schema = self.schema.union(other.schema);
        self.trips.extend(other.trips);
        self
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn contains_month(&self, month: Month) -> bool {
        let m = month.number_from_month();
        self.trips.iter().any(|t| t.month == m)
    }

    pub fn filter_month(self, month: Month) -> TripTable {
        let m = month.number_from_month();
        self.retain(|t| t.month == m)
    }

    pub fn filter_day(self, day: Weekday) -> TripTable {
        self.retain(|t| t.day_of_week == day)
    }

    fn retain<F: FnMut(&Trip) -> bool>(mut self, mut keep: F) -> TripTable {
        self.trips.retain(|t| keep(t));
        self
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Chicago-style export: leading unnamed index column, gender and birth year.
    pub const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 09:07:57,2017-01-02 09:20:53,776,Clark St & Lake St,Wells St & Elm St,Subscriber,Male,1984.0
1,2017-01-02 17:10:00,2017-01-02 17:25:00,900,Clark St & Lake St,Canal St & Madison St,Subscriber,Female,1990.0
2,2017-03-03 17:30:00,2017-03-03 17:45:00,900,Wells St & Elm St,Clark St & Lake St,Customer,,
3,2017-03-06 08:00:00,2017-03-06 08:10:00,600,Clark St & Lake St,Wells St & Elm St,Subscriber,Male,1990.0
4,2017-06-05 17:05:00,2017-06-05 17:35:00,1800,Canal St & Madison St,Wells St & Elm St,Subscriber,Male,1975.0
5,2017-06-10 00:15:00,2017-06-10 00:30:00,900,Clark St & Lake St,Wells St & Elm St,Customer,,
6,2017-06-12 17:45:00,2017-06-12 18:00:00,900,Wells St & Elm St,Clark St & Lake St,Subscriber,Female,1999.0
";

    /// Washington-style export: no gender, no birth year, fractional durations.
    pub const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
1,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Lincoln Memorial,Jefferson Memorial,Customer
2,2017-06-19 08:00:00,2017-06-19 08:20:00,1200.9,14th & Belmont St NW,15th & K St NW,Subscriber
";

    pub const NEW_YORK_CITY_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-06-11 14:55:05,2017-06-11 15:08:21,795,Suffolk St & Stanton St,W Broadway & Spring St,Subscriber,Male,1998.0
2017-05-11 15:30:11,2017-05-11 15:41:43,692,Lexington Ave & E 63 St,1 Ave & E 78 St,Subscriber,Female,1981.0
2017-03-29 13:26:26,2017-03-29 13:48:31,1325,1 Pl & Clinton St,Henry St & Degraw St,,,
";
}
