// src/data/loader.rs

use std::{fs::File, io::BufReader, path::PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::TripTable;
use crate::config::{City, CityTable};
use crate::filter::{month_name, DayFilter, FilterSelection, MonthFilter};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open trip data for {city} at {}: {source}", path.display())]
    Io {
        city: City,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read CSV from {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
    #[error("{source_name} has no `{column}` column")]
    MissingColumn { source_name: String, column: String },
    /// Recoverable: the user asked for a month the data does not cover.
    #[error("there are no {month} trips in the {city} data")]
    MonthNotInData { city: String, month: &'static str },
}

impl LoadError {
    /// True when picking different filters could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LoadError::MonthNotInData { .. })
    }
}

/// Loads and narrows trip tables using the startup city table.
pub struct DataLoader<'a> {
    cities: &'a CityTable,
}

impl<'a> DataLoader<'a> {
    pub fn new(cities: &'a CityTable) -> Self {
        Self { cities }
    }

    /// Unfiltered table for a single city.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn load_city(&self, city: City) -> Result<TripTable, LoadError> {
        let path = self.cities.path(city);
        let file = File::open(path).map_err(|source| LoadError::Io {
            city,
            path: path.to_path_buf(),
            source,
        })?;
        let table = TripTable::from_reader(BufReader::new(file), &path.display().to_string())?;
        info!(rows = table.len(), "loaded city table");
        Ok(table)
    }

    /// Load every city in the selection, then apply month and day filters.
    #[tracing::instrument(level = "info", skip(self, selection), fields(selection = %selection))]
    pub fn load(&self, selection: &FilterSelection) -> Result<TripTable, LoadError> {
        let mut table = TripTable::default();
        for city in selection.city.cities() {
            table = table.concat(self.load_city(city)?);
        }

        if let MonthFilter::Only(month) = selection.month {
            if !table.contains_month(month) {
                warn!(month = month_name(month), "requested month not present");
                return Err(LoadError::MonthNotInData {
                    city: selection.city.to_string(),
                    month: month_name(month),
                });
            }
            table = table.filter_month(month);
        }

        if let DayFilter::Only(day) = selection.day {
            table = table.filter_day(day);
        }

        info!(rows = table.len(), "filtered table ready");
        Ok(table)
    }
}
