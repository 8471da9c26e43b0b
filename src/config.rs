// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Default location of the optional config file, relative to the working dir.
pub const CONFIG_FILE: &str = "bikeshare.yaml";

/// The cities we ship trip data for, in the order `all` concatenates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

/// How the `Trip Duration` column is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Minutes,
    Seconds,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-city CSV files.
    pub data_dir: PathBuf,
    pub duration_unit: DurationUnit,
    /// Per-city file name overrides; unset cities keep their default file.
    pub files: BTreeMap<City, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            duration_unit: DurationUnit::default(),
            files: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        info!(path = %path.display(), data_dir = %cfg.data_dir.display(), "loaded config");
        Ok(cfg)
    }

    /// Freeze the city → file mapping for the lifetime of the process.
    pub fn city_table(&self) -> CityTable {
        let entries = City::ALL
            .iter()
            .map(|city| {
                let file = self
                    .files
                    .get(city)
                    .map(String::as_str)
                    .unwrap_or_else(|| city.default_file_name());
                (*city, self.data_dir.join(file))
            })
            .collect();
        CityTable { entries }
    }
}

/// Immutable city → data file mapping, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CityTable {
    entries: BTreeMap<City, PathBuf>,
}

impl CityTable {
    pub fn path(&self, city: City) -> &Path {
        // every City variant is inserted by `Config::city_table`
        &self.entries[&city]
    }

    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        self.entries.iter().map(|(c, p)| (*c, p.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = Config::load(dir.path().join("nope.yaml"))?;
        assert_eq!(cfg, Config::default());
        let table = cfg.city_table();
        assert_eq!(
            table.path(City::NewYorkCity),
            Path::new("./new_york_city.csv")
        );
        Ok(())
    }

    #[test]
    fn yaml_overrides_dir_unit_and_files() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        let mut f = fs::File::create(&path)?;
        writeln!(f, "data_dir: /srv/bikes")?;
        writeln!(f, "duration_unit: seconds")?;
        writeln!(f, "files:")?;
        writeln!(f, "  washington: dc.csv")?;
        drop(f);

        let cfg = Config::load(&path)?;
        assert_eq!(cfg.duration_unit, DurationUnit::Seconds);
        let table = cfg.city_table();
        assert_eq!(table.path(City::Washington), Path::new("/srv/bikes/dc.csv"));
        assert_eq!(table.path(City::Chicago), Path::new("/srv/bikes/chicago.csv"));
        assert_eq!(table.iter().count(), 3);
        Ok(())
    }

    #[test]
    fn malformed_yaml_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "duration_unit: fortnights\n")?;
        assert!(Config::load(&path).is_err());
        Ok(())
    }
}
