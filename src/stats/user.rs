// src/stats/user.rs

use std::fmt;

use super::{mode, percent, value_counts};
use crate::data::TripTable;

/// One category's row count and truncated share of all rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub user_types: Vec<CategoryCount>,
    /// `None` when the table has no gender column.
    pub gender: Option<Vec<CategoryCount>>,
    /// `None` when there is no birth year column or it is entirely blank.
    pub birth_years: Option<BirthYearStats>,
}

fn breakdown<'a, I>(labels: I, total: usize) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(labels)
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
            percent: percent(count, total),
        })
        .collect()
}

impl UserStats {
    pub fn compute(table: &TripTable) -> Self {
        let trips = table.trips();
        let total = trips.len();
        let schema = table.schema();

        let user_types = breakdown(trips.iter().filter_map(|t| t.user_type.as_deref()), total);

        let gender = schema
            .has_gender
            .then(|| breakdown(trips.iter().filter_map(|t| t.gender.as_deref()), total));

        let birth_years = if schema.has_birth_year {
            let years = || trips.iter().filter_map(|t| t.birth_year);
            match (years().min(), years().max(), mode(years())) {
                (Some(earliest), Some(latest), Some(most_common)) => Some(BirthYearStats {
                    earliest,
                    latest,
                    most_common,
                }),
                _ => None,
            }
        } else {
            None
        };

        Self {
            total,
            user_types,
            gender,
            birth_years,
        }
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The number of bikeshare user types:")?;
        for c in &self.user_types {
            writeln!(f, "   {} : {}  ({}%)", c.label, c.count, c.percent)?;
        }

        match &self.gender {
            Some(counts) => {
                writeln!(f, "\nThe number of users by gender:")?;
                for c in counts {
                    writeln!(f, "   {} : {} ({}%)", c.label, c.count, c.percent)?;
                }
            }
            None => writeln!(f, "\nGender is unavailable for this city")?,
        }

        match &self.birth_years {
            Some(b) => {
                writeln!(f, "\nCommon user birth year stats:")?;
                writeln!(f, "   The eldest user was born in {}", b.earliest)?;
                writeln!(f, "   The youngest user was born in {}", b.latest)?;
                writeln!(f, "   Most users were born in {}", b.most_common)
            }
            None => writeln!(f, "\nBirth data is unavailable for this city"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{CHICAGO_CSV, WASHINGTON_CSV};
    use anyhow::Result;

    #[test]
    fn user_type_percentages_truncate() -> Result<()> {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,60,A,B,Customer
2017-01-01 00:00:00,60,A,B,Subscriber
2017-01-01 00:00:00,60,A,B,Subscriber
2017-01-01 00:00:00,60,A,B,Subscriber
";
        let table = TripTable::from_reader(csv.as_bytes(), "types")?;
        let stats = UserStats::compute(&table);
        assert_eq!(
            stats.user_types,
            vec![
                CategoryCount {
                    label: "Subscriber".into(),
                    count: 3,
                    percent: 75
                },
                CategoryCount {
                    label: "Customer".into(),
                    count: 1,
                    percent: 25
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn full_demographics() -> Result<()> {
        let table = TripTable::from_reader(CHICAGO_CSV.as_bytes(), "chicago")?;
        let stats = UserStats::compute(&table);
        assert_eq!(stats.total, 7);

        let gender = stats.gender.as_ref().expect("chicago has gender");
        assert_eq!(gender[0].label, "Male");
        assert_eq!(gender[0].count, 3);
        // blanks are not a category but still count toward the total
        assert_eq!(gender[0].percent, 42);
        assert_eq!(gender[1].count, 2);

        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: 1975,
                latest: 1999,
                most_common: 1990,
            })
        );
        let text = stats.to_string();
        assert!(text.contains("The eldest user was born in 1975"));
        assert!(text.contains("   Subscriber : 5  (71%)"));
        Ok(())
    }

    #[test]
    fn missing_columns_are_unavailable_not_errors() -> Result<()> {
        let table = TripTable::from_reader(WASHINGTON_CSV.as_bytes(), "washington")?;
        let stats = UserStats::compute(&table);
        assert_eq!(stats.gender, None);
        assert_eq!(stats.birth_years, None);

        let text = stats.to_string();
        assert!(text.contains("Gender is unavailable for this city"));
        assert!(text.contains("Birth data is unavailable for this city"));
        Ok(())
    }

    #[test]
    fn blank_birth_year_column_is_unavailable() -> Result<()> {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-01 00:00:00,60,A,B,Customer,,
";
        let table = TripTable::from_reader(csv.as_bytes(), "blank")?;
        let stats = UserStats::compute(&table);
        assert_eq!(stats.gender, Some(vec![]));
        assert_eq!(stats.birth_years, None);
        Ok(())
    }
}
