// src/stats/mod.rs

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

use std::{collections::HashMap, hash::Hash};

pub use duration::{DurationStats, HoursMinutes};
pub use station::StationStats;
pub use time::{format_hour_12, TimeStats};
pub use user::{BirthYearStats, CategoryCount, UserStats};

/// Every distinct value with its count, most frequent first.
/// Equal counts keep the order in which values were first seen.
pub fn value_counts<I, T>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    // value -> (count, first index)
    let mut seen: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, v) in values.into_iter().enumerate() {
        seen.entry(v).or_insert((0, idx)).0 += 1;
    }
    let mut counts: Vec<(T, usize, usize)> =
        seen.into_iter().map(|(v, (n, first))| (v, n, first)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    counts.into_iter().map(|(v, n, _)| (v, n)).collect()
}

/// Most frequent value; ties go to the value seen first. `None` for no input.
pub fn mode<I, T>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    value_counts(values).into_iter().next().map(|(v, _)| v)
}

/// Whole-number share of `count` in `total`, truncated.
pub fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count * 100 / total) as u32
}
