// src/viewer.rs

use prettytable::{format, Cell, Row, Table};

use crate::data::{Schema, Trip, TripTable};

/// Rows shown per raw-data page.
pub const PAGE_SIZE: usize = 5;

/// Up to `PAGE_SIZE` trips starting at `offset`; empty once past the end.
pub fn page(trips: &[Trip], offset: usize) -> &[Trip] {
    let start = offset.min(trips.len());
    let end = offset.saturating_add(PAGE_SIZE).min(trips.len());
    &trips[start..end]
}

/// Walks a table five rows at a time, starting from row 0.
#[derive(Debug)]
pub struct RawDataPager<'a> {
    table: &'a TripTable,
    offset: usize,
}

impl<'a> RawDataPager<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self::at(table, 0)
    }

    pub fn at(table: &'a TripTable, offset: usize) -> Self {
        Self { table, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.table.len()
    }

    /// Current page, then advance.
    pub fn next_page(&mut self) -> &'a [Trip] {
        let rows = page(self.table.trips(), self.offset);
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        rows
    }
}

/// Box-drawn table of `rows`, numbered from `first_row`, with only the columns `schema` has.
pub fn render_page(rows: &[Trip], first_row: usize, schema: Schema) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut titles = vec!["#", "Start Time"];
    if schema.has_end_time {
        titles.push("End Time");
    }
    titles.extend(["Trip Duration", "Start Station", "End Station", "User Type"]);
    if schema.has_gender {
        titles.push("Gender");
    }
    if schema.has_birth_year {
        titles.push("Birth Year");
    }
    table.set_titles(Row::new(
        titles.iter().map(|t| Cell::new(t).style_spec("b")).collect(),
    ));

    for (i, trip) in rows.iter().enumerate() {
        let mut cells = vec![
            Cell::new(&(first_row + i).to_string()).style_spec("r"),
            Cell::new(&trip.start_time.to_string()),
        ];
        if schema.has_end_time {
            cells.push(Cell::new(&opt(trip.end_time.map(|t| t.to_string()))));
        }
        cells.push(Cell::new(&trip.duration.to_string()).style_spec("r"));
        cells.push(Cell::new(&trip.start_station));
        cells.push(Cell::new(&trip.end_station));
        cells.push(Cell::new(&opt(trip.user_type.clone())));
        if schema.has_gender {
            cells.push(Cell::new(&opt(trip.gender.clone())));
        }
        if schema.has_birth_year {
            cells.push(Cell::new(&opt(trip.birth_year.map(|y| y.to_string()))).style_spec("r"));
        }
        table.add_row(Row::new(cells));
    }
    table
}

fn opt(v: Option<String>) -> String {
    v.unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{CHICAGO_CSV, WASHINGTON_CSV};
    use anyhow::Result;

    #[test]
    fn pages_are_bounded() -> Result<()> {
        let table = TripTable::from_reader(CHICAGO_CSV.as_bytes(), "chicago")?;
        assert_eq!(page(table.trips(), 0).len(), 5);
        assert_eq!(page(table.trips(), 0)[0], table.trips()[0]);
        assert_eq!(page(table.trips(), 5).len(), 2);
        assert!(page(table.trips(), 10).is_empty());
        assert!(page(table.trips(), usize::MAX).is_empty());
        assert!(page(&[], 0).is_empty());
        Ok(())
    }

    #[test]
    fn pager_walks_then_runs_dry() -> Result<()> {
        let table = TripTable::from_reader(CHICAGO_CSV.as_bytes(), "chicago")?;
        let mut pager = RawDataPager::new(&table);
        assert_eq!(pager.offset(), 0);
        assert_eq!(pager.next_page().len(), 5);
        assert!(!pager.is_exhausted());
        assert_eq!(pager.next_page().len(), 2);
        assert!(pager.is_exhausted());
        assert!(pager.next_page().is_empty());
        Ok(())
    }

    #[test]
    fn rendering_follows_schema() -> Result<()> {
        let chicago = TripTable::from_reader(CHICAGO_CSV.as_bytes(), "chicago")?;
        let text = render_page(page(chicago.trips(), 0), 0, chicago.schema()).to_string();
        assert!(text.contains("Birth Year"));
        assert!(text.contains("Clark St & Lake St"));
        assert!(text.contains("1984"));

        let dc = TripTable::from_reader(WASHINGTON_CSV.as_bytes(), "washington")?;
        let text = render_page(page(dc.trips(), 0), 0, dc.schema()).to_string();
        assert!(!text.contains("Gender"));
        assert!(text.contains("Lincoln Memorial"));
        Ok(())
    }
}
