use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::DAYS_PER_WEEK;

/// One real day of the year in the heatmap grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// 1-based column in the grid (not an ISO week).
    pub week_column: u32,
    /// 0 = Sunday .. 6 = Saturday, equal to the row the cell sits in.
    pub weekday_row: u32,
    pub contribution_count: u32,
    pub date: NaiveDate,
}

impl DayCell {
    pub fn new(week_column: u32, weekday_row: u32, date: NaiveDate) -> Self {
        Self {
            week_column,
            weekday_row,
            contribution_count: 0,
            date,
        }
    }
}

/// A week column: one slot per weekday, `None` where the column has no day.
pub type WeekColumn = [Option<DayCell>; DAYS_PER_WEEK];

/// 7 weekday rows by N week columns for a single year.
///
/// Slots before January 1st in the first column and after December 31st in
/// the last column are `None`. Built by `service::grid_builder::build_grid`
/// and only ever replaced, never patched, from outside the crate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    year: i32,
    start_weekday: u32,
    weeks: Vec<WeekColumn>,
}

impl Grid {
    pub(crate) fn from_weeks(year: i32, start_weekday: u32, weeks: Vec<WeekColumn>) -> Self {
        Self {
            year,
            start_weekday,
            weeks,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_weekday(&self) -> u32 {
        self.start_weekday
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[WeekColumn] {
        &self.weeks
    }

    /// `row` is the weekday (0 = Sunday), `column` the 0-based week column.
    pub fn cell(&self, row: usize, column: usize) -> Option<&DayCell> {
        self.weeks.get(column)?.get(row)?.as_ref()
    }

    /// Cells of one weekday row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<&DayCell>> + '_ {
        self.weeks
            .iter()
            .map(move |week| week.get(row).and_then(|slot| slot.as_ref()))
    }

    /// Non-empty cells in fill order, which is calendar order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }

    pub fn cell_for_date(&self, date: NaiveDate) -> Option<&DayCell> {
        let (row, column) = self.position_of(date)?;
        self.cell(row, column)
    }

    pub(crate) fn cell_for_date_mut(&mut self, date: NaiveDate) -> Option<&mut DayCell> {
        let (row, column) = self.position_of(date)?;
        self.weeks
            .get_mut(column)?
            .get_mut(row)?
            .as_mut()
            .filter(|cell| cell.date == date)
    }

    pub fn total_contributions(&self) -> u64 {
        self.days().map(|c| u64::from(c.contribution_count)).sum()
    }

    fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if date.year() != self.year {
            return None;
        }
        let offset = (date.ordinal0() + self.start_weekday) as usize;
        Some((offset % DAYS_PER_WEEK, offset / DAYS_PER_WEEK))
    }
}
