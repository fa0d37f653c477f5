use chrono::{Datelike, Duration, NaiveDate};

use crate::model::grid::{DayCell, Grid, WeekColumn};
use crate::time::{days_in_year, first_day_of_year, start_weekday, DAYS_PER_WEEK};

/// Builds the empty grid for the year `reference` belongs to.
///
/// Weeks are walked left to right and weekdays top to bottom. The first
/// `start_weekday` slots of week 1 stay empty so January 1st lands on its
/// real weekday; filling stops after the last day of the year.
pub fn build_grid(reference: NaiveDate) -> Grid {
    let year = reference.year();
    let total_days = days_in_year(year) as usize;
    let start = start_weekday(reference) as usize;
    let jan_first = first_day_of_year(reference);

    let week_count = (total_days + start).div_ceil(DAYS_PER_WEEK);
    let mut weeks: Vec<WeekColumn> = vec![[None; DAYS_PER_WEEK]; week_count];

    let mut placed = 0;
    'fill: for (week, column) in weeks.iter_mut().enumerate() {
        for (row, slot) in column.iter_mut().enumerate() {
            if week == 0 && row < start {
                continue;
            }
            if placed >= total_days {
                break 'fill;
            }

            let date = jan_first + Duration::days(placed as i64);
            *slot = Some(DayCell::new(week as u32 + 1, row as u32, date));
            placed += 1;
        }
    }

    Grid::from_weeks(year, start as u32, weeks)
}
