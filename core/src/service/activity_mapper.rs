use chrono::Duration;
use tracing::{debug, warn};

use crate::model::activity::WeeklyActivity;
use crate::model::grid::Grid;

/// Returns a copy of `grid` with the counts of `records` written into it.
///
/// Day `i` of a record lands on the cell for `week_start + i`. Upstream
/// weeks start on Sunday, so that is the cell at row `i` of the column
/// `time::week_index` gives for the week start. Days outside the grid's
/// year are dropped, which also splits weeks that straddle New Year.
/// Later records overwrite earlier ones cell by cell.
///
/// Only `contribution_count` changes; the input grid is left untouched.
pub fn apply_activity(grid: &Grid, records: &[WeeklyActivity]) -> Grid {
    let mut next = grid.clone();

    for record in records {
        let Some(counts) = record.week_counts() else {
            warn!(
                week = record.week_start,
                days = record.daily_counts.len(),
                "Skipping malformed activity record"
            );
            continue;
        };
        let Some(week_start) = record.start_date() else {
            warn!(week = record.week_start, "Skipping activity record with invalid timestamp");
            continue;
        };

        let mut mapped = 0;
        for (offset, count) in counts.iter().enumerate() {
            // Weeks at the end of chrono's range run out of dates
            let Some(date) = week_start.checked_add_signed(Duration::days(offset as i64)) else {
                break;
            };
            if let Some(cell) = next.cell_for_date_mut(date) {
                cell.contribution_count = *count;
                mapped += 1;
            }
        }

        if mapped == 0 {
            debug!(week = record.week_start, year = next.year(), "Activity record outside grid year");
        }
    }

    next
}
