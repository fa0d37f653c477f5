use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{date_from_timestamp, DAYS_PER_WEEK};

/// One week of commit activity as reported by the upstream statistics endpoint.
///
/// Field names follow the GitHub payload: `{"week": 1704067200, "days": [..], "total": 5}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WeeklyActivity {
    /// Unix seconds of the first day of the week.
    #[serde(rename = "week")]
    pub week_start: i64,
    /// Counts per day, index 0 being the first day of the week.
    #[serde(rename = "days")]
    pub daily_counts: Vec<u32>,
    #[serde(default)]
    pub total: u32,
}

impl WeeklyActivity {
    pub fn new(week_start: i64, daily_counts: Vec<u32>) -> Self {
        let total = daily_counts.iter().fold(0u32, |acc, c| acc.saturating_add(*c));
        Self {
            week_start,
            daily_counts,
            total,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        date_from_timestamp(self.week_start)
    }

    /// The seven daily counts, or `None` when upstream sent fewer.
    /// Anything past the seventh entry is ignored.
    pub fn week_counts(&self) -> Option<&[u32]> {
        self.daily_counts.get(..DAYS_PER_WEEK)
    }
}
