use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::input::RepoTarget;
use crate::model::grid::Grid;
use crate::source::ActivitySource;
use crate::service::activity_mapper::apply_activity;
use crate::service::grid_builder::build_grid;

/// Result of a refresh. On failure `grid` is the grid that was passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub grid: Grid,
    pub failure: Option<String>,
}

pub struct HeatmapService<S: ActivitySource> {
    source: S,
}

impl<S: ActivitySource> HeatmapService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn empty_grid(&self, today: NaiveDate) -> Grid {
        build_grid(today)
    }

    /// Fetches activity for `target` and merges it into `grid`.
    pub fn load(&self, grid: &Grid, target: &RepoTarget) -> Result<Grid> {
        let weeks = self.source.fetch(target)?;
        info!("Received {} week(s) of activity for {}", weeks.len(), target);
        Ok(apply_activity(grid, &weeks))
    }

    /// Like `load`, but a failed fetch leaves `grid` as it is and reports
    /// the failure instead of returning an error.
    pub fn refresh(&self, grid: &Grid, target: &RepoTarget) -> Refresh {
        match self.load(grid, target) {
            Ok(grid) => Refresh { grid, failure: None },
            Err(e) => {
                warn!("Could not load activity for {}: {:#}", target, e);
                Refresh {
                    grid: grid.clone(),
                    failure: Some(format!("Could not load activity for {}: {}", target, e)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::activity::WeeklyActivity;
    use crate::source::SourceError;
    use crate::time::timestamp_of;
    use std::cell::RefCell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct MockSource {
        weeks: Vec<WeeklyActivity>,
        requested: RefCell<Vec<RepoTarget>>,
    }

    impl ActivitySource for MockSource {
        fn fetch(&self, target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
            self.requested.borrow_mut().push(target.clone());
            Ok(self.weeks.clone())
        }
    }

    struct FailingSource;

    impl ActivitySource for FailingSource {
        fn fetch(&self, _target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
            Err(SourceError::Api {
                status: 401,
                message: "Bad credentials".to_string(),
            })
        }
    }

    #[test]
    fn test_load_merges_fetched_weeks() {
        let source = MockSource {
            weeks: vec![WeeklyActivity::new(timestamp_of(ymd(2024, 1, 7)), vec![1, 2, 0, 0, 0, 0, 0])],
            requested: RefCell::new(Vec::new()),
        };
        let service = HeatmapService::new(source);
        let target = RepoTarget::new("octocat", "hello-world");

        let empty = service.empty_grid(ymd(2024, 2, 1));
        let grid = service.load(&empty, &target).unwrap();

        assert_eq!(grid.total_contributions(), 3);
        assert_eq!(grid.cell_for_date(ymd(2024, 1, 8)).map(|c| c.contribution_count), Some(2));
        assert_eq!(service.source.requested.borrow().as_slice(), &[target]);
    }

    #[test]
    fn test_refresh_degrades_to_input_grid() {
        let service = HeatmapService::new(FailingSource);
        let empty = service.empty_grid(ymd(2024, 2, 1));

        let refresh = service.refresh(&empty, &RepoTarget::new("octocat", "private"));
        assert_eq!(refresh.grid, empty);
        assert_eq!(refresh.grid.total_contributions(), 0);
        let failure = refresh.failure.unwrap();
        assert!(failure.contains("octocat/private"));
        assert!(failure.contains("Bad credentials"));
    }

    #[test]
    fn test_load_propagates_errors() {
        let service = HeatmapService::new(FailingSource);
        let empty = service.empty_grid(ymd(2024, 2, 1));
        assert!(service.load(&empty, &RepoTarget::new("a", "b")).is_err());
    }
}
