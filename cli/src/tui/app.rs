use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use chrono::{Datelike, Local, NaiveDate};
use commitmap_core::service::dto::CellView;
use commitmap_core::{parse_target, DayCell, Grid, HeatmapService, HeatmapView, RepoTarget, Refresh};
use tracing::debug;

use crate::DynSource;

pub enum InputMode {
    Normal,
    Searching,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loading(RepoTarget),
    Loaded(RepoTarget),
    Failed(String),
}

/// Result of a fetch thread, tagged with the search it belongs to.
pub struct FetchResult {
    pub generation: u64,
    pub target: RepoTarget,
    pub refresh: Refresh,
}

pub struct App {
    service: Arc<HeatmapService<DynSource>>,
    pub labels: [String; 7],
    base_grid: Grid,
    pub view: HeatmapView,
    pub status: FetchStatus,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    /// (weekday row, week column), both 0-based.
    pub selected: (usize, usize),
    grid: Grid,
    generation: u64,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl App {
    pub fn new(service: HeatmapService<DynSource>, labels: [String; 7], today: NaiveDate) -> App {
        let base_grid = service.empty_grid(today);
        let view = HeatmapView::from_grid(&base_grid, &labels);
        let selected = base_grid
            .cell_for_date(today)
            .map(|c| (c.weekday_row as usize, c.week_column as usize - 1))
            .unwrap_or((0, 0));
        let (tx, rx) = mpsc::channel();

        App {
            service: Arc::new(service),
            labels,
            grid: base_grid.clone(),
            base_grid,
            view,
            status: FetchStatus::Idle,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selected_cell(&self) -> Option<&DayCell> {
        self.grid.cell(self.selected.0, self.selected.1)
    }

    pub fn selected_view(&self) -> Option<&CellView> {
        self.view
            .rows
            .get(self.selected.0)?
            .cells
            .get(self.selected.1)?
            .as_ref()
    }

    // --- Cursor ---

    pub fn move_left(&mut self) {
        self.selected.1 = self.selected.1.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected.1 + 1 < self.grid.week_count() {
            self.selected.1 += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected.0 = self.selected.0.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected.0 < 6 {
            self.selected.0 += 1;
        }
    }

    // --- Fetching ---

    /// Starts a fetch for `target` on a worker thread. Any fetch still in
    /// flight becomes stale and its result will be dropped.
    pub fn start_fetch(&mut self, target: RepoTarget) {
        self.rebuild_if_new_year(Local::now().date_naive());

        self.generation += 1;
        let generation = self.generation;
        self.status = FetchStatus::Loading(target.clone());
        // Show zeros while loading instead of the previous repository
        self.set_grid(self.base_grid.clone());

        let service = Arc::clone(&self.service);
        let base = self.base_grid.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let refresh = service.refresh(&base, &target);
            // The receiver is gone once the app quits
            let _ = tx.send(FetchResult {
                generation,
                target,
                refresh,
            });
        });
    }

    /// Applies finished fetches; called once per frame.
    pub fn poll_fetches(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.accept(result);
        }
    }

    pub(crate) fn accept(&mut self, result: FetchResult) {
        if result.generation != self.generation {
            debug!(
                stale = result.generation,
                current = self.generation,
                "Dropping result for {}",
                result.target
            );
            return;
        }

        self.status = match result.refresh.failure {
            Some(failure) => FetchStatus::Failed(failure),
            None => FetchStatus::Loaded(result.target),
        };
        self.set_grid(result.refresh.grid);
    }

    fn set_grid(&mut self, grid: Grid) {
        self.view = HeatmapView::from_grid(&grid, &self.labels);
        self.grid = grid;
        self.selected.1 = self.selected.1.min(self.grid.week_count().saturating_sub(1));
    }

    fn rebuild_if_new_year(&mut self, today: NaiveDate) {
        if today.year() != self.base_grid.year() {
            self.base_grid = self.service.empty_grid(today);
        }
    }

    // --- Search input ---

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_search(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match parse_target(&self.input) {
            Ok(target) => self.start_fetch(target),
            Err(e) => self.status = FetchStatus::Failed(e.to_string()),
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitmap_core::time::timestamp_of;
    use commitmap_core::{apply_activity, ActivitySource, SourceError, WeeklyActivity};

    struct EmptySource;

    impl ActivitySource for EmptySource {
        fn fetch(&self, _target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
            Ok(Vec::new())
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let labels = commitmap_core::weekday_labels("en_US");
        let source: DynSource = Box::new(EmptySource);
        App::new(HeatmapService::new(source), labels, ymd(2024, 3, 6))
    }

    fn result(app: &App, generation: u64, count: u32) -> FetchResult {
        let record = WeeklyActivity::new(timestamp_of(ymd(2024, 3, 3)), vec![count; 7]);
        FetchResult {
            generation,
            target: RepoTarget::new("octocat", "hello-world"),
            refresh: Refresh {
                grid: apply_activity(&app.base_grid, &[record]),
                failure: None,
            },
        }
    }

    #[test]
    fn test_starts_on_today() {
        let app = app();
        let cell = app.selected_cell().unwrap();
        assert_eq!(cell.date, ymd(2024, 3, 6));
        assert_eq!(app.status, FetchStatus::Idle);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = app();
        for _ in 0..100 {
            app.move_right();
            app.move_down();
        }
        assert_eq!(app.selected, (6, app.grid().week_count() - 1));
        for _ in 0..100 {
            app.move_left();
            app.move_up();
        }
        assert_eq!(app.selected, (0, 0));
        // Sunday of week 1 is not a day in 2024
        assert!(app.selected_cell().is_none());
        assert!(app.selected_view().is_none());
    }

    #[test]
    fn test_accepts_latest_generation() {
        let mut app = app();
        app.generation = 1;

        let latest = result(&app, 1, 4);
        app.accept(latest);

        assert_eq!(app.grid().total_contributions(), 28);
        assert_eq!(app.view.total_contributions, 28);
        assert!(matches!(app.status, FetchStatus::Loaded(_)));
        assert_eq!(
            app.selected_view().map(|c| c.popover.clone()),
            Some("4 contributions on March 6th.".to_string())
        );
    }

    #[test]
    fn test_drops_stale_results() {
        let mut app = app();
        app.generation = 2;

        let stale = result(&app, 1, 9);
        app.accept(stale);

        assert_eq!(app.grid().total_contributions(), 0);
        assert_eq!(app.status, FetchStatus::Idle);
    }

    #[test]
    fn test_failed_refresh_keeps_zero_grid() {
        let mut app = app();
        app.generation = 1;
        let base = app.base_grid.clone();
        app.accept(FetchResult {
            generation: 1,
            target: RepoTarget::new("octocat", "missing"),
            refresh: Refresh {
                grid: base,
                failure: Some("Could not load activity for octocat/missing".to_string()),
            },
        });
        assert_eq!(app.grid().total_contributions(), 0);
        assert!(matches!(app.status, FetchStatus::Failed(_)));
    }

    #[test]
    fn test_invalid_search_reports_error() {
        let mut app = app();
        app.enter_search_mode();
        for c in "not a repo".chars() {
            app.input_char(c);
        }
        app.submit_search();
        assert!(matches!(app.status, FetchStatus::Failed(_)));
        assert!(app.input.is_empty());
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn test_input_editing() {
        let mut app = app();
        app.enter_search_mode();
        for c in "ab".chars() {
            app.input_char(c);
        }
        app.move_cursor_left();
        app.input_char('/');
        assert_eq!(app.input, "a/b");
        app.delete_char();
        assert_eq!(app.input, "ab");
    }
}
