pub mod config;
pub mod format;
pub mod input;
pub mod model;
pub mod service;
pub mod source;
pub mod time;

pub use config::Config;
pub use format::{format_date_with_ordinal, ordinal_suffix, popover_text, weekday_labels};
pub use input::{parse_target, RepoTarget};
pub use model::activity::WeeklyActivity;
pub use model::grid::{DayCell, Grid};
pub use model::intensity::Intensity;
pub use service::activity_mapper::apply_activity;
pub use service::dto::HeatmapView;
pub use service::grid_builder::build_grid;
pub use service::heatmap_service::{HeatmapService, Refresh};
pub use service::intensity::classify;
pub use source::{ActivitySource, FileActivitySource, GitHubActivitySource, SourceError};
pub use time::{days_in_year, is_leap_year, start_weekday, week_index};
