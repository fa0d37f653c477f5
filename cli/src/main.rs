mod render;
mod tui;
mod weeks;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use commitmap_core::{
    parse_target, weekday_labels, ActivitySource, Config, FileActivitySource, GitHubActivitySource,
    HeatmapService, HeatmapView,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Source handed to the service; shared with the TUI fetch thread.
pub type DynSource = Box<dyn ActivitySource + Send + Sync>;

const LOG_ENV_VAR: &str = "COMMITMAP_LOG";
const LOG_FILE_NAME: &str = "commitmap.log";

#[derive(Parser)]
#[command(name = "commitmap")]
#[command(about = "GitHub-style contribution heatmap for a repository's commit activity", long_about = None)]
struct Cli {
    /// Locale for weekday labels (e.g. en_US, de-DE). Defaults to config, then LANG
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Read activity from a saved commit_activity JSON file instead of the GitHub API
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print this year's heatmap for owner/repo
    Show {
        /// Repository as owner/repo or a github.com URL
        repo: String,
        /// Print the heatmap as JSON
        #[arg(long)]
        json: bool,
        /// Use characters instead of terminal colors
        #[arg(long)]
        plain: bool,
    },
    /// List the weekly activity records for owner/repo
    Weeks {
        /// Repository as owner/repo or a github.com URL
        repo: String,
    },
    /// Open the Terminal User Interface
    Tui {
        /// Repository to load on start
        repo: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Offline runs read the config but never create it
    let config = match cli.file {
        Some(_) => Config::read(None)?,
        None => Config::load(None)?,
    };

    // The TUI owns the terminal, so its logs go to a file
    let log_to_file = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(log_to_file)?;

    let labels = weekday_labels(&config.resolve_locale(cli.locale.as_deref()));
    let source = build_source(&config, cli.file.clone())?;
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Show { repo, json, plain }) => {
            let target = parse_target(&repo)?;
            let service = HeatmapService::new(source);
            let empty = service.empty_grid(today);
            let refresh = service.refresh(&empty, &target);
            let view = HeatmapView::from_grid(&refresh.grid, &labels);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_heatmap(&target, &view, !plain));
            }
            if let Some(failure) = refresh.failure {
                eprintln!("Warning: {}", failure);
            }
        }
        Some(Commands::Weeks { repo }) => {
            let target = parse_target(&repo)?;
            let records = source
                .fetch(&target)
                .with_context(|| format!("Could not fetch activity for {}", target))?;
            weeks::show_weeks(&target, &records, today.year());
        }
        Some(Commands::Tui { repo }) => {
            let initial = repo.as_deref().map(parse_target).transpose()?;
            tui::run(HeatmapService::new(source), labels, today, initial)?;
        }
        None => {
            tui::run(HeatmapService::new(source), labels, today, None)?;
        }
    }
    Ok(())
}

fn build_source(config: &Config, file: Option<PathBuf>) -> Result<DynSource> {
    match file {
        Some(path) => {
            info!("Using activity file {}", path.display());
            Ok(Box::new(FileActivitySource::new(path)))
        }
        None => Ok(Box::new(GitHubActivitySource::new(config)?)),
    }
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_file {
        let dir = Config::default_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}
