use chrono::Datelike;
use commitmap_core::{week_index, RepoTarget, WeeklyActivity};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week of")]
    week_of: String,
    #[tabled(rename = "Col")]
    column: String,
    #[tabled(rename = "Sun")]
    sun: String,
    #[tabled(rename = "Mon")]
    mon: String,
    #[tabled(rename = "Tue")]
    tue: String,
    #[tabled(rename = "Wed")]
    wed: String,
    #[tabled(rename = "Thu")]
    thu: String,
    #[tabled(rename = "Fri")]
    fri: String,
    #[tabled(rename = "Sat")]
    sat: String,
    #[tabled(rename = "Total")]
    total: u64,
}

pub fn show_weeks(target: &RepoTarget, records: &[WeeklyActivity], year: i32) {
    if records.is_empty() {
        println!("No activity found for {}.", target);
        return;
    }

    println!("\n\x1b[1;36m{}\x1b[0m ({} weeks)", target, records.len());
    println!("{}", build_table(records, year));
}

fn build_table(records: &[WeeklyActivity], year: i32) -> Table {
    let rows: Vec<WeekRow> = records.iter().map(|record| week_row(record, year)).collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table
}

fn week_row(record: &WeeklyActivity, year: i32) -> WeekRow {
    let start = record.start_date();
    let week_of = start
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| record.week_start.to_string());

    // Column in this year's grid, "-" for weeks the heatmap doesn't show
    let column = start
        .filter(|d| d.year() == year)
        .map(|d| week_index(d).to_string())
        .unwrap_or_else(|| "-".to_string());

    let day = |i: usize| {
        record
            .daily_counts
            .get(i)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    WeekRow {
        week_of,
        column,
        sun: day(0),
        mon: day(1),
        tue: day(2),
        wed: day(3),
        thu: day(4),
        fri: day(5),
        sat: day(6),
        total: record.daily_counts.iter().map(|&c| u64::from(c)).sum(),
    }
}
