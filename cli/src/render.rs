use commitmap_core::service::dto::{CellView, HeatmapView};
use commitmap_core::{Intensity, RepoTarget};
use unicode_width::UnicodeWidthStr;

const CELL: &str = "■";
// Characters per level when colors are off
const PLAIN_CELLS: [&str; 5] = ["·", "░", "▒", "▓", "█"];
// Each column is the cell plus a space
const COLUMN_WIDTH: usize = 2;

/// Renders the heatmap as terminal lines: month header, seven weekday rows
/// and a legend. Only Mon/Wed/Fri get a label, like on GitHub.
pub fn render_heatmap(target: &RepoTarget, view: &HeatmapView, color: bool) -> String {
    let label_width = label_width(view);

    let mut out = String::new();

    // Header
    let title = format!(
        "{} contributions in {} for {}",
        view.total_contributions, view.year, target
    );
    if color {
        out.push_str(&format!("\x1b[1;36m{}\x1b[0m\n", title));
    } else {
        out.push_str(&title);
        out.push('\n');
    }

    out.push_str(&month_header(view, label_width));
    out.push('\n');

    for (row, row_view) in view.rows.iter().enumerate() {
        let label = if row % 2 == 1 { row_view.label.as_str() } else { "" };
        out.push_str(&pad(label, label_width));
        for slot in &row_view.cells {
            out.push_str(&cell(slot.as_ref(), color));
            out.push(' ');
        }
        out.push('\n');
    }

    // Legend
    out.push_str(&pad("", label_width));
    out.push_str("Less ");
    for intensity in Intensity::ALL {
        out.push_str(&paint(intensity, color));
        out.push(' ');
    }
    out.push_str("More\n");

    out
}

/// Width of the weekday label gutter, one space included.
pub(crate) fn label_width(view: &HeatmapView) -> usize {
    view.rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.label.as_str()))
        .max()
        .unwrap_or(0)
        + 1
}

/// Month names placed over the column of each month's first day.
pub(crate) fn month_header(view: &HeatmapView, label_width: usize) -> String {
    let mut line = " ".repeat(label_width);
    for month in &view.months {
        let position = label_width + month.column * COLUMN_WIDTH;
        // A month starting late in a week can collide with the previous name
        if position < line.chars().count() {
            continue;
        }
        line.push_str(&" ".repeat(position - line.chars().count()));
        line.push_str(&month.name);
    }
    line.trim_end().to_string()
}

fn cell(slot: Option<&CellView>, color: bool) -> String {
    match slot {
        Some(cell) => paint(cell.intensity, color),
        None => " ".to_string(),
    }
}

fn paint(intensity: Intensity, color: bool) -> String {
    if color {
        let (r, g, b) = intensity.rgb();
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, CELL)
    } else {
        PLAIN_CELLS[intensity.level() as usize].to_string()
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use commitmap_core::{apply_activity, build_grid, weekday_labels, WeeklyActivity};
    use commitmap_core::time::timestamp_of;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plain_lines() -> Vec<String> {
        let grid = build_grid(ymd(2024, 6, 1));
        let grid = apply_activity(
            &grid,
            &[WeeklyActivity::new(timestamp_of(ymd(2023, 12, 31)), vec![0, 40, 0, 0, 0, 0, 0])],
        );
        let view = HeatmapView::from_grid(&grid, &weekday_labels("en_US"));
        render_heatmap(&RepoTarget::new("octocat", "hello-world"), &view, false)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_plain_layout() {
        let lines = plain_lines();
        // title, months, 7 rows, legend
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "40 contributions in 2024 for octocat/hello-world");
        assert!(lines[1].trim_start().starts_with("Jan"));
        assert_eq!(lines[9], "    Less · ░ ▒ ▓ █ More");
    }

    #[test]
    fn test_month_header_positions() {
        let view = HeatmapView::from_grid(&build_grid(ymd(2024, 6, 1)), &weekday_labels("en_US"));
        let header = month_header(&view, label_width(&view));
        assert!(header.starts_with("    Jan"));
        // Feb 1st 2024 is in column 5 (0-based 4)
        assert_eq!(header.find("Feb"), Some(4 + 4 * COLUMN_WIDTH));
    }

    #[test]
    fn test_plain_rows() {
        let lines = plain_lines();
        // Sunday row: no label, 2024 starts on Monday so the first slot is blank
        assert!(lines[2].starts_with("      · "));
        // Monday row: label then Jan 1st at the darkest level
        assert!(lines[3].starts_with("Mon █ · "));
        assert!(lines[5].starts_with("Wed "));
        assert!(lines[7].starts_with("Fri "));
    }
}
