use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::popover_text;
use crate::model::grid::{DayCell, Grid};
use crate::model::intensity::Intensity;
use crate::service::intensity::classify;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CellView {
    pub date: NaiveDate,
    pub week_column: u32,
    pub count: u32,
    pub intensity: Intensity,
    pub level: u8,
    pub color: String,
    pub popover: String,
}

impl CellView {
    pub fn from_cell(cell: &DayCell) -> Self {
        let intensity = classify(cell.contribution_count);
        Self {
            date: cell.date,
            week_column: cell.week_column,
            count: cell.contribution_count,
            intensity,
            level: intensity.level(),
            color: intensity.hex(),
            popover: popover_text(cell),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowView {
    pub label: String,
    /// `None` marks a slot without a day, which is not the same as zero contributions.
    pub cells: Vec<Option<CellView>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthLabel {
    /// 0-based column where the month's first day sits.
    pub column: usize,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub level: u8,
    pub color: String,
}

/// Everything a renderer needs, flattened from a `Grid`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeatmapView {
    pub year: i32,
    pub week_count: usize,
    pub total_contributions: u64,
    pub rows: Vec<RowView>,
    pub months: Vec<MonthLabel>,
    pub legend: Vec<LegendEntry>,
}

impl HeatmapView {
    pub fn from_grid(grid: &Grid, weekday_labels: &[String]) -> Self {
        let rows = weekday_labels
            .iter()
            .enumerate()
            .map(|(row, label)| RowView {
                label: label.clone(),
                cells: grid.row(row).map(|slot| slot.map(CellView::from_cell)).collect(),
            })
            .collect();

        let months = grid
            .days()
            .filter(|cell| cell.date.day() == 1)
            .map(|cell| MonthLabel {
                column: cell.week_column as usize - 1,
                name: cell.date.format("%b").to_string(),
            })
            .collect();

        let legend = Intensity::ALL
            .iter()
            .map(|i| LegendEntry {
                level: i.level(),
                color: i.hex(),
            })
            .collect();

        Self {
            year: grid.year(),
            week_count: grid.week_count(),
            total_contributions: grid.total_contributions(),
            rows,
            months,
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::weekday_labels;
    use crate::model::activity::WeeklyActivity;
    use crate::service::activity_mapper::apply_activity;
    use crate::service::grid_builder::build_grid;
    use crate::time::timestamp_of;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_view_keeps_empty_slots() {
        let grid = build_grid(ymd(2024, 6, 1));
        let view = HeatmapView::from_grid(&grid, &weekday_labels("en_US"));

        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.rows[0].label, "Sun");
        assert!(view.rows.iter().all(|r| r.cells.len() == grid.week_count()));
        // 2024-01-01 is a Monday, so Sunday of week 1 has no day
        assert!(view.rows[0].cells[0].is_none());
        assert_eq!(view.rows[1].cells[0].as_ref().map(|c| c.level), Some(0));
    }

    #[test]
    fn test_view_classifies_counts() {
        let grid = build_grid(ymd(2024, 6, 1));
        let grid = apply_activity(
            &grid,
            &[WeeklyActivity::new(timestamp_of(ymd(2024, 3, 3)), vec![0, 5, 15, 25, 35, 0, 0])],
        );
        let view = HeatmapView::from_grid(&grid, &weekday_labels("en_US"));
        let column = 9; // 2024-03-03 sits in week 10

        let levels: Vec<u8> = view
            .rows
            .iter()
            .map(|r| r.cells[column].as_ref().unwrap().level)
            .collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4, 0, 0]);
        assert_eq!(view.total_contributions, 80);

        let tuesday = view.rows[2].cells[column].as_ref().unwrap();
        assert_eq!(tuesday.color, "#40c463");
        assert_eq!(tuesday.popover, "15 contributions on March 5th.");
    }

    #[test]
    fn test_month_labels() {
        let grid = build_grid(ymd(2024, 6, 1));
        let view = HeatmapView::from_grid(&grid, &weekday_labels("en_US"));
        assert_eq!(view.months.len(), 12);
        assert_eq!(view.months[0], MonthLabel { column: 0, name: "Jan".to_string() });
        // 2024-02-01 is a Thursday in week 5
        assert_eq!(view.months[1], MonthLabel { column: 4, name: "Feb".to_string() });
        assert_eq!(view.legend.len(), 5);
    }
}
