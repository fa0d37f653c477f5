use commitmap_core::Intensity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::render;
use crate::tui::app::{App, FetchStatus, InputMode};

const CELL: &str = "■";
const EMPTY_CELL: &str = " ";

fn intensity_color(intensity: Intensity) -> Color {
    let (r, g, b) = intensity.rgb();
    Color::Rgb(r, g, b)
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(12), // Heatmap
            Constraint::Length(3),  // Search
            Constraint::Min(1),     // Detail
            Constraint::Length(1),  // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);
    draw_heatmap(f, app, main_chunks[1]);
    draw_search(f, app, main_chunks[2]);
    draw_detail(f, app, main_chunks[3]);

    let help = match app.input_mode {
        InputMode::Normal => "/: Search | h/j/k/l: Move | q: Quit",
        InputMode::Searching => "Enter: Load | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let (status, style) = match &app.status {
        FetchStatus::Idle => ("Press / to search a repository".to_string(), Style::default().fg(Color::DarkGray)),
        FetchStatus::Loading(target) => (format!("Loading {}...", target), Style::default().fg(Color::Yellow)),
        FetchStatus::Loaded(target) => (
            format!("{} contributions in {} for {}", app.view.total_contributions, app.view.year, target),
            Style::default().fg(Color::Green),
        ),
        FetchStatus::Failed(_) => ("Could not load contributions".to_string(), Style::default().fg(Color::Red)),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("COMMITMAP", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(status, style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_heatmap(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let label_width = render::label_width(view);

    let mut lines = vec![Line::from(Span::styled(
        render::month_header(view, label_width),
        Style::default().fg(Color::DarkGray),
    ))];

    for (row, row_view) in view.rows.iter().enumerate() {
        // Mon/Wed/Fri only, like GitHub
        let label = if row % 2 == 1 { row_view.label.as_str() } else { "" };
        let padding = " ".repeat(label_width.saturating_sub(UnicodeWidthStr::width(label)));
        let mut spans = vec![
            Span::styled(format!("{}{}", label, padding), Style::default().fg(Color::DarkGray)),
        ];

        for (column, slot) in row_view.cells.iter().enumerate() {
            let selected = app.selected == (row, column);
            let span = match slot {
                Some(cell) => {
                    let mut style = Style::default().fg(intensity_color(cell.intensity));
                    if selected {
                        style = style.bg(Color::White);
                    }
                    Span::styled(CELL, style)
                }
                None if selected => Span::styled(EMPTY_CELL, Style::default().bg(Color::DarkGray)),
                None => Span::raw(EMPTY_CELL),
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(legend_line(label_width));

    let block = Block::default()
        .title(format!(" {} ", view.year))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn legend_line(label_width: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(label_width)), Span::raw("Less ")];
    for intensity in Intensity::ALL {
        spans.push(Span::styled(CELL, Style::default().fg(intensity_color(intensity))));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("More"));
    Line::from(spans)
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let (title, style) = match app.input_mode {
        InputMode::Searching => (" Repository (owner/repo) ", Style::default().fg(Color::Yellow)),
        InputMode::Normal => (" Repository ", Style::default()),
    };
    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if let InputMode::Searching = app.input_mode {
        let before: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + UnicodeWidthStr::width(before.as_str()) as u16;
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let mut text = Vec::new();

    match app.selected_view() {
        Some(cell) => {
            text.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(intensity_color(cell.intensity))),
                Span::styled(cell.popover.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            text.push(Line::from(vec![
                Span::styled("Date: ", Style::default().fg(Color::Blue)),
                Span::raw(cell.date.format("%Y-%m-%d (%a)").to_string()),
                Span::styled("  Week: ", Style::default().fg(Color::Blue)),
                Span::raw(cell.week_column.to_string()),
                Span::styled("  Level: ", Style::default().fg(Color::Blue)),
                Span::raw(cell.level.to_string()),
            ]));
        }
        None => text.push(Line::from(Span::styled("No day", Style::default().fg(Color::DarkGray)))),
    }

    if let FetchStatus::Failed(message) = &app.status {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))));
    }

    let detail = Paragraph::new(text)
        .block(Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(detail, area);
}
