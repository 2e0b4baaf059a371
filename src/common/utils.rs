use crate::conversation::parse_timestamp;
use chrono::NaiveDateTime;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Formats a backend date string as "DD/MM/YYYY HH:MM". Unparseable values
/// are shown as received; a missing value shows "N/A".
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(s) => match parse_timestamp(s) {
            Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
            None => s.to_string(),
        },
        None => "N/A".to_string(),
    }
}

/// Time of day shown under a chat bubble.
pub fn format_message_time(ts: Option<NaiveDateTime>) -> String {
    ts.map(|dt| dt.format("%d/%m %H:%M").to_string())
        .unwrap_or_default()
}

/// Calculates a centered rectangle of a given percentage size within another Rect.
/// Used for popups and modals.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    let hor_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    hor_layout[1]
}

/// Style of a form field, highlighted when it has the focus.
pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Draws a horizontal bar chart with one labelled row per entry.
pub fn draw_bar_chart(frame: &mut Frame, area: Rect, title: &str, data: &[(String, u64)]) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());

    if data.is_empty() {
        frame.render_widget(
            Paragraph::new("No data")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let label_width = data
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    // Label, separator, count and borders.
    let reserved_width = label_width as i32 + 12;
    let bar_max_width = (area.width as i32 - reserved_width).max(1) as usize;

    let lines: Vec<Line> = data
        .iter()
        .map(|(label, count)| {
            let bar_width = ((*count as f64 / max_value as f64) * bar_max_width as f64) as usize;
            Line::from(vec![
                Span::styled(
                    format!("{label:>label_width$}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█".repeat(bar_width), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
