use crate::app::App;
use crate::app::client::FREQUENT_QUESTIONS;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn render_client_home(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let name = app.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
    let greeting = vec![
        Line::from(Span::styled(
            format!("Hello {name}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("How can we help you today? Pick a topic or press c to talk to us."),
    ];
    frame.render_widget(
        Paragraph::new(greeting)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Home")),
        chunks[0],
    );

    let items: Vec<ListItem> = FREQUENT_QUESTIONS
        .iter()
        .map(|(title, subtitle)| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    *title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {subtitle}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Frequent questions"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, chunks[1], &mut app.faq_state);
}
