use super::chat::{render_composer, render_conversation, render_ticket_table};
use crate::app::agent::VOLUME_DAYS;
use crate::app::{App, InputMode};
use crate::common::utils::{draw_bar_chart, field_style};
use crate::conversation::Sender;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_conversations(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_ticket_table(app, frame, chunks[0], "Tickets");

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(chunks[1]);

    render_conversation(app, frame, right[0], Sender::Agent);
    render_composer(app, frame, right[1], "Reply to the client...");
}

pub fn render_analytics(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Min(8),    // Daily volume
            Constraint::Length(3), // Summary input
            Constraint::Length(8), // Summary
        ])
        .split(area);

    render_stat_cards(app, frame, chunks[0]);

    let title = format!("Tickets per day (last {VOLUME_DAYS} days)");
    match (&app.stats, &app.stats_error) {
        (_, Some(err)) => frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        ),
        (Some(stats), None) => {
            let data: Vec<(String, u64)> = stats
                .daily_volume
                .iter()
                .map(|d| (d.day.clone(), d.count))
                .collect();
            draw_bar_chart(frame, chunks[1], &title, &data);
        }
        (None, None) => frame.render_widget(
            Paragraph::new("Loading statistics...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        ),
    }

    let editing = app.input_mode == InputMode::Editing;
    let input = if editing {
        format!("{}▏", app.summary_input)
    } else {
        app.summary_input.clone()
    };
    frame.render_widget(
        Paragraph::new(input).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ticket number to summarize (i: edit, Enter: summarize)")
                .style(field_style(editing)),
        ),
        chunks[2],
    );

    let summary_block = Block::default().borders(Borders::ALL).title("AI summary");
    let summary = if app.summary_loading {
        Paragraph::new("Generating summary...").style(Style::default().fg(Color::Yellow))
    } else if let Some(summary) = &app.summary {
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Ticket #{}", summary.ticket_id),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(summary.summary.clone()),
        ])
    } else {
        Paragraph::new("No summary requested yet.").style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(
        summary.block(summary_block).wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn render_stat_cards(app: &App, frame: &mut Frame, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let values = app.stats.as_ref().map(|s| {
        [
            s.tickets_received,
            s.recurring_problems,
            s.automatic_reports,
        ]
    });
    let labels = ["Tickets received", "Recurring problems", "Automatic reports"];
    let colors = [Color::Cyan, Color::Yellow, Color::Green];

    for i in 0..3 {
        let value = match (values, app.stats_loading) {
            (Some(v), _) => v[i].to_string(),
            (None, true) => "...".to_string(),
            (None, false) => "-".to_string(),
        };
        let p = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(colors[i]).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(labels[i]));
        frame.render_widget(p, cards[i]);
    }
}
