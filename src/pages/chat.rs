use crate::app::{App, InputMode};
use crate::common::utils::{format_message_time, format_timestamp};
use crate::conversation::Sender;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

pub fn render_client_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let main = if app.history_open {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);
        render_ticket_table(app, frame, chunks[0], "My requests");
        chunks[1]
    } else {
        area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(main);

    render_conversation(app, frame, chunks[0], Sender::Client);
    let placeholder = if app.conversation.ticket.is_some() {
        "Write a message..."
    } else {
        "Describe your problem to open a new request..."
    };
    render_composer(app, frame, chunks[1], placeholder);
}

/// Ticket list shared by the client history panel and the agent console.
pub fn render_ticket_table(app: &mut App, frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());

    if app.tickets_loading && app.tickets.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading tickets...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }
    if let Some(err) = &app.tickets_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }
    if app.tickets.is_empty() {
        frame.render_widget(
            Paragraph::new("No tickets yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let open_id = app.conversation.open_ticket_id();
    let rows: Vec<Row> = app
        .tickets
        .iter()
        .map(|ticket| {
            let status_style = if ticket.status.is_open() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let name_style = if open_id == Some(ticket.id) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("#{}", ticket.id)),
                Cell::from(Span::styled(ticket.name.clone(), name_style)),
                Cell::from(Span::styled(ticket.status.label(), status_style)),
                Cell::from(format_timestamp(ticket.date.as_deref())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["ID", "Subject", "Status", "Date"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.tickets_state);
}

/// Renders the open conversation. Messages written by `viewer` are aligned
/// to the right.
pub fn render_conversation(app: &App, frame: &mut Frame, area: Rect, viewer: Sender) {
    let view = &app.conversation;
    let title = match &view.ticket {
        Some(ticket) => format!("#{} {} [{}]", ticket.id, ticket.name, ticket.status.label()),
        None if viewer == Sender::Client => "New request".to_string(),
        None => "Conversation".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.loading && view.messages.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading conversation...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }
    if let Some(err) = &view.error {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }
    if view.messages.is_empty() {
        let hint = match viewer {
            Sender::Client => "Hello! Tell us what is happening and an agent will answer you here.",
            Sender::Agent => "Select a ticket and press Enter to open its conversation.",
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in &view.messages {
        let own = message.sender == viewer;
        let (author, color) = match (message.sender, own) {
            (_, true) => ("You", Color::Cyan),
            (Sender::Agent, false) => ("Support", Color::Green),
            (Sender::Client, false) => ("Client", Color::Magenta),
        };
        let alignment = if own {
            Alignment::Right
        } else {
            Alignment::Left
        };

        let time = format_message_time(message.timestamp);
        let header = if time.is_empty() {
            author.to_string()
        } else {
            format!("{author} · {time}")
        };
        lines.push(
            Line::from(Span::styled(
                header,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(alignment),
        );
        for text_line in message.text.lines() {
            lines.push(Line::from(text_line.to_string()).alignment(alignment));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((view.scroll, 0)),
        area,
    );
}

pub fn render_composer(app: &App, frame: &mut Frame, area: Rect, placeholder: &str) {
    let editing = app.input_mode == InputMode::Editing;
    let (title, style) = if app.sending {
        ("Sending...", Style::default().fg(Color::Yellow))
    } else if editing {
        ("Message (Enter: send, Esc: stop)", Style::default().fg(Color::Yellow))
    } else {
        ("Message (i: write)", Style::default())
    };

    let content = if app.composer.is_empty() && !editing {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else if editing {
        Span::raw(format!("{}▏", app.composer))
    } else {
        Span::raw(app.composer.clone())
    };

    frame.render_widget(
        Paragraph::new(Line::from(content))
            .block(Block::default().borders(Borders::ALL).title(title).style(style)),
        area,
    );
}
