use crate::app::{AdminTab, App, InputMode};
use crate::api::types::UserStatus;
use crate::common::utils::{field_style, format_timestamp};
use crate::forms::{GlpiField, KnowledgeField};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
};

fn card_description(tab: AdminTab) -> &'static str {
    match tab {
        AdminTab::Users => "Create accounts, assign roles and approve registrations",
        AdminTab::Glpi => "Ticketing backend URL and API tokens",
        AdminTab::Knowledge => "Documents and Q/A pairs used by the assistant",
        AdminTab::Middleware => "Log level, WAF, rate limiting and maintenance mode",
        AdminTab::Dashboard => "",
    }
}

pub fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = AdminTab::ALL[1..]
        .iter()
        .map(|tab| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{}. {}", tab.index() + 1, tab.title()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("   {}", card_description(*tab)),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Administration"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut app.admin_menu_state);
}

pub fn render_users(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Users ({})", app.users.len()));

    if let Some(err) = &app.users_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }
    if app.users_loading && app.users.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading users...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = app
        .users
        .iter()
        .map(|user| {
            let status_color = match user.status {
                UserStatus::Active => Color::Green,
                UserStatus::Pending => Color::Yellow,
                UserStatus::Rejected | UserStatus::Blocked => Color::Red,
            };
            Row::new(vec![
                Cell::from(user.id.to_string()),
                Cell::from(user.name.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.role.label()),
                Cell::from(Span::styled(
                    user.status.label(),
                    Style::default().fg(status_color),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Email", "Role", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.users_state);
}

pub fn render_glpi(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("GLPI connection");
    frame.render_widget(block.clone(), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // API URL
            Constraint::Length(3), // App token
            Constraint::Length(3), // User token
            Constraint::Min(0),    // Notes
        ])
        .split(block.inner(area));

    let form = &app.glpi_form;
    let editing = app.input_mode == InputMode::Editing;
    let fields = [
        (GlpiField::ApiUrl, "API URL", form.api_url.clone()),
        (
            GlpiField::AppToken,
            "App token",
            "•".repeat(form.app_token.chars().count()),
        ),
        (
            GlpiField::UserToken,
            "User token",
            "•".repeat(form.user_token.chars().count()),
        ),
    ];

    for (i, (field, label, value)) in fields.into_iter().enumerate() {
        let focused = form.focus == field;
        let value = if focused && editing {
            format!("{value}▏")
        } else {
            value
        };
        let p = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .style(field_style(focused)),
        );
        frame.render_widget(p, layout[i]);
    }

    let note = if app.glpi_loading {
        Line::from(Span::styled(
            "Loading current settings...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "Tokens are never displayed. Leave a token empty to keep the stored value.",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(note).wrap(Wrap { trim: true }), layout[3]);
}

pub fn render_knowledge(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_documents(app, frame, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question
            Constraint::Length(5), // Answer
            Constraint::Length(3), // Upload path
            Constraint::Min(0),
        ])
        .split(chunks[1]);

    let form = &app.knowledge_form;
    let editing = app.input_mode == InputMode::Editing;
    let fields = [
        (KnowledgeField::Question, "Question", &form.question),
        (KnowledgeField::Answer, "Answer", &form.answer),
        (KnowledgeField::UploadPath, "File to upload", &form.upload_path),
    ];
    for (i, (field, label, value)) in fields.into_iter().enumerate() {
        let focused = form.focus == field;
        let text = if focused && editing {
            format!("{value}▏")
        } else {
            value.clone()
        };
        let p = Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .style(field_style(focused && editing)),
        );
        frame.render_widget(p, right[i]);
    }
}

fn render_documents(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Documents ({})", app.documents.len()));

    if let Some(err) = &app.documents_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }
    if app.documents_loading && app.documents.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading documents...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = app
        .documents
        .iter()
        .map(|doc| {
            Row::new(vec![
                Cell::from(doc.id.to_string()),
                Cell::from(doc.title.clone()),
                Cell::from(format_timestamp(doc.uploaded_at.as_deref())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["ID", "Title", "Uploaded"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.documents_state);
}

pub fn render_middleware(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Middleware settings");

    if let Some(err) = &app.middleware_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }
    if app.middleware_loading {
        frame.render_widget(
            Paragraph::new("Loading settings...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    let on_off = |enabled: bool| {
        if enabled {
            Span::styled("ON", Style::default().fg(Color::Green))
        } else {
            Span::styled("OFF", Style::default().fg(Color::DarkGray))
        }
    };
    let settings = &app.middleware;
    let maintenance = if settings.maintenance_mode {
        Span::styled("ON", Style::default().fg(Color::Red))
    } else {
        on_off(false)
    };
    let rows = vec![
        Row::new(vec![
            Cell::from("Log level"),
            Cell::from(settings.log_level.label()),
        ]),
        Row::new(vec![
            Cell::from("Web application firewall"),
            Cell::from(on_off(settings.waf_enabled)),
        ]),
        Row::new(vec![
            Cell::from("Rate limiting"),
            Cell::from(on_off(settings.rate_limiting_enabled)),
        ]),
        Row::new(vec![Cell::from("Maintenance mode"), Cell::from(maintenance)]),
    ];

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(
            Row::new(vec!["Setting", "Value"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.middleware_state);
}
