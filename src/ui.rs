use crate::app::{AdminTab, AgentTab, App, InputMode, Screen};
use crate::pages::{admin, agent, chat, client_home, popups, welcome};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_status(app, frame, layout[0]);

    match app.screen {
        Screen::Welcome => welcome::render_welcome(frame, layout[1]),
        Screen::Login => welcome::render_login(app, frame, layout[1]),
        Screen::ClientHome => client_home::render_client_home(app, frame, layout[1]),
        Screen::ClientChat => chat::render_client_chat(app, frame, layout[1]),
        Screen::Agent(tab) => render_agent(app, tab, frame, layout[1]),
        Screen::Admin(tab) => render_admin(app, tab, frame, layout[1]),
    }

    frame.render_widget(
        Paragraph::new(key_hints(app)).style(Style::default().fg(Color::DarkGray)),
        layout[2],
    );

    // Popups go last so they sit on top of the page.
    if app.user_form.is_some() {
        popups::render_user_form(app, frame);
    }
    if let Some(user) = &app.pending_delete {
        popups::render_delete_confirmation(user, frame);
    }
    if let Some(alert) = &app.alert {
        popups::render_alert(alert, frame);
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Helpdesk",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        ),
        Span::raw(format!(" | {}", app.screen.title())),
    ];
    if let Some(user) = &app.user {
        spans.push(Span::raw(format!(
            " | {} <{}> ({})",
            user.name,
            user.email,
            user.role.label()
        )));
    }
    if app.busy || app.sending || app.login_pending {
        spans.push(Span::styled(
            " | Working...",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Status")),
        area,
    );
}

fn render_agent(app: &mut App, tab: AgentTab, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<&str> = AgentTab::ALL.iter().map(|t| t.title()).collect();
    let selected = AgentTab::ALL.iter().position(|t| *t == tab).unwrap_or(0);
    frame.render_widget(tab_bar(titles, selected, "Agent console"), chunks[0]);

    match tab {
        AgentTab::Conversations => agent::render_conversations(app, frame, chunks[1]),
        AgentTab::Analytics => agent::render_analytics(app, frame, chunks[1]),
    }
}

fn render_admin(app: &mut App, tab: AdminTab, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<&str> = AdminTab::ALL.iter().map(|t| t.title()).collect();
    frame.render_widget(tab_bar(titles, tab.index(), "Administration"), chunks[0]);

    match tab {
        AdminTab::Dashboard => admin::render_dashboard(app, frame, chunks[1]),
        AdminTab::Users => admin::render_users(app, frame, chunks[1]),
        AdminTab::Glpi => admin::render_glpi(app, frame, chunks[1]),
        AdminTab::Knowledge => admin::render_knowledge(app, frame, chunks[1]),
        AdminTab::Middleware => admin::render_middleware(app, frame, chunks[1]),
    }
}

fn tab_bar<'a>(titles: Vec<&'a str>, selected: usize, title: &'a str) -> Tabs<'a> {
    Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )
}

fn key_hints(app: &App) -> &'static str {
    if app.alert.is_some() {
        return "Enter/Esc: dismiss";
    }
    if app.user_form.is_some() {
        return "Tab/↑↓: field | ←/→/Space: change role/status | Enter: save | Esc: cancel";
    }
    if app.pending_delete.is_some() {
        return "y: delete | n/Esc: cancel";
    }
    if app.input_mode == InputMode::Editing {
        return match app.screen {
            Screen::Admin(_) => "Tab/↑↓: field | Enter: submit | Esc: stop editing",
            _ => "Enter: send | Esc: stop editing",
        };
    }
    match app.screen {
        Screen::Welcome => "Enter: get started | q: quit",
        Screen::Login => "Tab: switch field | Enter: sign in | Esc: back",
        Screen::ClientHome => "j/k: move | Enter: ask about topic | c: open chat | L: sign out | q: quit",
        Screen::ClientChat => {
            "i: write | h: history | n: new request | r: refresh | PgUp/PgDn: scroll | Esc: back"
        }
        Screen::Agent(AgentTab::Conversations) => {
            "j/k: move | Enter: open | i: reply | r: refresh | Tab: analytics | L: sign out | q: quit"
        }
        Screen::Agent(AgentTab::Analytics) => {
            "i: ticket number | Enter: summarize | r: refresh | Tab: conversations | q: quit"
        }
        Screen::Admin(AdminTab::Dashboard) => "j/k: move | Enter: open | 1-5/Tab: section | L: sign out | q: quit",
        Screen::Admin(AdminTab::Users) => "j/k: move | a: add | e: edit | d: delete | r: refresh | Tab: section",
        Screen::Admin(AdminTab::Glpi) => "e: edit | s: save | r: reload | Tab: section",
        Screen::Admin(AdminTab::Knowledge) => {
            "e: edit fields | a: add Q/A | u: upload | d: delete | R: reindex | r: refresh"
        }
        Screen::Admin(AdminTab::Middleware) => "j/k: move | Space: toggle | s: save | r: reload | Tab: section",
    }
}
