use crate::app::App;
use crate::common::utils::{centered_rect, field_style};
use crate::forms::LoginField;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let area = centered_rect(60, 50, area);
    let text = vec![
        Line::from(Span::styled(
            "Mobile Banking Support",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("Get help with your cards, payments and account access."),
        Line::from("Chat with our support team and follow your requests."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to get started",
            Style::default().fg(Color::Yellow),
        )),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Welcome")),
        area,
    );
}

pub fn render_login(app: &App, frame: &mut Frame, area: Rect) {
    let area = centered_rect(50, 60, area);
    frame.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title("Sign in");
    frame.render_widget(block.clone(), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1),
            Constraint::Min(0), // Status
        ])
        .split(block.inner(area));

    let form = &app.login_form;
    let email = Paragraph::new(form.email.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Email")
            .style(field_style(form.focus == LoginField::Email)),
    );
    frame.render_widget(email, layout[0]);

    let masked = "•".repeat(form.password.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Password")
            .style(field_style(form.focus == LoginField::Password)),
    );
    frame.render_widget(password, layout[1]);

    let status = if app.login_pending {
        Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new("Enter: sign in").style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(status.alignment(Alignment::Center), layout[3]);
}
