use crate::api::types::User;
use crate::app::{Alert, App};
use crate::common::utils::{centered_rect, field_style};
use crate::forms::UserField;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_alert(alert: &Alert, frame: &mut Frame) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let color = if alert.title == "Success" {
        Color::Green
    } else {
        Color::Red
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(alert.title.clone())
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::DarkGray));

    let text = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to close",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

pub fn render_delete_confirmation(user: &User, frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm delete")
        .style(Style::default().bg(Color::DarkGray));

    let text = vec![
        Line::from(format!("Delete {} <{}>?", user.name, user.email)),
        Line::from(""),
        Line::from(Span::styled(
            "y: delete | n: cancel",
            Style::default().fg(Color::Yellow),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

pub fn render_user_form(app: &App, frame: &mut Frame) {
    let Some(form) = &app.user_form else {
        return;
    };

    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let title = if form.is_editing() {
        "Edit user"
    } else {
        "New user"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(block.clone(), area);

    let fields = form.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0)); // Instructions

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(block.inner(area));

    for (i, field) in fields.iter().enumerate() {
        let (label, value) = match field {
            UserField::Name => ("Name", form.name.clone()),
            UserField::Email => ("Email", form.email.clone()),
            UserField::Password if form.is_editing() => (
                "Password (leave empty to keep)",
                "•".repeat(form.password.chars().count()),
            ),
            UserField::Password => ("Password", "•".repeat(form.password.chars().count())),
            UserField::Role => ("Role", format!("◀ {} ▶", form.role.label())),
            UserField::Status => ("Status", format!("◀ {} ▶", form.status.label())),
        };
        let p = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .style(field_style(form.focus == *field)),
        );
        frame.render_widget(p, layout[i]);
    }

    let instructions = Paragraph::new("Tab: next field | ←/→: change | Enter: save | Esc: cancel")
        .alignment(Alignment::Center);
    frame.render_widget(instructions, layout[fields.len()]);
}
