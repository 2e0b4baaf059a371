//! Reconciles a ticket and its follow-ups into one chronological chat thread.
//!
//! The ticketing backend has no notion of "who wrote this follow-up" that the
//! client can rely on, so every message posted from this application carries
//! a marker prefix naming its sender. Follow-ups written elsewhere (for
//! instance by a technician in the ticketing web UI) carry no marker and are
//! treated as agent replies.

use crate::api::types::{Followup, Ticket};
use chrono::{DateTime, NaiveDateTime};

pub const AGENT_MARKER: &str = "AGENT_MSG::";
pub const CLIENT_MARKER: &str = "CLIENT_MSG::";

/// Maximum length of a ticket title derived from a first message.
pub const TITLE_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Client,
    Agent,
}

impl Sender {
    pub fn marker(&self) -> &'static str {
        match self {
            Sender::Client => CLIENT_MARKER,
            Sender::Agent => AGENT_MARKER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: Option<NaiveDateTime>,
}

/// Splits the sender marker off `content`. Untagged content is attributed to
/// `default`.
pub fn tag_sender(content: &str, default: Sender) -> (Sender, &str) {
    let trimmed = content.trim_start();
    if let Some(rest) = trimmed.strip_prefix(AGENT_MARKER) {
        (Sender::Agent, rest.trim_start())
    } else if let Some(rest) = trimmed.strip_prefix(CLIENT_MARKER) {
        (Sender::Client, rest.trim_start())
    } else {
        (default, content)
    }
}

pub fn encode_outgoing(sender: Sender, text: &str) -> String {
    format!("{}{}", sender.marker(), text.trim())
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Undoes the HTML escaping the ticketing backend applies to stored content.
pub fn clean_content(raw: &str) -> String {
    let decoded = raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    let mut text = decoded
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("</p><p>", "\n");
    for tag in ["<p>", "</p>"] {
        text = text.replace(tag, "");
    }
    text.trim().to_string()
}

/// Title for a ticket opened from a chat message: the first line, cut to
/// [`TITLE_MAX_CHARS`] characters.
pub fn title_from_message(text: &str) -> String {
    let first_line = text.trim().lines().next().unwrap_or("").trim();
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(TITLE_MAX_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

pub fn build_conversation(ticket: &Ticket, followups: &[Followup]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(followups.len() + 1);

    let initial = clean_content(&ticket.content);
    if !initial.is_empty() {
        let (sender, text) = tag_sender(&initial, Sender::Client);
        messages.push(Message {
            id: format!("ticket-{}", ticket.id),
            sender,
            text: text.to_string(),
            timestamp: ticket.date.as_deref().and_then(parse_timestamp),
        });
    }

    for followup in followups {
        let content = clean_content(&followup.content);
        let (sender, text) = tag_sender(&content, Sender::Agent);
        messages.push(Message {
            id: format!("followup-{}", followup.id),
            sender,
            text: text.to_string(),
            timestamp: followup.date_creation.as_deref().and_then(parse_timestamp),
        });
    }

    // Stable: equal timestamps keep arrival order, undated messages go last.
    messages.sort_by_key(|m| (m.timestamp.is_none(), m.timestamp));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TicketStatus;

    fn ticket(content: &str, date: Option<&str>) -> Ticket {
        Ticket {
            id: 7,
            name: "Paiement refusé".to_string(),
            status: TicketStatus::New,
            date: date.map(str::to_string),
            requester_email: Some("client@cms.sn".to_string()),
            content: content.to_string(),
        }
    }

    fn followup(id: i64, content: &str, date: Option<&str>) -> Followup {
        Followup {
            id,
            content: content.to_string(),
            date_creation: date.map(str::to_string),
        }
    }

    #[test]
    fn markers_decide_sender_and_are_stripped() {
        assert_eq!(
            tag_sender("AGENT_MSG::Bonjour", Sender::Client),
            (Sender::Agent, "Bonjour")
        );
        assert_eq!(
            tag_sender("  CLIENT_MSG:: Merci", Sender::Agent),
            (Sender::Client, "Merci")
        );
        assert_eq!(tag_sender("no marker", Sender::Agent), (Sender::Agent, "no marker"));
    }

    #[test]
    fn outgoing_messages_carry_the_marker() {
        assert_eq!(encode_outgoing(Sender::Client, "  hello "), "CLIENT_MSG::hello");
        assert_eq!(encode_outgoing(Sender::Agent, "ok"), "AGENT_MSG::ok");
    }

    #[test]
    fn timestamps_in_every_backend_format_parse() {
        let expected = NaiveDateTime::parse_from_str("2025-07-09 10:24:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(parse_timestamp("2025-07-09 10:24:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-09T10:24:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-09T10:24:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-09T12:24:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn merge_orders_messages_chronologically() {
        let t = ticket("Ma carte est bloquée", Some("2025-07-09 09:00:00"));
        let followups = vec![
            followup(3, "CLIENT_MSG::Toujours bloquée", Some("2025-07-09 11:00:00")),
            followup(2, "AGENT_MSG::Nous regardons", Some("2025-07-09 10:00:00")),
        ];

        let messages = build_conversation(&t, &followups);
        let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["ticket-7", "followup-2", "followup-3"]);
        assert_eq!(messages[0].sender, Sender::Client);
        assert_eq!(messages[1].sender, Sender::Agent);
        assert_eq!(messages[1].text, "Nous regardons");
        assert_eq!(messages[2].sender, Sender::Client);
    }

    #[test]
    fn equal_timestamps_keep_arrival_order_and_undated_go_last() {
        let t = ticket("Initial", Some("2025-07-09 09:00:00"));
        let followups = vec![
            followup(1, "undated", None),
            followup(2, "AGENT_MSG::same time", Some("2025-07-09 09:00:00")),
            followup(3, "earlier", Some("2025-07-08 09:00:00")),
        ];

        let ids: Vec<String> = build_conversation(&t, &followups)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["followup-3", "ticket-7", "followup-2", "followup-1"]);
    }

    #[test]
    fn blank_ticket_content_is_skipped_and_untagged_followups_are_agent() {
        let t = ticket("   ", None);
        let messages = build_conversation(&t, &[followup(1, "Réponse du technicien", None)]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Agent);
    }

    #[test]
    fn tagged_initial_content_is_stripped() {
        let t = ticket("CLIENT_MSG::Bonjour", None);
        let messages = build_conversation(&t, &[]);
        assert_eq!(messages[0].text, "Bonjour");
        assert_eq!(messages[0].sender, Sender::Client);
    }

    #[test]
    fn escaped_html_is_cleaned_before_tagging() {
        let t = ticket("&lt;p&gt;AGENT_MSG::Vérifiez &amp; réessayez&lt;/p&gt;", None);
        let messages = build_conversation(&t, &[]);
        assert_eq!(messages[0].sender, Sender::Agent);
        assert_eq!(messages[0].text, "Vérifiez & réessayez");
    }

    #[test]
    fn long_first_lines_are_shortened_for_titles() {
        assert_eq!(title_from_message("Short\nsecond line"), "Short");
        let long = "x".repeat(100);
        let title = title_from_message(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert!(title.ends_with('…'));
    }
}
