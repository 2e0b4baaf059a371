use super::{App, ConversationView, InputMode, Screen, next_index, prev_index, spawn_request};
use crate::api::TicketsApi;
use crate::api::types::{Followup, Ticket};
use crate::conversation::{Sender, encode_outgoing, title_from_message};
use crate::event::Event;
use crate::forms::edit_text;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Shortcuts offered on the client home screen: (title, subtitle).
pub const FREQUENT_QUESTIONS: [(&str, &str); 4] = [
    ("Printing problem", "Fix printer issues"),
    ("Access to my account", "Sign-in problems"),
    ("Payment not registered", "Transaction problems"),
    ("Order tracking", "Locate my order"),
];

impl App {
    pub(crate) fn handle_client_home_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('L') => self.sign_out(),
            KeyCode::Char('j') | KeyCode::Down => {
                let next = next_index(self.faq_state.selected(), FREQUENT_QUESTIONS.len());
                self.faq_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = prev_index(self.faq_state.selected(), FREQUENT_QUESTIONS.len());
                self.faq_state.select(prev);
            }
            KeyCode::Enter => {
                let topic = self
                    .faq_state
                    .selected()
                    .and_then(|i| FREQUENT_QUESTIONS.get(i))
                    .map(|(title, _)| title.to_string());
                self.open_client_chat(tx);
                if let Some(topic) = topic {
                    self.composer = topic;
                    self.input_mode = InputMode::Editing;
                }
            }
            KeyCode::Char('c') => self.open_client_chat(tx),
            _ => {}
        }
    }

    pub(crate) fn open_client_chat(&mut self, tx: UnboundedSender<Event>) {
        self.screen = Screen::ClientChat;
        self.input_mode = InputMode::Normal;
        self.history_open = false;
        self.conversation = ConversationView::default();
        self.composer.clear();
        self.fetch_my_tickets(tx);
    }

    fn fetch_my_tickets(&mut self, tx: UnboundedSender<Event>) {
        self.tickets_loading = true;
        self.tickets_error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.list_my_tickets().await },
            Event::TicketsFetched,
        );
    }

    pub(crate) fn handle_client_chat_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        if self.input_mode == InputMode::Editing {
            self.handle_composer_key(key, Sender::Client, tx);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('L') => self.sign_out(),
            KeyCode::Esc => {
                if self.history_open {
                    self.history_open = false;
                } else {
                    self.screen = Screen::ClientHome;
                }
            }
            KeyCode::Char('h') => self.history_open = !self.history_open,
            KeyCode::Char('n') => {
                self.conversation = ConversationView::default();
                self.history_open = false;
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('r') => {
                self.fetch_my_tickets(tx.clone());
                if let Some(id) = self.conversation.open_ticket_id() {
                    self.fetch_conversation(id, tx);
                }
            }
            KeyCode::PageUp => self.scroll_conversation_up(),
            KeyCode::PageDown => self.scroll_conversation_down(),
            KeyCode::Char('j') | KeyCode::Down if self.history_open => self.next_ticket(),
            KeyCode::Char('k') | KeyCode::Up if self.history_open => self.previous_ticket(),
            KeyCode::Enter if self.history_open => {
                if let Some(ticket) = self.selected_ticket() {
                    let id = ticket.id;
                    self.history_open = false;
                    self.conversation = ConversationView::default();
                    self.fetch_conversation(id, tx);
                }
            }
            KeyCode::Char('i') | KeyCode::Enter => self.input_mode = InputMode::Editing,
            _ => {}
        }
    }

    /// Shared by the client chat and the agent conversation view.
    pub(crate) fn handle_composer_key(
        &mut self,
        key: KeyEvent,
        sender: Sender,
        tx: UnboundedSender<Event>,
    ) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.send_message(sender, tx),
            _ => {
                edit_text(&mut self.composer, &key);
            }
        }
    }

    fn send_message(&mut self, sender: Sender, tx: UnboundedSender<Event>) {
        let text = self.composer.trim().to_string();
        if text.is_empty() || self.sending {
            return;
        }
        // Another ticket is still loading; its id is not the one on screen.
        if self.conversation.requested.is_some()
            && self.conversation.requested != self.conversation.open_ticket_id()
        {
            self.show_alert("Please wait", "The conversation is still loading.");
            return;
        }

        let client = self.client.clone();
        let content = encode_outgoing(sender, &text);
        match self.conversation.open_ticket_id() {
            Some(ticket_id) => {
                self.sending = true;
                spawn_request(
                    tx,
                    self.session,
                    async move { client.add_followup(ticket_id, &content).await },
                    move |result| Event::FollowupPosted(ticket_id, result),
                );
            }
            None if sender == Sender::Client => {
                self.sending = true;
                let title = title_from_message(&text);
                spawn_request(
                    tx,
                    self.session,
                    async move { client.create_ticket(&title, &content).await },
                    Event::TicketCreated,
                );
            }
            None => self.show_alert("No conversation", "Select a ticket before replying."),
        }
    }

    pub(crate) fn on_followup_posted(
        &mut self,
        ticket_id: i64,
        result: Result<Followup, String>,
        tx: UnboundedSender<Event>,
    ) {
        self.sending = false;
        match result {
            Ok(_) => {
                self.composer.clear();
                if self.conversation.open_ticket_id() == Some(ticket_id) {
                    self.fetch_conversation(ticket_id, tx);
                }
            }
            Err(e) => self.show_alert("Message not sent", e),
        }
    }

    pub(crate) fn on_ticket_created(
        &mut self,
        result: Result<Ticket, String>,
        tx: UnboundedSender<Event>,
    ) {
        self.sending = false;
        match result {
            Ok(ticket) => {
                tracing::info!(ticket_id = ticket.id, "ticket created");
                self.composer.clear();
                self.input_mode = InputMode::Normal;
                self.fetch_conversation(ticket.id, tx.clone());
                self.fetch_my_tickets(tx);
            }
            Err(e) => self.show_alert("Request not sent", e),
        }
    }

    pub(crate) fn selected_ticket(&self) -> Option<&Ticket> {
        self.tickets_state
            .selected()
            .and_then(|i| self.tickets.get(i))
    }

    pub(crate) fn next_ticket(&mut self) {
        let next = next_index(self.tickets_state.selected(), self.tickets.len());
        self.tickets_state.select(next);
    }

    pub(crate) fn previous_ticket(&mut self) {
        let prev = prev_index(self.tickets_state.selected(), self.tickets.len());
        self.tickets_state.select(prev);
    }

    pub(crate) fn scroll_conversation_up(&mut self) {
        self.conversation.scroll = self.conversation.scroll.saturating_sub(5);
    }

    pub(crate) fn scroll_conversation_down(&mut self) {
        self.conversation.scroll = self.conversation.scroll.saturating_add(5);
    }
}
