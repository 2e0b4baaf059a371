use super::{AgentTab, App, ConversationView, InputMode, Screen, spawn_request};
use crate::api::types::{AgentStats, TicketSummary};
use crate::api::{AnalyticsApi, TicketsApi};
use crate::conversation::Sender;
use crate::event::Event;
use crate::forms::edit_text;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Days covered by the ticket volume chart.
pub const VOLUME_DAYS: u32 = 7;

impl App {
    pub(crate) fn enter_agent_tab(&mut self, tab: AgentTab, tx: UnboundedSender<Event>) {
        self.screen = Screen::Agent(tab);
        self.input_mode = InputMode::Normal;
        match tab {
            AgentTab::Conversations => self.fetch_all_tickets(tx),
            AgentTab::Analytics => self.fetch_stats(tx),
        }
    }

    fn fetch_all_tickets(&mut self, tx: UnboundedSender<Event>) {
        self.tickets_loading = true;
        self.tickets_error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.list_tickets().await },
            Event::TicketsFetched,
        );
    }

    fn fetch_stats(&mut self, tx: UnboundedSender<Event>) {
        self.stats_loading = true;
        self.stats_error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.get_agent_stats(VOLUME_DAYS).await },
            Event::StatsFetched,
        );
    }

    pub(crate) fn handle_agent_key(
        &mut self,
        tab: AgentTab,
        key: KeyEvent,
        tx: UnboundedSender<Event>,
    ) {
        if self.input_mode == InputMode::Editing {
            match tab {
                AgentTab::Conversations => self.handle_composer_key(key, Sender::Agent, tx),
                AgentTab::Analytics => self.handle_summary_input_key(key, tx),
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('L') => {
                self.sign_out();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let other = match tab {
                    AgentTab::Conversations => AgentTab::Analytics,
                    AgentTab::Analytics => AgentTab::Conversations,
                };
                self.enter_agent_tab(other, tx);
                return;
            }
            _ => {}
        }

        match tab {
            AgentTab::Conversations => self.handle_agent_conversations_key(key, tx),
            AgentTab::Analytics => self.handle_analytics_key(key, tx),
        }
    }

    fn handle_agent_conversations_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.next_ticket(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_ticket(),
            KeyCode::Enter => {
                if let Some(id) = self.selected_ticket().map(|t| t.id) {
                    self.conversation = ConversationView::default();
                    self.composer.clear();
                    self.fetch_conversation(id, tx);
                }
            }
            KeyCode::Char('i') => {
                if self.conversation.ticket.is_some() {
                    self.input_mode = InputMode::Editing;
                } else {
                    self.show_alert("No conversation", "Open a ticket before replying.");
                }
            }
            KeyCode::Char('r') => {
                self.fetch_all_tickets(tx.clone());
                if let Some(id) = self.conversation.open_ticket_id() {
                    self.fetch_conversation(id, tx);
                }
            }
            KeyCode::PageUp => self.scroll_conversation_up(),
            KeyCode::PageDown => self.scroll_conversation_down(),
            _ => {}
        }
    }

    fn handle_analytics_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('i') => self.input_mode = InputMode::Editing,
            KeyCode::Enter => self.request_summary(tx),
            KeyCode::Char('r') => self.fetch_stats(tx),
            _ => {}
        }
    }

    fn handle_summary_input_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.request_summary(tx);
            }
            KeyCode::Char(c) if !c.is_ascii_digit() => {}
            _ => {
                edit_text(&mut self.summary_input, &key);
            }
        }
    }

    fn request_summary(&mut self, tx: UnboundedSender<Event>) {
        let Ok(ticket_id) = self.summary_input.trim().parse::<i64>() else {
            self.show_alert("Error", "Enter a ticket number.");
            return;
        };
        if self.summary_loading {
            return;
        }

        self.summary_loading = true;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.summarize_ticket(ticket_id).await },
            move |result| Event::SummaryFetched(ticket_id, result),
        );
    }

    pub(crate) fn on_stats_fetched(&mut self, result: Result<AgentStats, String>) {
        self.stats_loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.stats_error = None;
            }
            Err(e) => self.stats_error = Some(e),
        }
    }

    pub(crate) fn on_summary_fetched(
        &mut self,
        ticket_id: i64,
        result: Result<TicketSummary, String>,
    ) {
        self.summary_loading = false;
        match result {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => self.show_alert(format!("Summary of ticket {ticket_id}"), e),
        }
    }
}
