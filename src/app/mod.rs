pub mod admin;
pub mod agent;
pub mod client;
pub mod login;

use crate::api::types::{
    AgentStats, Document, MiddlewareConfig, Ticket, TicketSummary, User,
};
use crate::api::{ApiError, HelpdeskClient};
use crate::conversation::{Message, build_conversation, parse_timestamp};
use crate::event::{Event, EventHandler};
use crate::forms::{GlpiForm, KnowledgeForm, LoginForm, UserForm};
use crate::roles::Console;
use crate::session::{Session, SessionStore};
use crate::tui::Tui;
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTab {
    Conversations,
    Analytics,
}

impl AgentTab {
    pub const ALL: [AgentTab; 2] = [AgentTab::Conversations, AgentTab::Analytics];

    pub fn title(&self) -> &'static str {
        match self {
            AgentTab::Conversations => "Conversations",
            AgentTab::Analytics => "AI Analytics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Dashboard,
    Users,
    Glpi,
    Knowledge,
    Middleware,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Dashboard,
        AdminTab::Users,
        AdminTab::Glpi,
        AdminTab::Knowledge,
        AdminTab::Middleware,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AdminTab::Dashboard => "Dashboard",
            AdminTab::Users => "Users & Roles",
            AdminTab::Glpi => "GLPI Connection",
            AdminTab::Knowledge => "Knowledge Base",
            AdminTab::Middleware => "Middleware",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Login,
    ClientHome,
    ClientChat,
    Agent(AgentTab),
    Admin(AdminTab),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::Login => "Sign in",
            Screen::ClientHome => "Home",
            Screen::ClientChat => "Support chat",
            Screen::Agent(tab) => tab.title(),
            Screen::Admin(tab) => tab.title(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Blocking popup: while one is shown every key only dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ConversationView {
    /// Ticket whose conversation was last requested.
    pub requested: Option<i64>,
    pub ticket: Option<Ticket>,
    pub messages: Vec<Message>,
    pub loading: bool,
    pub error: Option<String>,
    pub scroll: u16,
}

impl ConversationView {
    pub fn open_ticket_id(&self) -> Option<i64> {
        self.ticket.as_ref().map(|t| t.id)
    }
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub client: HelpdeskClient,
    pub session_store: SessionStore,
    pub user: Option<User>,
    /// Bumped on every sign-in and sign-out; request outcomes carry it back.
    pub session: u64,
    pub alert: Option<Alert>,
    pub busy: bool,

    pub login_form: LoginForm,
    pub login_pending: bool,

    // Client home & chat, agent conversations
    pub faq_state: ListState,
    pub tickets: Vec<Ticket>,
    pub tickets_loading: bool,
    pub tickets_error: Option<String>,
    pub tickets_state: TableState,
    pub history_open: bool,
    pub conversation: ConversationView,
    pub composer: String,
    pub sending: bool,

    // Agent analytics
    pub stats: Option<AgentStats>,
    pub stats_loading: bool,
    pub stats_error: Option<String>,
    pub summary_input: String,
    pub summary: Option<TicketSummary>,
    pub summary_loading: bool,

    // Admin console
    pub admin_menu_state: ListState,
    pub users: Vec<User>,
    pub users_loading: bool,
    pub users_error: Option<String>,
    pub users_state: TableState,
    pub user_form: Option<UserForm>,
    pub pending_delete: Option<User>,
    pub glpi_form: GlpiForm,
    pub glpi_loading: bool,
    pub knowledge_form: KnowledgeForm,
    pub documents: Vec<Document>,
    pub documents_loading: bool,
    pub documents_error: Option<String>,
    pub documents_state: TableState,
    pub middleware: MiddlewareConfig,
    pub middleware_loading: bool,
    pub middleware_error: Option<String>,
    pub middleware_state: TableState,
}

impl App {
    /// A restored session skips the sign-in screens.
    pub fn new(mut client: HelpdeskClient, session_store: SessionStore, session: Option<Session>) -> Self {
        let user = session.map(|s| {
            client.set_token(s.token);
            s.user
        });

        let mut faq_state = ListState::default();
        faq_state.select(Some(0));
        let mut admin_menu_state = ListState::default();
        admin_menu_state.select(Some(0));
        let mut middleware_state = TableState::default();
        middleware_state.select(Some(0));

        Self {
            should_quit: false,
            screen: Screen::Welcome,
            input_mode: InputMode::Normal,
            client,
            session_store,
            user,
            session: 0,
            alert: None,
            busy: false,

            login_form: LoginForm::default(),
            login_pending: false,

            faq_state,
            tickets: Vec::new(),
            tickets_loading: false,
            tickets_error: None,
            tickets_state: TableState::default(),
            history_open: false,
            conversation: ConversationView::default(),
            composer: String::new(),
            sending: false,

            stats: None,
            stats_loading: false,
            stats_error: None,
            summary_input: String::new(),
            summary: None,
            summary_loading: false,

            admin_menu_state,
            users: Vec::new(),
            users_loading: false,
            users_error: None,
            users_state: TableState::default(),
            user_form: None,
            pending_delete: None,
            glpi_form: GlpiForm::default(),
            glpi_loading: false,
            knowledge_form: KnowledgeForm::default(),
            documents: Vec::new(),
            documents_loading: false,
            documents_error: None,
            documents_state: TableState::default(),
            middleware: MiddlewareConfig::default(),
            middleware_loading: false,
            middleware_error: None,
            middleware_state,
        }
    }

    pub async fn run(&mut self, tui: &mut Tui, events: &mut EventHandler) -> Result<()> {
        self.start(events.sender());

        while !self.should_quit {
            tui.draw(|f| {
                ui::render(self, f);
            })?;

            let event = events.next().await?;
            self.handle_event(event, events.sender());
        }
        Ok(())
    }

    pub fn start(&mut self, tx: UnboundedSender<Event>) {
        if self.user.is_some() {
            tracing::info!("restored stored session");
            self.enter_console(tx);
        }
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn console(&self) -> Option<Console> {
        self.user.as_ref().map(|u| u.role.console())
    }

    pub fn handle_event(&mut self, event: Event, tx: UnboundedSender<Event>) {
        // Results that arrive after sign-out belong to the previous user.
        let signed_out = self.user.is_none();
        match event {
            Event::Tick | Event::Resize(_, _) => {}
            Event::Key(key) => self.handle_key_event(key, tx),
            Event::LoggedIn(result) => self.on_logged_in(result, tx),
            Event::Response(session, event) if session == self.session => {
                self.handle_event(*event, tx)
            }
            Event::Response(session, _) => {
                tracing::debug!(
                    session,
                    current = self.session,
                    "dropped outcome of an earlier session"
                );
            }
            _ if signed_out => {}
            Event::SessionExpired => {
                tracing::info!("session expired, returning to sign-in");
                self.sign_out();
                self.show_alert(
                    "Session expired",
                    "Your session has expired. Please sign in again.",
                );
            }
            Event::TicketsFetched(result) => self.on_tickets_fetched(result),
            Event::ConversationFetched(id, result) => self.on_conversation_fetched(id, result),
            Event::FollowupPosted(id, result) => self.on_followup_posted(id, result, tx),
            Event::TicketCreated(result) => self.on_ticket_created(result, tx),
            Event::StatsFetched(result) => self.on_stats_fetched(result),
            Event::SummaryFetched(id, result) => self.on_summary_fetched(id, result),
            Event::UsersFetched(result) => self.on_users_fetched(result),
            Event::UserSaved(result) => self.on_user_saved(result, tx),
            Event::UserDeleted(id, result) => self.on_user_deleted(id, result),
            Event::DocumentsFetched(result) => self.on_documents_fetched(result),
            Event::DocumentUploaded(result) => self.on_document_uploaded(result),
            Event::DocumentDeleted(id, result) => self.on_document_deleted(id, result),
            Event::ReindexFinished(result) => self.on_reindex_finished(result),
            Event::QaPairAdded(result) => self.on_qa_pair_added(result),
            Event::MiddlewareFetched(result) => self.on_middleware_fetched(result),
            Event::MiddlewareSaved(result) => self.on_middleware_saved(result),
            Event::GlpiFetched(result) => self.on_glpi_fetched(result),
            Event::GlpiSaved(result) => self.on_glpi_saved(result),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return;
        }

        match self.screen {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Login => self.handle_login_key(key, tx),
            Screen::ClientHome => self.handle_client_home_key(key, tx),
            Screen::ClientChat => self.handle_client_chat_key(key, tx),
            Screen::Agent(tab) => self.handle_agent_key(tab, key, tx),
            Screen::Admin(tab) => self.handle_admin_key(tab, key, tx),
        }
    }

    /// Routes the signed-in user to their console and loads its first screen.
    pub fn enter_console(&mut self, tx: UnboundedSender<Event>) {
        self.input_mode = InputMode::Normal;
        match self.console() {
            Some(Console::Client) => self.screen = Screen::ClientHome,
            Some(Console::Agent) => self.enter_agent_tab(AgentTab::Conversations, tx),
            Some(Console::Admin) => self.enter_admin_tab(AdminTab::Dashboard, tx),
            None => self.screen = Screen::Login,
        }
    }

    /// Forgets the stored session and resets every screen.
    pub fn sign_out(&mut self) {
        if let Err(e) = self.session_store.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        if let Some(user) = &self.user {
            tracing::info!(user = %user.email, "signed out");
        }

        let mut client = self.client.clone();
        client.clear_token();
        let session = self.session + 1;
        *self = App::new(client, self.session_store.clone(), None);
        self.session = session;
        self.screen = Screen::Login;
    }

    pub(crate) fn fetch_conversation(&mut self, ticket_id: i64, tx: UnboundedSender<Event>) {
        use crate::api::TicketsApi;

        self.conversation.requested = Some(ticket_id);
        self.conversation.loading = true;
        self.conversation.error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.fetch_conversation(ticket_id).await },
            move |result| Event::ConversationFetched(ticket_id, result),
        );
    }

    fn on_tickets_fetched(&mut self, result: Result<Vec<Ticket>, String>) {
        self.tickets_loading = false;
        match result {
            Ok(mut tickets) => {
                // Most recent first; undated tickets at the bottom.
                tickets.sort_by(|a, b| {
                    let da = a.date.as_deref().and_then(parse_timestamp);
                    let db = b.date.as_deref().and_then(parse_timestamp);
                    db.cmp(&da)
                });
                self.tickets = tickets;
                self.tickets_error = None;
                clamp_selection(&mut self.tickets_state, self.tickets.len());
            }
            Err(e) => self.tickets_error = Some(e),
        }
    }

    fn on_conversation_fetched(
        &mut self,
        ticket_id: i64,
        result: Result<(Ticket, Vec<crate::api::types::Followup>), String>,
    ) {
        if self.conversation.requested != Some(ticket_id) {
            return;
        }
        self.conversation.loading = false;
        match result {
            Ok((ticket, followups)) => {
                self.conversation.messages = build_conversation(&ticket, &followups);
                self.conversation.ticket = Some(ticket);
                self.conversation.error = None;
                self.conversation.scroll = 0;
            }
            Err(e) => {
                self.conversation.error = Some(e.clone());
                self.show_alert("Error", e);
            }
        }
    }
}

/// Runs a request on its own task and reports the outcome on the event
/// channel, tagged with `session`. A 401 becomes [`Event::SessionExpired`]
/// instead of a result.
pub(crate) fn spawn_request<T, Fut, F>(
    tx: UnboundedSender<Event>,
    session: u64,
    request: Fut,
    wrap: F,
) where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    F: FnOnce(Result<T, String>) -> Event + Send + 'static,
{
    tokio::spawn(async move {
        let event = match request.await {
            Err(e) if e.is_unauthorized() => Event::SessionExpired,
            result => wrap(result.map_err(|e| {
                tracing::warn!(error = %e, "request failed");
                e.user_message()
            })),
        };
        // Receiver gone means the app is shutting down.
        let _ = tx.send(Event::Response(session, Box::new(event)));
    });
}

pub(crate) fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    })
}

pub(crate) fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}

/// Keeps a table selection valid after its rows were replaced.
pub(crate) fn clamp_selection(state: &mut TableState, len: usize) {
    let selected = match state.selected() {
        _ if len == 0 => None,
        Some(i) if i < len => Some(i),
        Some(_) => Some(len - 1),
        None => Some(0),
    };
    state.select(selected);
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::api::types::{Role, TicketStatus, UserStatus};
    use crate::config::ApiConfig;
    use std::time::Duration;
    use tokio::sync::mpsc;

    pub fn client() -> HelpdeskClient {
        HelpdeskClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    pub fn store() -> SessionStore {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        SessionStore::new(std::env::temp_dir().join(format!(
            "helpdesk_app_test_{}_{}.json",
            std::process::id(),
            n
        )))
    }

    pub fn user(role: Role) -> User {
        User {
            id: 1,
            name: "Marie Dupont".to_string(),
            email: "marie@cms.sn".to_string(),
            role,
            status: UserStatus::Active,
        }
    }

    pub fn ticket(id: i64, date: &str) -> Ticket {
        Ticket {
            id,
            name: format!("Ticket {id}"),
            status: TicketStatus::New,
            date: Some(date.to_string()),
            requester_email: None,
            content: format!("CLIENT_MSG::Problem {id}"),
        }
    }

    pub fn signed_in(role: Role) -> App {
        App::new(
            client(),
            store(),
            Some(Session {
                token: "tok".to_string(),
                user: user(role),
            }),
        )
    }

    pub fn channel() -> (UnboundedSender<Event>, mpsc::UnboundedReceiver<Event>) {
        mpsc::unbounded_channel()
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn type_text(app: &mut App, text: &str, tx: &UnboundedSender<Event>) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)), tx.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::api::UsersApi;
    use crate::api::types::{LoginResponse, Role};
    use crate::config::ApiConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn index_helpers_wrap() {
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(prev_index(Some(0), 3), Some(2));
        assert_eq!(prev_index(Some(1), 3), Some(0));
        assert_eq!(next_index(Some(0), 0), None);
    }

    #[test]
    fn clamp_keeps_selection_in_range() {
        let mut state = TableState::default();
        state.select(Some(5));
        clamp_selection(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
        clamp_selection(&mut state, 0);
        assert_eq!(state.selected(), None);
        clamp_selection(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }

    #[tokio::test]
    async fn restored_client_session_lands_on_home() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        app.start(tx);
        assert_eq!(app.screen, Screen::ClientHome);
        assert!(app.client.is_authenticated());
    }

    #[tokio::test]
    async fn restored_admin_session_lands_on_dashboard() {
        let mut app = signed_in(Role::Superadmin);
        let (tx, _rx) = channel();
        app.start(tx);
        assert_eq!(app.screen, Screen::Admin(AdminTab::Dashboard));
    }

    #[tokio::test]
    async fn alert_swallows_keys_until_dismissed() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        app.start(tx.clone());
        app.show_alert("Error", "boom");

        app.handle_key_event(key(KeyCode::Char('q')), tx.clone());
        assert!(!app.should_quit);
        assert!(app.alert.is_some());

        app.handle_key_event(key(KeyCode::Enter), tx);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn session_expiry_signs_out_and_warns() {
        let mut app = signed_in(Role::AgentSupport);
        let (tx, _rx) = channel();
        app.start(tx.clone());

        app.handle_event(Event::SessionExpired, tx);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.user.is_none());
        assert!(!app.client.is_authenticated());
        assert_eq!(app.alert.as_ref().unwrap().title, "Session expired");
    }

    #[tokio::test]
    async fn results_after_sign_out_are_dropped() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        app.sign_out();

        app.handle_event(
            Event::TicketsFetched(Ok(vec![ticket(1, "2025-07-09 10:00:00")])),
            tx,
        );
        assert!(app.tickets.is_empty());
    }

    #[tokio::test]
    async fn tickets_are_listed_newest_first() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        app.handle_event(
            Event::TicketsFetched(Ok(vec![
                ticket(1, "2025-07-08 10:00:00"),
                ticket(2, "2025-07-09 10:00:00"),
                ticket(3, "not a date"),
            ])),
            tx,
        );
        let ids: Vec<i64> = app.tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, [2, 1, 3]);
        assert_eq!(app.tickets_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn stale_conversation_results_are_ignored() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        app.conversation.requested = Some(2);

        app.handle_event(
            Event::ConversationFetched(1, Ok((ticket(1, "2025-07-09 10:00:00"), vec![]))),
            tx.clone(),
        );
        assert!(app.conversation.ticket.is_none());

        app.handle_event(
            Event::ConversationFetched(2, Ok((ticket(2, "2025-07-09 10:00:00"), vec![]))),
            tx,
        );
        assert_eq!(app.conversation.open_ticket_id(), Some(2));
        assert_eq!(app.conversation.messages.len(), 1);
        assert_eq!(app.conversation.messages[0].text, "Problem 2");
    }

    #[tokio::test]
    async fn earlier_session_cannot_touch_the_next_one() {
        let mut app = signed_in(Role::Admin);
        let (tx, _rx) = channel();
        app.start(tx.clone());
        let admin_session = app.session;

        app.sign_out();
        app.handle_event(
            Event::LoggedIn(Ok(LoginResponse {
                access_token: "client-token".to_string(),
                token_type: Some("bearer".to_string()),
                user: user(Role::Client),
            })),
            tx.clone(),
        );
        assert_eq!(app.screen, Screen::ClientHome);
        assert_ne!(app.session, admin_session);

        app.handle_event(
            Event::Response(admin_session, Box::new(Event::SessionExpired)),
            tx.clone(),
        );
        app.handle_event(
            Event::Response(
                admin_session,
                Box::new(Event::UsersFetched(Ok(vec![user(Role::Superadmin)]))),
            ),
            tx,
        );
        assert_eq!(app.screen, Screen::ClientHome);
        assert!(app.user.is_some());
        assert!(app.alert.is_none());
        assert!(app.users.is_empty());
        app.session_store.clear().unwrap();
    }

    #[tokio::test]
    async fn current_session_outcomes_are_applied() {
        let mut app = signed_in(Role::Client);
        let (tx, _rx) = channel();
        let session = app.session;

        app.handle_event(
            Event::Response(
                session,
                Box::new(Event::TicketsFetched(Ok(vec![ticket(1, "2025-07-09 10:00:00")]))),
            ),
            tx.clone(),
        );
        assert_eq!(app.tickets.len(), 1);

        app.handle_event(Event::Response(session, Box::new(Event::SessionExpired)), tx);
        assert!(app.user.is_none());
        assert_eq!(app.screen, Screen::Login);
    }

    fn client_for(server: &MockServer) -> HelpdeskClient {
        let mut client = HelpdeskClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        client.set_token("tok");
        client
    }

    #[tokio::test]
    async fn rejected_token_comes_back_as_session_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Could not validate credentials"})),
            )
            .mount(&server)
            .await;

        let mut app = signed_in(Role::Admin);
        app.client = client_for(&server);
        let (tx, mut rx) = channel();
        let client = app.client.clone();
        spawn_request(
            tx.clone(),
            app.session,
            async move { client.list_users().await },
            Event::UsersFetched,
        );

        let event = rx.recv().await.unwrap();
        match &event {
            Event::Response(session, inner) => {
                assert_eq!(*session, app.session);
                assert!(matches!(**inner, Event::SessionExpired));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        app.handle_event(event, tx);
        assert!(app.user.is_none());
        assert_eq!(app.alert.as_ref().unwrap().title, "Session expired");
    }

    #[tokio::test]
    async fn forbidden_comes_back_as_an_ordinary_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/admin/users/1"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"detail": "Admin privileges required"})),
            )
            .mount(&server)
            .await;

        let mut app = signed_in(Role::Admin);
        app.client = client_for(&server);
        let (tx, mut rx) = channel();
        let client = app.client.clone();
        spawn_request(
            tx.clone(),
            app.session,
            async move { client.delete_user(1).await },
            |result| Event::UserDeleted(1, result),
        );

        let event = rx.recv().await.unwrap();
        match &event {
            Event::Response(_, inner) => match &**inner {
                Event::UserDeleted(1, Err(message)) => {
                    assert_eq!(message, "Access denied: Admin privileges required")
                }
                other => panic!("unexpected outcome: {other:?}"),
            },
            other => panic!("unexpected event: {other:?}"),
        }

        app.handle_event(event, tx);
        assert!(app.user.is_some());
    }

    #[test]
    fn admin_tabs_cycle() {
        assert_eq!(AdminTab::Middleware.next(), AdminTab::Dashboard);
        assert_eq!(AdminTab::Dashboard.prev(), AdminTab::Middleware);
        assert_eq!(AdminTab::Glpi.index(), 2);
    }
}
