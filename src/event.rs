use crate::api::types::{
    AgentStats, Document, Followup, GlpiConfig, LoginResponse, MiddlewareConfig, Ticket,
    TicketSummary, User,
};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Everything the UI loop reacts to: terminal input and the outcome of
/// background requests. Request failures travel as user-facing text.
#[derive(Clone, Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),

    /// An authenticated call was rejected with 401: the stored token is stale.
    SessionExpired,
    /// Outcome of a request, tagged with the session that started it.
    Response(u64, Box<Event>),

    LoggedIn(Result<LoginResponse, String>),

    TicketsFetched(Result<Vec<Ticket>, String>),
    ConversationFetched(i64, Result<(Ticket, Vec<Followup>), String>), // (Ticket ID, Result)
    FollowupPosted(i64, Result<Followup, String>),
    TicketCreated(Result<Ticket, String>),

    UsersFetched(Result<Vec<User>, String>),
    UserSaved(Result<User, String>),
    UserDeleted(i64, Result<(), String>),

    DocumentsFetched(Result<Vec<Document>, String>),
    DocumentUploaded(Result<Document, String>),
    DocumentDeleted(i64, Result<(), String>),
    ReindexFinished(Result<(), String>),
    QaPairAdded(Result<(), String>),

    MiddlewareFetched(Result<MiddlewareConfig, String>),
    MiddlewareSaved(Result<MiddlewareConfig, String>),
    GlpiFetched(Result<GlpiConfig, String>),
    GlpiSaved(Result<(), String>),

    StatsFetched(Result<AgentStats, String>),
    SummaryFetched(i64, Result<TicketSummary, String>),
}

#[derive(Debug)]
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: std::time::Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task_tx = tx.clone();
        let _task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                let tick_delay = interval.tick();
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                    _ = tick_delay => Some(Event::Tick),
                    Some(Ok(evt)) = crossterm_event => match evt {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                        _ => None,
                    },
                };
                if let Some(event) = event {
                    // Receiver gone means the app is shutting down.
                    if task_tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });
        Self { tx, rx, _task }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Unable to get event"))
    }
}
