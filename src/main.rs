use anyhow::Result;
use helpdesk_tui::api::HelpdeskClient;
use helpdesk_tui::app::App;
use helpdesk_tui::config::Config;
use helpdesk_tui::event::EventHandler;
use helpdesk_tui::session::SessionStore;
use helpdesk_tui::{logging, tui};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e:#}");
        std::process::exit(1);
    });

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!(api = %config.api.base_url, "starting helpdesk client");

    // Restore a previous session, if any
    let session_store = SessionStore::new(&config.session_file);
    let session = session_store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable session file");
        None
    });

    let client = HelpdeskClient::new(&config.api)?;

    // Setup terminal
    let mut terminal = tui::init()?;
    tui::install_panic_hook();

    let mut app = App::new(client, session_store, session);
    let mut events = EventHandler::new(Duration::from_millis(250));

    let res = app.run(&mut terminal, &mut events).await;

    // Restore terminal
    tui::restore()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("{err:?}");
    }
    tracing::info!("exiting");

    Ok(())
}
