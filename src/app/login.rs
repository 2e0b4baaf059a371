use super::{App, Screen};
use crate::api::AuthApi;
use crate::api::types::LoginResponse;
use crate::event::Event;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

impl App {
    pub(crate) fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.screen = Screen::Login,
            _ => {}
        }
    }

    pub(crate) fn handle_login_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        if self.login_pending {
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::Welcome,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_form.toggle_focus()
            }
            KeyCode::Enter => self.submit_login(tx),
            _ => {
                self.login_form.input(&key);
            }
        }
    }

    fn submit_login(&mut self, tx: UnboundedSender<Event>) {
        let Some((email, password)) = self.login_form.credentials() else {
            self.show_alert("Error", "Please fill in all fields.");
            return;
        };

        self.login_pending = true;
        let client = self.client.clone();
        // Not spawn_request: a 401 here means bad credentials, not an expired session.
        tokio::spawn(async move {
            let result = client.login(&email, &password).await.map_err(|e| {
                tracing::warn!(error = %e, "sign-in failed");
                e.user_message()
            });
            let _ = tx.send(Event::LoggedIn(result));
        });
    }

    pub(crate) fn on_logged_in(
        &mut self,
        result: Result<LoginResponse, String>,
        tx: UnboundedSender<Event>,
    ) {
        self.login_pending = false;
        if self.screen != Screen::Login {
            return;
        }

        match result {
            Ok(response) => {
                tracing::info!(user = %response.user.email, role = ?response.user.role, "signed in");
                if let Err(e) = self
                    .session_store
                    .save(&response.access_token, &response.user)
                {
                    tracing::warn!(error = %e, "failed to persist session");
                }
                self.client.set_token(response.access_token);
                self.user = Some(response.user);
                self.session += 1;
                self.login_form = Default::default();
                self.enter_console(tx);
            }
            Err(message) => self.show_alert("Sign-in error", message),
        }
    }
}
