use super::{AdminTab, App, InputMode, Screen, clamp_selection, next_index, prev_index, spawn_request};
use crate::api::types::{Document, GlpiConfig, MiddlewareConfig, User};
use crate::api::{KnowledgeApi, SettingsApi, UsersApi};
use crate::event::Event;
use crate::forms::{GlpiForm, KnowledgeField, UserForm, edit_text};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Rows of the middleware settings table.
pub const MIDDLEWARE_ROWS: usize = 4;

impl App {
    pub(crate) fn enter_admin_tab(&mut self, tab: AdminTab, tx: UnboundedSender<Event>) {
        self.screen = Screen::Admin(tab);
        self.input_mode = InputMode::Normal;
        self.user_form = None;
        self.pending_delete = None;
        match tab {
            AdminTab::Dashboard => {}
            AdminTab::Users => self.fetch_users(tx),
            AdminTab::Glpi => self.fetch_glpi(tx),
            AdminTab::Knowledge => self.fetch_documents(tx),
            AdminTab::Middleware => self.fetch_middleware(tx),
        }
    }

    pub(crate) fn handle_admin_key(
        &mut self,
        tab: AdminTab,
        key: KeyEvent,
        tx: UnboundedSender<Event>,
    ) {
        if self.user_form.is_some() {
            self.handle_user_form_key(key, tx);
            return;
        }
        if self.pending_delete.is_some() {
            self.handle_delete_confirmation_key(key, tx);
            return;
        }
        if self.input_mode == InputMode::Editing {
            match tab {
                AdminTab::Glpi => self.handle_glpi_edit_key(key, tx),
                AdminTab::Knowledge => self.handle_knowledge_edit_key(key, tx),
                _ => self.input_mode = InputMode::Normal,
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('L') => self.sign_out(),
            KeyCode::Tab => self.enter_admin_tab(tab.next(), tx),
            KeyCode::BackTab => self.enter_admin_tab(tab.prev(), tx),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.enter_admin_tab(AdminTab::ALL[idx], tx);
            }
            _ => match tab {
                AdminTab::Dashboard => self.handle_admin_dashboard_key(key, tx),
                AdminTab::Users => self.handle_users_key(key, tx),
                AdminTab::Glpi => self.handle_glpi_key(key, tx),
                AdminTab::Knowledge => self.handle_knowledge_key(key, tx),
                AdminTab::Middleware => self.handle_middleware_key(key, tx),
            },
        }
    }

    // --- Dashboard ---

    fn handle_admin_dashboard_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        // The dashboard cards link to every section except the dashboard itself.
        let sections = &AdminTab::ALL[1..];
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = next_index(self.admin_menu_state.selected(), sections.len());
                self.admin_menu_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = prev_index(self.admin_menu_state.selected(), sections.len());
                self.admin_menu_state.select(prev);
            }
            KeyCode::Enter => {
                if let Some(tab) = self.admin_menu_state.selected().and_then(|i| sections.get(i)) {
                    self.enter_admin_tab(*tab, tx);
                }
            }
            _ => {}
        }
    }

    // --- Users & roles ---

    fn fetch_users(&mut self, tx: UnboundedSender<Event>) {
        self.users_loading = true;
        self.users_error = None;
        let client = self.client.clone();
        spawn_request(tx, self.session, async move { client.list_users().await }, Event::UsersFetched);
    }

    fn selected_user(&self) -> Option<&User> {
        self.users_state.selected().and_then(|i| self.users.get(i))
    }

    fn handle_users_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = next_index(self.users_state.selected(), self.users.len());
                self.users_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = prev_index(self.users_state.selected(), self.users.len());
                self.users_state.select(prev);
            }
            KeyCode::Char('a') => self.user_form = Some(UserForm::create()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(user) = self.selected_user() {
                    self.user_form = Some(UserForm::edit(user));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.pending_delete = self.selected_user().cloned();
            }
            KeyCode::Char('r') => self.fetch_users(tx),
            _ => {}
        }
    }

    fn handle_user_form_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        let Some(form) = self.user_form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.user_form = None,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Enter => self.submit_user_form(tx),
            _ => {
                form.input(&key);
            }
        }
    }

    fn submit_user_form(&mut self, tx: UnboundedSender<Event>) {
        let Some(form) = self.user_form.as_ref() else {
            return;
        };
        if self.busy {
            return;
        }
        if let Some(field) = form.missing_field() {
            self.show_alert("Error", format!("The {field} field is required."));
            return;
        }

        let payload = form.payload();
        let editing_id = form.editing_id;
        let client = self.client.clone();
        self.busy = true;
        spawn_request(
            tx,
            self.session,
            async move {
                match editing_id {
                    Some(id) => client.update_user(id, &payload).await,
                    None => client.create_user(&payload).await,
                }
            },
            Event::UserSaved,
        );
    }

    fn handle_delete_confirmation_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let Some(user) = self.pending_delete.take() else {
                    return;
                };
                let client = self.client.clone();
                let user_id = user.id;
                self.busy = true;
                spawn_request(
                    tx,
                    self.session,
                    async move { client.delete_user(user_id).await },
                    move |result| Event::UserDeleted(user_id, result),
                );
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.pending_delete = None,
            _ => {}
        }
    }

    pub(crate) fn on_users_fetched(&mut self, result: Result<Vec<User>, String>) {
        self.users_loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.users_error = None;
                clamp_selection(&mut self.users_state, self.users.len());
            }
            Err(e) => self.users_error = Some(e),
        }
    }

    pub(crate) fn on_user_saved(&mut self, result: Result<User, String>, tx: UnboundedSender<Event>) {
        self.busy = false;
        match result {
            Ok(user) => {
                let verb = if self.user_form.as_ref().is_some_and(|f| f.is_editing()) {
                    "updated"
                } else {
                    "created"
                };
                tracing::info!(user_id = user.id, verb, "user saved");
                self.user_form = None;
                self.show_alert("Success", format!("User {} {verb}.", user.name));
                self.fetch_users(tx);
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    pub(crate) fn on_user_deleted(&mut self, user_id: i64, result: Result<(), String>) {
        self.busy = false;
        match result {
            Ok(()) => {
                tracing::info!(user_id, "user deleted");
                self.users.retain(|u| u.id != user_id);
                clamp_selection(&mut self.users_state, self.users.len());
                self.show_alert("Success", "User deleted.");
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    // --- GLPI connection ---

    fn fetch_glpi(&mut self, tx: UnboundedSender<Event>) {
        self.glpi_loading = true;
        let client = self.client.clone();
        spawn_request(tx, self.session, async move { client.get_glpi_config().await }, Event::GlpiFetched);
    }

    fn handle_glpi_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.glpi_form.focus_next(),
            KeyCode::Char('k') | KeyCode::Up => self.glpi_form.focus_prev(),
            KeyCode::Char('e') | KeyCode::Enter => self.input_mode = InputMode::Editing,
            KeyCode::Char('s') => self.save_glpi(tx),
            KeyCode::Char('r') => self.fetch_glpi(tx),
            _ => {}
        }
    }

    fn handle_glpi_edit_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => self.glpi_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.glpi_form.focus_prev(),
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.save_glpi(tx);
            }
            _ => {
                edit_text(self.glpi_form.focused_buffer(), &key);
            }
        }
    }

    fn save_glpi(&mut self, tx: UnboundedSender<Event>) {
        if self.busy {
            return;
        }
        let config = self.glpi_form.to_config();
        if config.api_url.is_empty() {
            self.show_alert("Error", "The GLPI API URL is required.");
            return;
        }
        self.busy = true;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.update_glpi_config(&config).await },
            Event::GlpiSaved,
        );
    }

    pub(crate) fn on_glpi_fetched(&mut self, result: Result<GlpiConfig, String>) {
        self.glpi_loading = false;
        match result {
            Ok(config) => {
                let focus = self.glpi_form.focus;
                self.glpi_form = GlpiForm::from_config(&config);
                self.glpi_form.focus = focus;
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    pub(crate) fn on_glpi_saved(&mut self, result: Result<(), String>) {
        self.busy = false;
        match result {
            Ok(()) => {
                self.glpi_form.app_token.clear();
                self.glpi_form.user_token.clear();
                self.show_alert("Success", "GLPI connection saved.");
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    // --- Knowledge base ---

    fn fetch_documents(&mut self, tx: UnboundedSender<Event>) {
        self.documents_loading = true;
        self.documents_error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.list_documents().await },
            Event::DocumentsFetched,
        );
    }

    fn handle_knowledge_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = next_index(self.documents_state.selected(), self.documents.len());
                self.documents_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = prev_index(self.documents_state.selected(), self.documents.len());
                self.documents_state.select(prev);
            }
            KeyCode::Char('e') => self.input_mode = InputMode::Editing,
            KeyCode::Char('a') => self.add_qa_pair(tx),
            KeyCode::Char('u') => self.upload_document(tx),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_document(tx),
            KeyCode::Char('R') => self.reindex_knowledge(tx),
            KeyCode::Char('r') => self.fetch_documents(tx),
            _ => {}
        }
    }

    fn handle_knowledge_edit_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => self.knowledge_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.knowledge_form.focus_prev(),
            KeyCode::Enter => match self.knowledge_form.focus {
                KnowledgeField::Question => self.knowledge_form.focus_next(),
                KnowledgeField::Answer => {
                    self.input_mode = InputMode::Normal;
                    self.add_qa_pair(tx);
                }
                KnowledgeField::UploadPath => {
                    self.input_mode = InputMode::Normal;
                    self.upload_document(tx);
                }
            },
            _ => {
                edit_text(self.knowledge_form.focused_buffer(), &key);
            }
        }
    }

    fn add_qa_pair(&mut self, tx: UnboundedSender<Event>) {
        let Some(pair) = self.knowledge_form.qa_pair() else {
            self.show_alert("Error", "Enter both a question and an answer.");
            return;
        };
        if self.busy {
            return;
        }
        self.busy = true;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.add_qa_pair(&pair).await },
            Event::QaPairAdded,
        );
    }

    fn upload_document(&mut self, tx: UnboundedSender<Event>) {
        let raw = self.knowledge_form.upload_path.trim();
        if raw.is_empty() {
            self.show_alert("Error", "Enter the path of the file to upload.");
            return;
        }
        if self.busy {
            return;
        }
        let path = PathBuf::from(raw);
        self.busy = true;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.upload_document(&path).await },
            Event::DocumentUploaded,
        );
    }

    fn delete_selected_document(&mut self, tx: UnboundedSender<Event>) {
        let Some(document_id) = self
            .documents_state
            .selected()
            .and_then(|i| self.documents.get(i))
            .map(|d| d.id)
        else {
            return;
        };
        if self.busy {
            return;
        }
        self.busy = true;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.delete_document(document_id).await },
            move |result| Event::DocumentDeleted(document_id, result),
        );
    }

    fn reindex_knowledge(&mut self, tx: UnboundedSender<Event>) {
        if self.busy {
            return;
        }
        self.busy = true;
        let client = self.client.clone();
        spawn_request(tx, self.session, async move { client.reindex().await }, Event::ReindexFinished);
    }

    pub(crate) fn on_documents_fetched(&mut self, result: Result<Vec<Document>, String>) {
        self.documents_loading = false;
        match result {
            Ok(documents) => {
                self.documents = documents;
                self.documents_error = None;
                clamp_selection(&mut self.documents_state, self.documents.len());
            }
            Err(e) => self.documents_error = Some(e),
        }
    }

    pub(crate) fn on_document_uploaded(&mut self, result: Result<Document, String>) {
        self.busy = false;
        match result {
            Ok(document) => {
                tracing::info!(document_id = document.id, "document uploaded");
                self.show_alert("Success", format!("{} uploaded.", document.title));
                self.documents.push(document);
                self.knowledge_form.upload_path.clear();
                clamp_selection(&mut self.documents_state, self.documents.len());
            }
            Err(e) => self.show_alert("Upload failed", e),
        }
    }

    pub(crate) fn on_document_deleted(&mut self, document_id: i64, result: Result<(), String>) {
        self.busy = false;
        match result {
            Ok(()) => {
                self.documents.retain(|d| d.id != document_id);
                clamp_selection(&mut self.documents_state, self.documents.len());
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    pub(crate) fn on_reindex_finished(&mut self, result: Result<(), String>) {
        self.busy = false;
        match result {
            Ok(()) => self.show_alert("Success", "Knowledge base reindexed."),
            Err(e) => self.show_alert("Error", e),
        }
    }

    pub(crate) fn on_qa_pair_added(&mut self, result: Result<(), String>) {
        self.busy = false;
        match result {
            Ok(()) => {
                self.knowledge_form.clear_qa();
                self.show_alert("Success", "Question/answer pair added.");
            }
            Err(e) => self.show_alert("Error", e),
        }
    }

    // --- Middleware ---

    fn fetch_middleware(&mut self, tx: UnboundedSender<Event>) {
        self.middleware_loading = true;
        self.middleware_error = None;
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.get_middleware_config().await },
            Event::MiddlewareFetched,
        );
    }

    fn handle_middleware_key(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = next_index(self.middleware_state.selected(), MIDDLEWARE_ROWS);
                self.middleware_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = prev_index(self.middleware_state.selected(), MIDDLEWARE_ROWS);
                self.middleware_state.select(prev);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_middleware_setting(),
            KeyCode::Char('s') => self.save_middleware(tx),
            KeyCode::Char('r') => self.fetch_middleware(tx),
            _ => {}
        }
    }

    fn toggle_middleware_setting(&mut self) {
        let settings = &mut self.middleware;
        match self.middleware_state.selected() {
            Some(0) => settings.log_level = settings.log_level.next(),
            Some(1) => settings.waf_enabled = !settings.waf_enabled,
            Some(2) => settings.rate_limiting_enabled = !settings.rate_limiting_enabled,
            Some(3) => settings.maintenance_mode = !settings.maintenance_mode,
            _ => {}
        }
    }

    fn save_middleware(&mut self, tx: UnboundedSender<Event>) {
        if self.busy {
            return;
        }
        self.busy = true;
        let config = self.middleware.clone();
        let client = self.client.clone();
        spawn_request(
            tx,
            self.session,
            async move { client.update_middleware_config(&config).await },
            Event::MiddlewareSaved,
        );
    }

    pub(crate) fn on_middleware_fetched(&mut self, result: Result<MiddlewareConfig, String>) {
        self.middleware_loading = false;
        match result {
            Ok(config) => {
                self.middleware = config;
                self.middleware_error = None;
            }
            Err(e) => self.middleware_error = Some(e),
        }
    }

    pub(crate) fn on_middleware_saved(&mut self, result: Result<MiddlewareConfig, String>) {
        self.busy = false;
        match result {
            Ok(config) => {
                tracing::info!(?config, "middleware settings saved");
                self.middleware = config;
                self.show_alert("Success", "Middleware settings saved.");
            }
            Err(e) => self.show_alert("Error", e),
        }
    }
}
