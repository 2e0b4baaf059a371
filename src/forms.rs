//! Editable form state for the sign-in screen and the admin popups.

use crate::api::types::{GlpiConfig, QaPair, Role, User, UserPayload, UserStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies a key press to a text buffer. Returns `true` when the key was
/// consumed as an edit.
pub fn edit_text(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let len = options.len();
    if forward {
        options[(idx + 1) % len]
    } else {
        options[(idx + len - 1) % len]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn input(&mut self, key: &KeyEvent) -> bool {
        match self.focus {
            LoginField::Email => edit_text(&mut self.email, key),
            LoginField::Password => edit_text(&mut self.password, key),
        }
    }

    /// Credentials ready to send, or `None` when a field is empty.
    pub fn credentials(&self) -> Option<(String, String)> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((email.to_string(), self.password.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Password,
    Role,
    Status,
}

#[derive(Debug, Clone)]
pub struct UserForm {
    pub editing_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
    pub focus: UserField,
}

impl UserForm {
    pub fn create() -> Self {
        Self {
            editing_id: None,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Client,
            status: UserStatus::Pending,
            focus: UserField::Name,
        }
    }

    /// Pre-filled from an existing user. The password always starts empty.
    /// A role the server sent but this client does not know starts as
    /// `Client`, so saving never writes it back.
    pub fn edit(user: &User) -> Self {
        let role = if Role::ASSIGNABLE.contains(&user.role) {
            user.role
        } else {
            Role::ASSIGNABLE[0]
        };
        Self {
            editing_id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role,
            status: user.status,
            focus: UserField::Name,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Status is only editable on existing users; new accounts start pending.
    pub fn fields(&self) -> Vec<UserField> {
        let mut fields = vec![
            UserField::Name,
            UserField::Email,
            UserField::Password,
            UserField::Role,
        ];
        if self.is_editing() {
            fields.push(UserField::Status);
        }
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        self.focus = cycle(&fields, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        self.focus = cycle(&fields, self.focus, false);
    }

    pub fn input(&mut self, key: &KeyEvent) -> bool {
        match self.focus {
            UserField::Name => edit_text(&mut self.name, key),
            UserField::Email => edit_text(&mut self.email, key),
            UserField::Password => edit_text(&mut self.password, key),
            UserField::Role => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.role = cycle(&Role::ASSIGNABLE, self.role, true);
                    true
                }
                KeyCode::Left => {
                    self.role = cycle(&Role::ASSIGNABLE, self.role, false);
                    true
                }
                _ => false,
            },
            UserField::Status => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.status = cycle(&UserStatus::ALL, self.status, true);
                    true
                }
                KeyCode::Left => {
                    self.status = cycle(&UserStatus::ALL, self.status, false);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else if !self.is_editing() && self.password.is_empty() {
            Some("password")
        } else {
            None
        }
    }

    pub fn payload(&self) -> UserPayload {
        let password = if self.password.is_empty() {
            None
        } else {
            Some(self.password.clone())
        };
        UserPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password,
            role: self.role,
            status: self.is_editing().then_some(self.status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlpiField {
    #[default]
    ApiUrl,
    AppToken,
    UserToken,
}

impl GlpiField {
    pub const ALL: [GlpiField; 3] = [GlpiField::ApiUrl, GlpiField::AppToken, GlpiField::UserToken];
}

#[derive(Debug, Clone)]
pub struct GlpiForm {
    pub api_url: String,
    pub app_token: String,
    pub user_token: String,
    pub focus: GlpiField,
}

impl Default for GlpiForm {
    fn default() -> Self {
        Self::from_config(&GlpiConfig::default())
    }
}

impl GlpiForm {
    /// Tokens are never shown back; the form starts with them empty.
    pub fn from_config(config: &GlpiConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            app_token: String::new(),
            user_token: String::new(),
            focus: GlpiField::ApiUrl,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(&GlpiField::ALL, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle(&GlpiField::ALL, self.focus, false);
    }

    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            GlpiField::ApiUrl => &mut self.api_url,
            GlpiField::AppToken => &mut self.app_token,
            GlpiField::UserToken => &mut self.user_token,
        }
    }

    pub fn to_config(&self) -> GlpiConfig {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        GlpiConfig {
            api_url: self.api_url.trim().to_string(),
            app_token: non_empty(&self.app_token),
            user_token: non_empty(&self.user_token),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnowledgeField {
    #[default]
    Question,
    Answer,
    UploadPath,
}

impl KnowledgeField {
    pub const ALL: [KnowledgeField; 3] = [
        KnowledgeField::Question,
        KnowledgeField::Answer,
        KnowledgeField::UploadPath,
    ];
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeForm {
    pub question: String,
    pub answer: String,
    pub upload_path: String,
    pub focus: KnowledgeField,
}

impl KnowledgeForm {
    pub fn focus_next(&mut self) {
        self.focus = cycle(&KnowledgeField::ALL, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle(&KnowledgeField::ALL, self.focus, false);
    }

    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            KnowledgeField::Question => &mut self.question,
            KnowledgeField::Answer => &mut self.answer,
            KnowledgeField::UploadPath => &mut self.upload_path,
        }
    }

    pub fn qa_pair(&self) -> Option<QaPair> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(QaPair {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }

    pub fn clear_qa(&mut self) {
        self.question.clear();
        self.answer.clear();
    }
}
