use reqwest::StatusCode;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in")]
    NotAuthenticated,

    #[error("unauthorized")]
    Unauthorized,

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl ApiError {
    /// Maps a non-success response to an error, keeping the server's own
    /// message when the body carries one.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text shown in the alert popup.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotAuthenticated => "You are not signed in.".to_string(),
            ApiError::Unauthorized => "Invalid email or password.".to_string(),
            ApiError::Forbidden(msg) => format!("Access denied: {msg}"),
            ApiError::Status { status, message } if *status >= 500 => {
                format!("The server reported an error ({status}): {message}")
            }
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(_) => {
                "Unable to reach the server. Check your connection.".to_string()
            }
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Io { path, .. } => format!("Cannot read file {}", path.display()),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail),
        // Validation errors come back as a list of {msg, ...} objects.
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .next()
            .map(str::to_string),
        _ => parsed.message.filter(|m| !m.is_empty()),
    }
}
