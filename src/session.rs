use crate::api::types::User;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The two entries kept between runs. Both are opaque strings: the user is
/// stored as serialized JSON, exactly as received at sign-in.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    token: Option<String>,
    user: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored session, or `None` when nothing usable is stored.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let entries: StoredEntries = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "session file is corrupt, ignoring it");
                return Ok(None);
            }
        };

        let (Some(token), Some(user_json)) = (entries.token, entries.user) else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(e) => {
                tracing::warn!(error = %e, "stored user entry is unreadable, ignoring session");
                Ok(None)
            }
        }
    }

    pub fn save(&self, token: &str, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let entries = StoredEntries {
            token: Some(token.to_string()),
            user: Some(serde_json::to_string(user).context("Failed to serialize user")?),
        };
        let raw = serde_json::to_string_pretty(&entries).context("Failed to encode session")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}
