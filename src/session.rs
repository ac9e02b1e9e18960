//! Authentication state shared by every remote call.
//!
//! [`SessionGate`] is created once per process and handed to the HTTP client
//! explicitly. Its lifecycle belongs to the caller: `login` and `logout` are
//! the only ways in and out. A 401 from the server never clears it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: String,
}

pub struct SessionGate {
    current: RefCell<Option<Session>>,
    /// Write-through copy so a session survives between CLI invocations.
    file: Option<PathBuf>,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    /// In-memory gate with no session.
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
            file: None,
        }
    }

    /// Gate backed by `path`, restoring any session saved there.
    pub fn with_file(path: &Path) -> Result<Self> {
        let current = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Some(serde_json::from_str::<Session>(&content)?)
        } else {
            None
        };
        Ok(Self {
            current: RefCell::new(current),
            file: Some(path.to_path_buf()),
        })
    }

    pub fn login(&self, token: impl Into<String>, identity: impl Into<String>) -> Result<()> {
        let session = Session {
            token: token.into(),
            identity: identity.into(),
        };
        tracing::info!(identity = %session.identity, "Logged in");
        self.persist(Some(&session))?;
        *self.current.borrow_mut() = Some(session);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.persist(None)?;
        if let Some(previous) = self.current.borrow_mut().take() {
            tracing::info!(identity = %previous.identity, "Logged out");
        }
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn identity(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.identity.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn persist(&self, session: Option<&Session>) -> Result<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        match session {
            Some(session) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, serde_json::to_string_pretty(session)?)?;
                restrict_permissions(path)?;
            }
            None => {
                if path.exists() {
                    std::fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
