mod account;
mod notifications;
mod settings;
mod tasks;
mod utils;

pub use account::{handle_login, handle_logout, handle_whoami};
pub use notifications::{
    handle_notifications, handle_read, handle_read_all, handle_snooze, handle_watch,
};
pub use settings::{handle_settings_set, handle_settings_show, handle_telegram_link};
pub use tasks::{AddParams, handle_add, handle_delete, handle_recurring, handle_tasks, handle_toggle};
pub use utils::parse_due;

use crate::api::{HttpApi, RemoteApi};
use crate::config::TaskoraConfig;
use crate::error::TaskoraError;
use crate::session::SessionGate;
use std::rc::Rc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: TaskoraConfig,
    pub session: Rc<SessionGate>,
    pub api: Rc<dyn RemoteApi>,
}

impl CommandContext {
    pub fn new(config: TaskoraConfig, session: SessionGate) -> crate::error::Result<Self> {
        let session = Rc::new(session);
        let api = HttpApi::new(&config.api, Rc::clone(&session))?;
        Ok(Self {
            config,
            session,
            api: Rc::new(api),
        })
    }

    /// Fail early with a hint instead of letting the server answer 401.
    pub fn require_session(&self) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!("Not logged in. Run `taskora login <email>` first.");
        }
        Ok(())
    }
}

/// Point the user at `login` when the server rejected the stored token,
/// even if the 401 is buried under a sync or refresh failure.
pub fn with_login_hint(err: anyhow::Error) -> anyhow::Error {
    let rejected = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<TaskoraError>())
        .any(TaskoraError::is_auth_required);
    if rejected {
        err.context("Session was rejected by the server. Run `taskora login <email>` to sign in again.")
    } else {
        err
    }
}
