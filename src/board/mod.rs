//! Facades the presentation layer talks to.
//!
//! [`TaskBoard`] and [`NotificationCenter`] each own one entity slice and wire
//! the optimistic controller, the reconciliation scheduler and the remote API
//! together. A `SyncFailure` from any mutation triggers a recovery refresh
//! before the error is handed back.

mod feeds;
mod notifications;
mod tasks;

pub use notifications::NotificationCenter;
pub use tasks::TaskBoard;

use crate::error::{Result, TaskoraError};
use crate::model::Entity;
use crate::sync::ReconciliationScheduler;

/// Turn a mutation outcome into what callers see.
///
/// A vanished target is `Ok(None)`. Sync failures kick off a reconciling fetch;
/// its own failure is logged and the original error is returned.
async fn settle<T: Entity, V>(
    scheduler: &ReconciliationScheduler<T>,
    result: Result<V>,
) -> Result<Option<V>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_silent() => {
            tracing::debug!(error = %err, "Mutation target already gone; nothing to do");
            Ok(None)
        }
        Err(err @ TaskoraError::SyncFailure { .. }) => {
            if let Err(refresh_err) = scheduler.refresh().await {
                tracing::debug!(error = %refresh_err, "Recovery refresh failed");
            }
            Err(err)
        }
        Err(err) => Err(err),
    }
}
