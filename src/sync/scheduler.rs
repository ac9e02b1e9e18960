use crate::{
    error::{Result, TaskoraError},
    model::Entity,
    store::EntityStore,
};
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Source of server truth for one entity kind.
#[async_trait(?Send)]
pub trait Authority<T> {
    async fn fetch_all(&self) -> Result<Vec<T>>;
}

struct Polling {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Replaces a store slice with freshly fetched server state.
///
/// `refresh` can be called at any time; `start` additionally runs it on a
/// fixed interval from a local task. The periodic task must be spawned
/// inside a `tokio::task::LocalSet`. Stopping only takes effect between
/// ticks: a refresh already in flight still lands in the store.
pub struct ReconciliationScheduler<T: Entity> {
    store: Rc<EntityStore<T>>,
    authority: Rc<dyn Authority<T>>,
    polling: RefCell<Option<Polling>>,
}

impl<T: Entity> ReconciliationScheduler<T> {
    pub fn new(store: Rc<EntityStore<T>>, authority: Rc<dyn Authority<T>>) -> Self {
        Self {
            store,
            authority,
            polling: RefCell::new(None),
        }
    }

    /// Fetch and load. On failure the current slice is left as it was.
    pub async fn refresh(&self) -> Result<usize> {
        reconcile(&self.store, self.authority.as_ref()).await
    }

    /// Begin periodic refreshes; the first one runs immediately.
    ///
    /// Restarting replaces any previous polling task. Background failures are
    /// logged and retried on the next tick.
    pub fn start(&self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(TaskoraError::Validation(
                "Poll interval must be greater than zero".to_string(),
            ));
        }
        self.stop();

        let cancel = CancellationToken::new();
        let store = Rc::clone(&self.store);
        let authority = Rc::clone(&self.authority);
        let token = cancel.clone();

        let handle = tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = reconcile(&store, authority.as_ref()).await {
                            tracing::debug!(error = %err, "Background refresh failed; retrying next tick");
                        }
                    }
                }
            }
            tracing::debug!("Polling task exited");
        });

        tracing::info!(interval_secs = interval.as_secs_f64(), "Started polling");
        *self.polling.borrow_mut() = Some(Polling { cancel, handle });
        Ok(())
    }

    /// Cancel periodic refreshes. Safe to call when not running.
    pub fn stop(&self) {
        if let Some(polling) = self.polling.borrow_mut().take() {
            polling.cancel.cancel();
            tracing::info!("Stopped polling");
        }
    }

    /// Stop and wait for the polling task to exit.
    pub async fn shutdown(&self) {
        let polling = self.polling.borrow_mut().take();
        if let Some(polling) = polling {
            polling.cancel.cancel();
            if let Err(err) = polling.handle.await {
                tracing::warn!(error = %err, "Polling task ended abnormally");
            }
            tracing::info!("Polling shut down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.polling
            .borrow()
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }
}

impl<T: Entity> Drop for ReconciliationScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn reconcile<T: Entity>(store: &EntityStore<T>, authority: &dyn Authority<T>) -> Result<usize> {
    match authority.fetch_all().await {
        Ok(entities) => {
            let count = entities.len();
            store.load(entities);
            tracing::info!(count, "Reconciled with server");
            Ok(count)
        }
        Err(err) => {
            tracing::warn!(error = %err, retained = store.len(), "Refresh failed; keeping current state");
            Err(TaskoraError::refresh_failure(err))
        }
    }
}
