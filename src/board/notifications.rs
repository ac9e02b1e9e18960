use super::feeds::NotificationFeed;
use super::settle;
use crate::api::RemoteApi;
use crate::error::Result;
use crate::model::Notification;
use crate::store::EntityStore;
use crate::sync::{OptimisticMutationController, ReconciliationScheduler, UnreadCounter};
use crate::validation::{validate_id, validate_snooze_minutes};
use std::rc::Rc;
use std::time::Duration;

/// The notification slice, its unread count and the polling loop that keeps it fresh.
pub struct NotificationCenter {
    api: Rc<dyn RemoteApi>,
    controller: OptimisticMutationController<Notification>,
    scheduler: ReconciliationScheduler<Notification>,
    counter: Rc<UnreadCounter>,
}

impl NotificationCenter {
    pub fn new(api: Rc<dyn RemoteApi>) -> Self {
        let store = Rc::new(EntityStore::new());
        let feed = Rc::new(NotificationFeed::new(Rc::clone(&api)));
        Self {
            controller: OptimisticMutationController::new(Rc::clone(&store)),
            counter: Rc::new(UnreadCounter::new(Rc::clone(&store))),
            scheduler: ReconciliationScheduler::new(store, feed),
            api,
        }
    }

    pub fn store(&self) -> &Rc<EntityStore<Notification>> {
        self.controller.store()
    }

    pub fn counter(&self) -> &Rc<UnreadCounter> {
        &self.counter
    }

    pub fn unread_count(&self) -> usize {
        self.counter.value()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.store().snapshot()
    }

    pub async fn refresh(&self) -> Result<usize> {
        self.scheduler.refresh().await
    }

    /// Poll every `interval`, starting now. Needs a running `LocalSet`.
    pub fn start_polling(&self, interval: Duration) -> Result<()> {
        self.scheduler.start(interval)
    }

    pub fn stop_polling(&self) {
        self.scheduler.stop();
    }

    pub fn is_polling(&self) -> bool {
        self.scheduler.is_running()
    }

    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }

    /// Flip the read flag of one notification.
    pub async fn toggle_read(&self, id: &str) -> Result<Option<Notification>> {
        validate_id(id)?;
        let api = Rc::clone(&self.api);
        let result = self
            .controller
            .apply(
                id,
                |n| n.clone().with_read(!n.read),
                move |next| async move { api.set_notification_read(&next.id, next.read).await },
            )
            .await;
        settle(&self.scheduler, result).await
    }

    /// Mark everything read. Returns how many loaded notifications changed.
    pub async fn mark_all_read(&self) -> Result<usize> {
        let api = Rc::clone(&self.api);
        let result = self
            .controller
            .apply_all(
                |n| n.clone().with_read(true),
                move || async move { api.mark_all_read().await },
            )
            .await;
        Ok(settle(&self.scheduler, result).await?.unwrap_or(0))
    }

    /// Hide a notification for `minutes`. Returns false if it was not loaded.
    pub async fn snooze(&self, id: &str, minutes: u32) -> Result<bool> {
        validate_id(id)?;
        validate_snooze_minutes(minutes)?;
        let api = Rc::clone(&self.api);
        let target = id.to_string();
        let result = self
            .controller
            .remove(id, move || async move {
                api.snooze_notification(&target, minutes).await
            })
            .await;
        let snoozed = settle(&self.scheduler, result).await?.is_some();
        if snoozed {
            tracing::info!(id = %id, minutes, "Snoozed notification");
        }
        Ok(snoozed)
    }
}
