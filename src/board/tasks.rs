use super::feeds::TaskFeed;
use super::settle;
use crate::api::RemoteApi;
use crate::error::Result;
use crate::model::{
    NewRecurringTemplate, NewTask, RecurringTemplate, Task, TaskPatch, TaskView, sort_by_priority,
};
use crate::store::EntityStore;
use crate::sync::{Authority, OptimisticMutationController, ReconciliationScheduler};
use crate::validation::{validate_id, validate_new_task, validate_recurring};
use std::rc::Rc;

/// The task slice and every operation that changes it.
pub struct TaskBoard {
    api: Rc<dyn RemoteApi>,
    feed: Rc<TaskFeed>,
    controller: OptimisticMutationController<Task>,
    scheduler: ReconciliationScheduler<Task>,
}

impl TaskBoard {
    pub fn new(api: Rc<dyn RemoteApi>) -> Self {
        let store = Rc::new(EntityStore::new());
        let feed = Rc::new(TaskFeed::new(Rc::clone(&api)));
        let authority: Rc<dyn Authority<Task>> = feed.clone();
        Self {
            controller: OptimisticMutationController::new(Rc::clone(&store)),
            scheduler: ReconciliationScheduler::new(store, authority),
            feed,
            api,
        }
    }

    pub fn store(&self) -> &Rc<EntityStore<Task>> {
        self.controller.store()
    }

    pub fn view(&self) -> TaskView {
        self.feed.view()
    }

    /// Switch to `view` and fetch it. Later refreshes re-read the same view.
    pub async fn load(&self, view: TaskView) -> Result<usize> {
        self.feed.set_view(view);
        tracing::debug!(view = %view, "Loading tasks");
        self.scheduler.refresh().await
    }

    pub async fn refresh(&self) -> Result<usize> {
        self.scheduler.refresh().await
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.store().snapshot()
    }

    /// Tasks ordered HIGH to LOW, then by due date. Does not touch the store.
    pub fn priority_sorted(&self) -> Vec<Task> {
        self.store().with_items(sort_by_priority)
    }

    /// Flip PENDING/COMPLETED. `Ok(None)` if the task is no longer loaded.
    pub async fn toggle_complete(&self, id: &str) -> Result<Option<Task>> {
        validate_id(id)?;
        let api = Rc::clone(&self.api);
        let result = self
            .controller
            .apply(id, Task::toggled, move |next| async move {
                api.update_task(&next.id, &TaskPatch::status(next.status))
                    .await
                    .map(|_| ())
            })
            .await;
        settle(&self.scheduler, result).await
    }

    /// Delete a task. Returns false if it was not loaded.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        validate_id(id)?;
        let api = Rc::clone(&self.api);
        let target = id.to_string();
        let result = self
            .controller
            .remove(id, move || async move { api.delete_task(&target).await })
            .await;
        Ok(settle(&self.scheduler, result).await?.is_some())
    }

    /// Create a task on the server; it shows up locally through the follow-up fetch.
    pub async fn create(&self, task: NewTask) -> Result<Task> {
        validate_new_task(&task)?;
        let created = self
            .controller
            .create(self.api.create_task(&task), || self.scheduler.refresh())
            .await?;
        tracing::info!(id = %created.id, title = %created.title, "Created task");
        Ok(created)
    }

    /// Create a recurring template. Its task instances arrive with the next fetch.
    pub async fn create_recurring(
        &self,
        template: NewRecurringTemplate,
    ) -> Result<RecurringTemplate> {
        validate_recurring(&template)?;
        let created = self
            .controller
            .create(self.api.create_recurring(&template), || {
                self.scheduler.refresh()
            })
            .await?;
        tracing::info!(title = %created.title, recurrence = ?created.recurrence_type, "Created recurring template");
        Ok(created)
    }
}
