use crate::api::RemoteApi;
use crate::error::Result;
use crate::model::{Notification, Task, TaskView};
use crate::sync::Authority;
use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;

/// Task list for whichever view is active.
pub(super) struct TaskFeed {
    api: Rc<dyn RemoteApi>,
    view: Cell<TaskView>,
}

impl TaskFeed {
    pub(super) fn new(api: Rc<dyn RemoteApi>) -> Self {
        Self {
            api,
            view: Cell::new(TaskView::default()),
        }
    }

    pub(super) fn view(&self) -> TaskView {
        self.view.get()
    }

    pub(super) fn set_view(&self, view: TaskView) {
        self.view.set(view);
    }
}

#[async_trait(?Send)]
impl Authority<Task> for TaskFeed {
    async fn fetch_all(&self) -> Result<Vec<Task>> {
        self.api.list_tasks(self.view.get()).await
    }
}

pub(super) struct NotificationFeed {
    api: Rc<dyn RemoteApi>,
}

impl NotificationFeed {
    pub(super) fn new(api: Rc<dyn RemoteApi>) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl Authority<Notification> for NotificationFeed {
    async fn fetch_all(&self) -> Result<Vec<Notification>> {
        let page = self.api.list_notifications().await?;
        if let Some(total) = page.total_count {
            tracing::debug!(total, fetched = page.notifications.len(), "Fetched notifications");
        }
        Ok(page.notifications)
    }
}
