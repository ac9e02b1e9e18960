use super::{Envelope, RemoteApi};
use crate::config::ApiSettings;
use crate::error::{Result, TaskoraError};
use crate::model::{
    LoginGrant, NewRecurringTemplate, NewTask, NotificationPage, RecurringTemplate,
    ReminderDefaults, Task, TaskPatch, TaskView, TelegramLink,
};
use crate::session::SessionGate;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::rc::Rc;
use std::time::Duration;
use url::Url;

/// reqwest-backed [`RemoteApi`].
///
/// Every request reads the token from the shared [`SessionGate`] at send
/// time, so a login or logout is picked up by the next call.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    session: Rc<SessionGate>,
}

impl HttpApi {
    pub fn new(settings: &ApiSettings, session: Rc<SessionGate>) -> Result<Self> {
        // Several clients may be built per process; only the first install counts.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| TaskoraError::Network(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(&settings.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TaskoraError::Config(format!(
                "API URL cannot be used as a base: {}",
                settings.base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TaskoraError::Config(format!("Invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = %method, url = %url, "Sending request");
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "Received response");

        if status == StatusCode::UNAUTHORIZED {
            // Session teardown is the caller's decision.
            tracing::warn!(url = %response.url(), "Unauthorized request");
            return Err(TaskoraError::AuthRequired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskoraError::Http {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(response)
    }

    async fn json<D: DeserializeOwned>(response: Response) -> Result<D> {
        let body = response.text().await.map_err(network_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn data<D: DeserializeOwned>(response: Response) -> Result<D> {
        let envelope: Envelope<D> = Self::json(response).await?;
        Ok(envelope.data)
    }
}

fn network_error(err: reqwest::Error) -> TaskoraError {
    if err.is_timeout() {
        TaskoraError::Network(format!("Request timeout: {}", err))
    } else if err.is_connect() {
        TaskoraError::Network(format!("Connection failed: {}", err))
    } else {
        TaskoraError::Network(format!("Request failed: {}", err))
    }
}

/// Prefer the server's `message` field; fall back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[async_trait(?Send)]
impl RemoteApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant> {
        let request = self
            .request(Method::POST, &["auth", "login"])?
            .json(&json!({ "email": email, "password": password }));
        Self::data(self.send(request).await?).await
    }

    async fn list_tasks(&self, view: TaskView) -> Result<Vec<Task>> {
        let segments: Vec<&str> = view.path().split('/').collect();
        let request = self.request(Method::GET, &segments)?;
        Self::data(self.send(request).await?).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let request = self.request(Method::POST, &["tasks"])?.json(task);
        Self::data(self.send(request).await?).await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let request = self.request(Method::PUT, &["tasks", id])?.json(patch);
        Self::data(self.send(request).await?).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["tasks", id])?;
        self.send(request).await?;
        Ok(())
    }

    async fn create_recurring(&self, template: &NewRecurringTemplate) -> Result<RecurringTemplate> {
        let request = self.request(Method::POST, &["recurring"])?.json(template);
        Self::data(self.send(request).await?).await
    }

    async fn list_notifications(&self) -> Result<NotificationPage> {
        let request = self.request(Method::GET, &["notifications"])?;
        Self::data(self.send(request).await?).await
    }

    async fn set_notification_read(&self, id: &str, read: bool) -> Result<()> {
        let request = self
            .request(Method::PUT, &["notifications", id, "read"])?
            .json(&json!({ "unread": !read }));
        self.send(request).await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<()> {
        let request = self.request(Method::PUT, &["notifications", "read-all"])?;
        self.send(request).await?;
        Ok(())
    }

    async fn snooze_notification(&self, id: &str, duration_minutes: u32) -> Result<()> {
        let request = self
            .request(Method::POST, &["notifications", id, "snooze"])?
            .json(&json!({ "durationMinutes": duration_minutes }));
        self.send(request).await?;
        Ok(())
    }

    async fn reminder_defaults(&self) -> Result<ReminderDefaults> {
        let request = self.request(Method::GET, &["api", "settings", "reminder-defaults"])?;
        Self::json(self.send(request).await?).await
    }

    async fn save_reminder_defaults(&self, defaults: &ReminderDefaults) -> Result<()> {
        let request = self
            .request(Method::PUT, &["api", "settings", "reminder-defaults"])?
            .json(defaults);
        self.send(request).await?;
        Ok(())
    }

    async fn generate_telegram_link(&self) -> Result<String> {
        let request = self.request(Method::POST, &["telegram", "link", "generate"])?;
        let link: TelegramLink = Self::json(self.send(request).await?).await?;
        match link.code {
            Some(code) if link.success => Ok(code),
            _ => Err(TaskoraError::Http {
                status: 200,
                message: "Failed to generate code".to_string(),
            }),
        }
    }
}
