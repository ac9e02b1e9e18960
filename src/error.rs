use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskoraError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Failed to sync {id}: {source}")]
    SyncFailure {
        id: String,
        #[source]
        source: Box<TaskoraError>,
    },

    #[error("Authentication required (HTTP 401)")]
    AuthRequired,

    #[error("Failed to refresh: {0}")]
    RefreshFailure(#[source] Box<TaskoraError>),

    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TaskoraError {
    pub fn sync_failure(id: impl Into<String>, source: TaskoraError) -> Self {
        TaskoraError::SyncFailure {
            id: id.into(),
            source: Box::new(source),
        }
    }

    pub fn refresh_failure(source: TaskoraError) -> Self {
        TaskoraError::RefreshFailure(Box::new(source))
    }

    /// Errors the presentation layer should not show to the user.
    ///
    /// A mutation whose target already left the store is abandoned quietly:
    /// from the user's point of view the entity is gone anyway.
    pub fn is_silent(&self) -> bool {
        matches!(self, TaskoraError::NotFound(_))
    }

    /// True for a 401, whether surfaced directly or wrapped by a failed mutation or refresh.
    pub fn is_auth_required(&self) -> bool {
        match self {
            TaskoraError::AuthRequired => true,
            TaskoraError::SyncFailure { source, .. } => source.is_auth_required(),
            TaskoraError::RefreshFailure(source) => source.is_auth_required(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskoraError>;
