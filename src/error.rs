use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorialError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Editorial not yet published: {id}")]
    NotPublishedYet { id: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No {registry} transformer registered for type '{kind}'")]
    NoTransformer { registry: &'static str, kind: String },

    #[error("Duplicate {registry} transformer for type '{kind}'")]
    DuplicateTransformer { registry: &'static str, kind: String },

    #[error("Circuit open for service '{service}'")]
    CircuitOpen { service: String },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EditorialError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Wiring defects: never swallowed by the aggregator.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::NoTransformer { .. } | Self::DuplicateTransformer { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EditorialError>;
