use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Server returned {status}: {body}")]
    ServerStatus { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}: {body}")]
    ServerStatus { status: u16, body: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A draft field that could not be turned into a write payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ValidationError {
    pub const NOT_A_NUMBER: &'static str = "not a number";
    pub const REQUIRED: &'static str = "required";

    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("Dialog is not open")]
    NotOpen,

    #[error("A submit is already in progress")]
    AlreadySubmitting,

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// A read-only view that failed to load, with the message shown in its place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
    pub message: &'static str,
    #[source]
    pub source: FetchError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to build http client: {0}")]
    Client(String),
}

impl WriteError {
    /// Text shown at the dialog level when a submit or delete fails.
    pub fn user_message(&self) -> String {
        match self {
            WriteError::Validation(e) => format!("Please check the {} field ({})", e.field, e.reason),
            WriteError::ServerStatus { status, .. } if *status == 404 => {
                "The course no longer exists.".to_string()
            }
            WriteError::ServerStatus { .. } => "The server rejected the request.".to_string(),
            WriteError::Network(_) => "Could not reach the server. Please try again.".to_string(),
        }
    }
}

impl FetchError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::ServerStatus { status, .. } => *status >= 500,
            FetchError::Decode(_) => false,
        }
    }
}
