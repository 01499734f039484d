//! Error types for the deck engine
//!
//! Pipeline-level failures abort a load; per-project resolution failures
//! never surface here (they degrade locally, see
//! [`crate::domains::catalog::resolver`]).

use thiserror::Error;

/// Failures reported by the HTTP transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The platform rejected the credential (401/403)
    #[error("credential rejected with status {status}")]
    Unauthorized { status: u16 },

    /// Any other non-success response
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The transport gave up waiting for a response
    #[error("request timed out")]
    Timeout,

    /// The response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Credential store failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unable to determine data directory")]
    NoDataDir,

    #[error("Failed to read from storage")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write to storage")]
    WriteFailed(#[source] std::io::Error),

    #[error("Corrupted storage data")]
    CorruptedData(#[source] serde_json::Error),
}

/// Main deck error type
#[derive(Debug, Error)]
pub enum DeckError {
    /// Credential rejected; the stored credential has been cleared
    #[error("Invalid Token or Unauthorized.")]
    Unauthorized,

    /// Non-auth failure while fetching the project list
    #[error("Transport error: {0}")]
    Transport(ApiError),

    /// An operation needed a card but the deck is empty
    #[error("No projects in deck")]
    NoProjects,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<ApiError> for DeckError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => DeckError::Unauthorized,
            other => DeckError::Transport(other),
        }
    }
}

impl DeckError {
    /// Message suitable for showing next to the retry affordance.
    pub fn user_message(&self) -> String {
        match self {
            DeckError::Unauthorized => self.to_string(),
            DeckError::Transport(ApiError::Network(_) | ApiError::Timeout) => {
                "Network Error: Ensure your Token is correct and Vercel API is accessible."
                    .to_string()
            }
            DeckError::Transport(ApiError::Status { status, .. }) => {
                format!("Failed to fetch projects (Status: {status})")
            }
            DeckError::Transport(other) => format!("Failed to fetch projects: {other}"),
            DeckError::NoProjects => "No projects found.".to_string(),
            DeckError::Storage(err) => format!("Could not access saved token: {err}"),
            DeckError::Config(msg) => format!("Invalid configuration: {msg}"),
        }
    }
}

/// Result type alias for deck operations
pub type DeckResult<T> = Result<T, DeckError>;
