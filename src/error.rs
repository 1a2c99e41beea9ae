//! Error type shared by every Foreman operation.

use thiserror::Error;

/// Everything that can go wrong between building a request and handing a typed
/// entity back to the caller.
#[derive(Debug, Error)]
pub enum ForemanError {
    /// The request could not be built (bad path, missing id, ...).
    #[error("invalid request: {0}")]
    Request(String),

    /// The request never got an HTTP answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {method} {path}: {body}")]
    Status {
        status: u16,
        method: String,
        path: String,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response at '{path}': {message}")]
    Decode { path: String, message: String },

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server accepted the call but reported that it did not succeed.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// A host command value that is neither a power nor a boot command.
    #[error("invalid host command: {0}")]
    InvalidCommand(String),

    /// A lookup expected exactly one match and got none.
    #[error("no {kind} found matching {search}")]
    NotFound { kind: &'static str, search: String },

    /// A lookup expected exactly one match and got several.
    #[error("{count} {kind} results matching {search} ({names}), expected exactly one")]
    Ambiguous {
        kind: &'static str,
        search: String,
        count: u64,
        names: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ForemanError {
    /// Network failures and server-side (5xx) errors may succeed on a later attempt.
    /// Client errors, decode failures and everything else fail fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            ForemanError::Transport(_) => true,
            ForemanError::Status { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ForemanError>;
