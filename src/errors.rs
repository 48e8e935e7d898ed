//! Failure taxonomy shared by the remote client and the operation controller.

use thiserror::Error;

/// The remote operation a failure belongs to.
///
/// Each kind owns its generic fallback texts, used when the server omits an
/// error message or when the request never produced a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    List,
    Upload,
    Download,
    Delete,
}

impl OperationKind {
    /// Message used when the server reports failure without an `error` field.
    pub fn failure_message(self) -> &'static str {
        match self {
            OperationKind::List => "Failed to fetch files",
            OperationKind::Upload => "Upload failed",
            OperationKind::Download => "Download failed",
            OperationKind::Delete => "Delete failed",
        }
    }

    /// Message substituted for transport and parse failures.
    pub fn network_message(self) -> &'static str {
        match self {
            OperationKind::List => "Network error while fetching files",
            OperationKind::Upload => "Network error while uploading file",
            OperationKind::Download => "Network error while downloading file",
            OperationKind::Delete => "Network error while deleting file",
        }
    }
}

/// A failed user operation. The display text is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),
    /// The remote explicitly reported failure.
    #[error("{0}")]
    Server(String),
    /// The request could not be completed or its response could not be read.
    #[error("{0}")]
    Network(String),
}

impl OperationError {
    /// Server failure with the payload's message, or the operation's fallback.
    pub fn server(kind: OperationKind, message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.trim().is_empty() => OperationError::Server(msg),
            _ => OperationError::Server(kind.failure_message().to_string()),
        }
    }

    /// Network failure with the operation's generic message.
    pub fn network(kind: OperationKind) -> Self {
        OperationError::Network(kind.network_message().to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            OperationError::Validation(msg)
            | OperationError::Server(msg)
            | OperationError::Network(msg) => msg,
        }
    }
}

pub type OperationResult<T> = Result<T, OperationError>;
