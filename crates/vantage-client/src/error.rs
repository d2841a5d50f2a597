//! Error types for service calls
//!
//! A call fails in one of four ways, reported by [`ClientError::kind`]:
//! the server could not be reached or answered garbage (transport), the
//! server answered with a failure envelope (domain), the arguments were
//! rejected before sending (validation), or a newer request superseded this
//! one (stale).

use vantage_api::{ExceptionKind, ExceptionView};
use vantage_common::{VantageError, error};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// Failure envelope; `message` is meant to be shown to the user as-is
    #[error("{message}")]
    Domain { code: i32, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stale response: request {ticket} superseded by {latest}")]
    Stale { ticket: u64, latest: u64 },
}

/// Coarse classification of a [`ClientError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Domain,
    Validation,
    Stale,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_)
            | ClientError::Http { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Serialization(_) => ErrorKind::Transport,
            ClientError::Domain { .. } => ErrorKind::Domain,
            ClientError::InvalidArgument(_) => ErrorKind::Validation,
            ClientError::Stale { .. } => ErrorKind::Stale,
        }
    }

    /// Domain error code, if the server answered with a failure envelope
    pub fn code(&self) -> Option<i32> {
        match self {
            ClientError::Domain { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Domain { code, .. }
                if *code == error::RESOURCE_NOT_FOUND.code || *code == 404
        )
    }

    pub fn is_forbidden(&self) -> bool {
        match self {
            ClientError::Domain { code, .. } => {
                *code == error::ACCESS_DENIED.code
                    || *code == error::UNAUTHORIZED.code
                    || *code == 401
                    || *code == 403
            }
            ClientError::Http { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, ClientError::Stale { .. })
    }

    /// Exception screen to show for this error
    ///
    /// `None` means the error belongs inline next to the control that caused
    /// it (validation failures, ordinary domain messages) or should be
    /// dropped silently (stale responses).
    pub fn exception_view(&self) -> Option<ExceptionView> {
        if self.is_not_found() {
            let message = self.to_string();
            return Some(ExceptionKind::NotFound.view().with_description(message));
        }
        if self.is_forbidden() {
            return Some(ExceptionKind::Forbidden.view());
        }

        match self.kind() {
            ErrorKind::Transport => Some(ExceptionKind::ServerError.view()),
            ErrorKind::Domain | ErrorKind::Validation | ErrorKind::Stale => None,
        }
    }
}

impl From<VantageError> for ClientError {
    fn from(value: VantageError) -> Self {
        match value {
            VantageError::IllegalArgument(message) => ClientError::InvalidArgument(message),
            VantageError::ContractViolation(message) => ClientError::InvalidResponse(message),
            VantageError::ApiError { code, message } => ClientError::Domain { code, message },
        }
    }
}
