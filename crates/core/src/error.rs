// Error types shared by services
//
// Services return these typed errors; only the HTTP boundary turns them into
// status codes and response bodies.

use thiserror::Error;

/// Result type alias for Eventhub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a request failed authentication.
/// Both reasons produce the same 401 response; they are kept apart for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// No token in the cookie or the Authorization header.
    MissingCredential,
    /// A token was present but failed verification.
    InvalidCredential,
}

impl std::fmt::Display for UnauthorizedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnauthorizedReason::MissingCredential => write!(f, "missing credential"),
            UnauthorizedReason::InvalidCredential => write!(f, "invalid credential"),
        }
    }
}

/// Errors that can occur while serving a request
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, rejected before any work is done
    #[error("Validation error")]
    Validation(Vec<String>),

    /// Email already registered
    #[error("Email already registered")]
    Conflict,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token signature, format or expiry check failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Request carries no usable credential
    #[error("Unauthorized")]
    Unauthorized(UnauthorizedReason),

    /// Resource missing, or not owned by the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Password hashing failed
    #[error("Password hashing failed")]
    Hashing,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Create a validation error from a single message
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(vec![msg.into()])
    }

    /// Create an unauthorized error for a request without credentials
    pub fn missing_credential() -> Self {
        Error::Unauthorized(UnauthorizedReason::MissingCredential)
    }

    /// Create an unauthorized error for a request whose token failed verification
    pub fn invalid_credential() -> Self {
        Error::Unauthorized(UnauthorizedReason::InvalidCredential)
    }

    /// Whether the error stems from a fault on our side rather than the request
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_) | Error::Hashing)
    }
}
