use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider returned no content")]
    EmptyResponse,
    #[error("publish error: {0}")]
    Publish(String),
}

/// Failure from the commit-hosting API, classified at the point the
/// response is received rather than reconstructed from message text.
#[derive(Debug, Error)]
#[error("commit host error: {message}")]
pub struct HostError {
    pub kind: HostErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    /// Rate limit exceeded or token rejected (401/403/429).
    RateLimitedOrUnauthorized,
    /// Repository or commit not found, or access denied via 404.
    NotFound,
    /// Any other non-2xx response.
    Upstream,
    /// Transport-level failure before a status was available.
    Network,
}

impl HostError {
    pub fn from_status(status: u16, message: String) -> Self {
        let kind = match status {
            401 | 403 | 429 => HostErrorKind::RateLimitedOrUnauthorized,
            404 => HostErrorKind::NotFound,
            _ => HostErrorKind::Upstream,
        };
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    pub fn network(message: String) -> Self {
        Self {
            kind: HostErrorKind::Network,
            status: None,
            message,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
