use shared::BookingStatus;
use thiserror::Error;

/// Errors surfaced by the domain services. The REST layer maps each
/// variant to a status code; none of these are retried server-side.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid transition: booking is already {}", from.as_str())]
    InvalidTransition { from: BookingStatus },

    #[error("not authorized to perform this action")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}
