//! Authentication error types.

use thiserror::Error;

/// Errors returned by an [`AuthService`](super::AuthService).
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty after trimming.
    #[error("missing required fields")]
    MissingFields,
}
