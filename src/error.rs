use crate::types::UserId;
use thiserror::Error;

/// Collaborator-layer error type.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Identity/profile collaborator error wrapper.
    #[error("provider error: {0}")]
    Provider(#[source] ProviderError),
    /// Sign-in rejected by the identity provider.
    #[error("sign in rejected: {0}")]
    Credentials(String),
    /// Sign-up rejected by the identity provider.
    #[error("sign up rejected: {0}")]
    Registration(String),
    /// A session exists but its profile could not be resolved.
    #[error("profile not found for user {user}")]
    ProfileUnresolved {
        /// User id the session referred to.
        user: UserId,
    },
    /// Invalid identifier input.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Unknown role storage string.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// Unknown permission storage string.
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}

impl From<ProviderError> for Error {
    fn from(error: ProviderError) -> Self {
        Self::Provider(error)
    }
}
