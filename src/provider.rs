use crate::error::ProviderError;
use crate::session::Session;
use crate::types::UserId;
use crate::user::{SignUpRequest, UserProfile};
use async_trait::async_trait;

/// Identity side of the external collaborator: session lifecycle and
/// account creation.
///
/// Errors are opaque to the core; their `Display` output is the
/// human-readable message surfaced to callers.
#[async_trait]
pub trait IdentityProvider {
    /// Returns the currently established session, if any.
    ///
    /// Queried once at startup; later changes arrive as notifications via
    /// [`crate::AuthService::handle_session_change`].
    async fn current_session(&self) -> std::result::Result<Option<Session>, ProviderError>;

    /// Exchanges credentials for a session.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Session, ProviderError>;

    /// Creates a new account with an explicit role.
    async fn sign_up(&self, request: SignUpRequest) -> std::result::Result<(), ProviderError>;

    /// Clears the provider-held session.
    async fn sign_out(&self) -> std::result::Result<(), ProviderError>;
}

/// Profile side of the external collaborator: the key-value user store.
#[async_trait]
pub trait ProfileStore {
    /// Resolves a user profile by id; `None` when the store has no record.
    async fn resolve_user(
        &self,
        id: &UserId,
    ) -> std::result::Result<Option<UserProfile>, ProviderError>;

    /// Records a successful sign-in on the profile.
    async fn record_login(&self, id: &UserId) -> std::result::Result<(), ProviderError>;
}

/// Composite collaborator trait.
pub trait Provider: IdentityProvider + ProfileStore + Send + Sync {}

impl<T> Provider for T where T: IdentityProvider + ProfileStore + Send + Sync {}
