//! Orchestration of the external collaborator over the auth-state cell.

use crate::error::{Error, Result};
use crate::guard::{RouteDecision, RouteGuard};
use crate::menu::{self, NavEntry};
use crate::permission::Permission;
use crate::provider::Provider;
use crate::role::Role;
use crate::session::Session;
use crate::state::{AuthCell, AuthSnapshot, ResolveTicket};
use crate::user::SignUpRequest;

/// Access-control service: owns the collaborator and the single auth-state
/// cell, and exposes the read surface consumed per navigation entry and per
/// view request.
#[derive(Debug)]
pub struct AuthService<P> {
    provider: P,
    cell: AuthCell,
}

impl<P> AuthService<P>
where
    P: Provider,
{
    /// Creates a service in the initial `Loading` state.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cell: AuthCell::new(),
        }
    }

    /// Returns a handle to the auth-state cell.
    ///
    /// Clones share the slot, so guards and adapters can read state without
    /// borrowing the service.
    pub fn cell(&self) -> AuthCell {
        self.cell.clone()
    }

    /// Returns the collaborator.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Queries the provider for an existing session and applies it.
    ///
    /// Called once at startup. A provider failure leaves the state
    /// unauthenticated, never loading forever.
    pub async fn initialize(&self) -> Result<()> {
        match self.provider.current_session().await {
            Ok(session) => self.apply_session(session).await,
            Err(err) => {
                self.cell.session_changed(None);
                Err(Error::Provider(err))
            }
        }
    }

    /// Applies a session-changed notification from the identity provider.
    pub async fn handle_session_change(&self, session: Option<Session>) -> Result<()> {
        self.apply_session(session).await
    }

    /// Exchanges credentials for a session and resolves the profile.
    ///
    /// Credential rejection surfaces as [`Error::Credentials`] carrying the
    /// provider's message. A session without a resolvable profile leaves the
    /// state unauthenticated and returns the resolution error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let session = match self.provider.sign_in(email, password).await {
            Ok(session) => session,
            Err(err) => return Err(Error::Credentials(err.to_string())),
        };

        if let Err(err) = self.provider.record_login(session.user_id()).await {
            tracing::warn!(error = %err, "failed to record last login");
        }

        self.apply_session(Some(session)).await
    }

    /// Creates a new account via the provider.
    ///
    /// Does not establish a session; the new user signs in separately.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<()> {
        self.provider
            .sign_up(request)
            .await
            .map_err(|err| Error::Registration(err.to_string()))
    }

    /// Signs out: clears the provider session and the local state.
    ///
    /// The local cell is cleared even when the provider call fails, so no
    /// stale permissions remain observable.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.provider.sign_out().await;
        self.cell.clear();
        result.map_err(Error::from)
    }

    /// Re-resolves the current user's profile without leaving the
    /// authenticated state.
    ///
    /// No-op when not authenticated.
    pub async fn refresh_user(&self) -> Result<()> {
        match self.cell.refresh_ticket() {
            Some(ticket) => self.resolve_profile(ticket).await,
            None => Ok(()),
        }
    }

    async fn apply_session(&self, session: Option<Session>) -> Result<()> {
        match self.cell.session_changed(session) {
            Some(ticket) => self.resolve_profile(ticket).await,
            None => Ok(()),
        }
    }

    async fn resolve_profile(&self, ticket: ResolveTicket) -> Result<()> {
        let user_id = ticket.user_id().clone();
        match self.provider.resolve_user(&user_id).await {
            Ok(Some(profile)) => {
                self.cell.profile_resolved(ticket, Some(profile));
                Ok(())
            }
            Ok(None) => {
                self.cell.profile_resolved(ticket, None);
                Err(Error::ProfileUnresolved { user: user_id })
            }
            Err(err) => {
                tracing::warn!(user = %user_id, error = %err, "profile resolution failed");
                self.cell.profile_resolved(ticket, None);
                Err(Error::Provider(err))
            }
        }
    }

    /// Returns a consistent point-in-time view of the auth state.
    pub fn state(&self) -> AuthSnapshot {
        self.cell.snapshot()
    }

    /// Returns whether both a session and a resolved user are present.
    pub fn is_authenticated(&self) -> bool {
        self.cell.is_authenticated()
    }

    /// Returns whether the current user's role grants a permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.cell.has_permission(permission)
    }

    /// Returns whether the current user's role is in the given role set.
    pub fn has_role(&self, roles: impl AsRef<[Role]>) -> bool {
        self.cell.has_role(roles)
    }

    /// Filters navigation entries for the current user.
    pub fn visible_entries(&self, entries: &[NavEntry]) -> Vec<NavEntry> {
        let snapshot = self.cell.snapshot();
        menu::visible_entries(entries, snapshot.user())
    }

    /// Resolves a guarded view request against the current auth state.
    pub fn resolve_view(&self, guard: &RouteGuard) -> RouteDecision {
        guard.evaluate(&self.cell.snapshot())
    }
}
