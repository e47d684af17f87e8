//! Single-writer auth-state cell.
//!
//! One cell exists per application instance. Writers apply collaborator
//! notifications (session changed, profile resolved, sign-out) as single
//! atomic updates; readers take [`AuthSnapshot`]s and never observe a new
//! session paired with a stale user. A monotonic generation counter discards
//! profile fetches that a newer session superseded.

use crate::permission::Permission;
use crate::registry;
use crate::role::Role;
use crate::session::Session;
use crate::types::UserId;
use crate::user::UserProfile;
use std::sync::{Arc, RwLock};

/// Point-in-time view of the auth state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthSnapshot {
    /// Startup, or a session is established and its profile is still
    /// resolving. Not authenticated.
    Loading,
    /// No session, or profile resolution failed.
    Unauthenticated,
    /// Session and profile both present.
    Authenticated {
        /// Resolved profile.
        user: UserProfile,
        /// The session the profile was resolved for.
        session: Session,
    },
}

impl AuthSnapshot {
    /// Returns whether the state is still resolving.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns whether both a session and a resolved user are present.
    ///
    /// A session whose profile fetch is pending or failed is not
    /// authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the resolved user, if authenticated.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Returns the current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Returns whether the current user's role grants a permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        registry::user_has_permission(self.user(), permission)
    }

    /// Returns whether the current user's role is in the given role set.
    pub fn has_role(&self, roles: impl AsRef<[Role]>) -> bool {
        registry::user_has_role(self.user(), roles)
    }
}

/// Single-use handle for applying one profile fetch result.
///
/// Issued when a fetch starts; captures the generation so results landing
/// after a newer session change are discarded.
#[derive(Debug)]
pub struct ResolveTicket {
    generation: u64,
    user_id: UserId,
}

impl ResolveTicket {
    /// Returns the id of the user to resolve.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[derive(Debug)]
enum SlotState {
    Loading { pending: Option<Session> },
    Unauthenticated,
    Authenticated { user: UserProfile, session: Session },
}

#[derive(Debug)]
struct Slot {
    state: SlotState,
    generation: u64,
}

/// The one in-memory auth-state slot.
///
/// Cheap to clone; clones share the slot. Reads are synchronous,
/// side-effect-free, and may be called freely (e.g. once per navigation
/// entry).
#[derive(Debug, Clone)]
pub struct AuthCell {
    inner: Arc<RwLock<Slot>>,
}

impl AuthCell {
    /// Creates a cell in the initial `Loading` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Slot {
                state: SlotState::Loading { pending: None },
                generation: 0,
            })),
        }
    }

    /// Returns a consistent point-in-time view of the state.
    pub fn snapshot(&self) -> AuthSnapshot {
        let slot = self.inner.read().expect("poisoned lock");
        match &slot.state {
            SlotState::Loading { .. } => AuthSnapshot::Loading,
            SlotState::Unauthenticated => AuthSnapshot::Unauthenticated,
            SlotState::Authenticated { user, session } => AuthSnapshot::Authenticated {
                user: user.clone(),
                session: session.clone(),
            },
        }
    }

    /// Applies a session-changed notification from the identity provider.
    ///
    /// Supersedes any in-flight profile fetch. `None` clears user and
    /// session together; `Some` enters `Loading` and returns the ticket the
    /// profile fetch must present on completion.
    pub fn session_changed(&self, session: Option<Session>) -> Option<ResolveTicket> {
        let mut slot = self.inner.write().expect("poisoned lock");
        slot.generation += 1;
        match session {
            None => {
                slot.state = SlotState::Unauthenticated;
                None
            }
            Some(session) => {
                let user_id = session.user_id().clone();
                slot.state = SlotState::Loading {
                    pending: Some(session),
                };
                Some(ResolveTicket {
                    generation: slot.generation,
                    user_id,
                })
            }
        }
    }

    /// Issues a ticket to re-resolve the profile of the current
    /// authenticated session, without leaving `Authenticated`.
    ///
    /// Returns `None` when not authenticated. The generation is not bumped,
    /// so a session change occurring before the refresh completes discards
    /// the refresh result.
    pub fn refresh_ticket(&self) -> Option<ResolveTicket> {
        let slot = self.inner.read().expect("poisoned lock");
        match &slot.state {
            SlotState::Authenticated { session, .. } => Some(ResolveTicket {
                generation: slot.generation,
                user_id: session.user_id().clone(),
            }),
            _ => None,
        }
    }

    /// Applies a completed profile fetch.
    ///
    /// The result is discarded when the ticket's generation is no longer
    /// current. `None` (not found, or a store error mapped by the caller)
    /// transitions to `Unauthenticated`: no stale profile is retained and no
    /// default role exists. Returns whether the result was applied.
    pub fn profile_resolved(&self, ticket: ResolveTicket, profile: Option<UserProfile>) -> bool {
        let mut slot = self.inner.write().expect("poisoned lock");
        if ticket.generation != slot.generation {
            tracing::debug!(
                user = %ticket.user_id,
                "discarding profile result for superseded session"
            );
            return false;
        }

        let session = match &mut slot.state {
            SlotState::Loading { pending } => pending.take(),
            SlotState::Authenticated { session, .. } => Some(session.clone()),
            SlotState::Unauthenticated => return false,
        };

        match (session, profile) {
            (Some(session), Some(user)) => {
                tracing::debug!(user = %user.id, role = %user.role, "profile resolved");
                slot.state = SlotState::Authenticated { user, session };
                true
            }
            (_, _) => {
                tracing::warn!(user = %ticket.user_id, "profile unresolved, clearing auth state");
                slot.state = SlotState::Unauthenticated;
                true
            }
        }
    }

    /// Applies a sign-out: user and session are cleared in one atomic
    /// update, and in-flight fetches are invalidated.
    pub fn clear(&self) {
        let mut slot = self.inner.write().expect("poisoned lock");
        slot.generation += 1;
        slot.state = SlotState::Unauthenticated;
    }

    /// Returns whether both a session and a resolved user are present.
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    /// Returns whether the current user's role grants a permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.snapshot().has_permission(permission)
    }

    /// Returns whether the current user's role is in the given role set.
    pub fn has_role(&self, roles: impl AsRef<[Role]>) -> bool {
        self.snapshot().has_role(roles)
    }
}

impl Default for AuthCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionToken;
    use chrono::Utc;

    fn session(user: &str) -> Session {
        Session::new(
            UserId::from_string(user.to_string()),
            SessionToken::new(format!("sess-{user}")),
        )
    }

    fn profile(user: &str, role: Role) -> UserProfile {
        UserProfile::new(
            UserId::from_string(user.to_string()),
            format!("{user}@company.com"),
            user.to_string(),
            role,
            Utc::now(),
        )
    }

    #[test]
    fn cell_starts_loading() {
        let cell = AuthCell::new();
        assert!(cell.snapshot().is_loading());
        assert!(!cell.is_authenticated());
    }

    #[test]
    fn session_and_profile_authenticate() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        assert!(cell.snapshot().is_loading());
        assert!(!cell.is_authenticated());

        assert!(cell.profile_resolved(ticket, Some(profile("user_a", Role::Accountant))));
        assert!(cell.is_authenticated());
        assert!(cell.has_role([Role::Accountant]));
    }

    #[test]
    fn absent_session_unauthenticates() {
        let cell = AuthCell::new();
        assert!(cell.session_changed(None).is_none());
        assert_eq!(cell.snapshot(), AuthSnapshot::Unauthenticated);
    }

    #[test]
    fn failed_profile_fetch_fails_closed() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        assert!(cell.profile_resolved(ticket, None));
        assert_eq!(cell.snapshot(), AuthSnapshot::Unauthenticated);
    }

    #[test]
    fn stale_fetch_is_discarded_after_newer_session_resolves() {
        let cell = AuthCell::new();
        let ticket_a = cell.session_changed(Some(session("user_a"))).unwrap();
        let ticket_b = cell.session_changed(Some(session("user_b"))).unwrap();

        assert!(cell.profile_resolved(ticket_b, Some(profile("user_b", Role::Viewer))));
        assert!(!cell.profile_resolved(ticket_a, Some(profile("user_a", Role::SuperAdmin))));

        let snapshot = cell.snapshot();
        assert_eq!(snapshot.user().unwrap().role, Role::Viewer);
        assert_eq!(snapshot.user().unwrap().id.as_str(), "user_b");
    }

    #[test]
    fn fetch_issued_before_clear_is_discarded() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        cell.clear();
        assert!(!cell.profile_resolved(ticket, Some(profile("user_a", Role::Admin))));
        assert_eq!(cell.snapshot(), AuthSnapshot::Unauthenticated);
    }

    #[test]
    fn clear_removes_user_and_session_together() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        cell.profile_resolved(ticket, Some(profile("user_a", Role::Sales)));
        assert!(cell.is_authenticated());

        cell.clear();
        let snapshot = cell.snapshot();
        assert!(snapshot.user().is_none());
        assert!(snapshot.session().is_none());
        assert!(!snapshot.is_authenticated());
    }

    #[test]
    fn refresh_keeps_authenticated_state_until_result_lands() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        cell.profile_resolved(ticket, Some(profile("user_a", Role::Sales)));

        let refresh = cell.refresh_ticket().unwrap();
        assert!(cell.is_authenticated());

        let mut updated = profile("user_a", Role::Sales);
        updated.department = Some("Billing".to_string());
        assert!(cell.profile_resolved(refresh, Some(updated)));
        assert_eq!(
            cell.snapshot().user().unwrap().department.as_deref(),
            Some("Billing")
        );
    }

    #[test]
    fn refresh_superseded_by_session_change_is_discarded() {
        let cell = AuthCell::new();
        let ticket = cell.session_changed(Some(session("user_a"))).unwrap();
        cell.profile_resolved(ticket, Some(profile("user_a", Role::Sales)));

        let refresh = cell.refresh_ticket().unwrap();
        let ticket_b = cell.session_changed(Some(session("user_b"))).unwrap();
        cell.profile_resolved(ticket_b, Some(profile("user_b", Role::Viewer)));

        assert!(!cell.profile_resolved(refresh, Some(profile("user_a", Role::Sales))));
        assert_eq!(cell.snapshot().user().unwrap().id.as_str(), "user_b");
    }

    #[test]
    fn refresh_ticket_requires_authentication() {
        let cell = AuthCell::new();
        assert!(cell.refresh_ticket().is_none());
        cell.session_changed(None);
        assert!(cell.refresh_ticket().is_none());
    }

    #[test]
    fn loading_is_not_authenticated() {
        let cell = AuthCell::new();
        cell.session_changed(Some(session("user_a")));
        // Session present, profile still pending.
        assert!(!cell.is_authenticated());
        assert!(!cell.has_permission(Permission::DashboardView));
        assert!(!cell.has_role(Role::all()));
    }
}
