//! Route guard: ordered render decisions for protected views.

use crate::permission::Permission;
use crate::role::Role;
use crate::state::AuthSnapshot;
use std::fmt;

/// Which constraint a denied request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The required permission is not granted to the user's role.
    MissingPermission(Permission),
    /// The user's role is not in the required role set.
    MissingRole,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPermission(permission) => {
                write!(f, "missing permission {permission}")
            }
            Self::MissingRole => f.write_str("missing role"),
        }
    }
}

/// Terminal outcome of a guarded view request.
///
/// The presentation layer maps `Render` to the protected content and
/// `Fallback` to its alternative view (e.g. a login prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected content.
    Render,
    /// Auth state is still resolving; render a placeholder.
    Loading,
    /// Not authenticated; render the caller-supplied fallback.
    Fallback,
    /// Authenticated but not allowed; the reason names the failed
    /// constraint.
    Denied(DenialReason),
}

/// Declarative requirements for a protected view.
///
/// Decision order is fixed: loading precedes authentication, and the
/// permission check precedes the role check. A caller that needs to
/// distinguish permission denial from role denial supplies only one
/// constraint at a time.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    required_permission: Option<Permission>,
    required_roles: Option<Vec<Role>>,
}

impl RouteGuard {
    /// Creates a guard with no constraints (authentication only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a permission.
    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    /// Requires membership in a single role.
    pub fn require_role(self, role: Role) -> Self {
        self.require_roles([role])
    }

    /// Requires membership in a role set.
    pub fn require_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles = Some(roles.into_iter().collect());
        self
    }

    /// Resolves the render decision for the current auth state.
    pub fn evaluate(&self, state: &AuthSnapshot) -> RouteDecision {
        if state.is_loading() {
            return RouteDecision::Loading;
        }
        if !state.is_authenticated() {
            return RouteDecision::Fallback;
        }
        if let Some(permission) = self.required_permission {
            if !state.has_permission(permission) {
                return RouteDecision::Denied(DenialReason::MissingPermission(permission));
            }
        }
        if let Some(roles) = &self.required_roles {
            if !state.has_role(roles.as_slice()) {
                return RouteDecision::Denied(DenialReason::MissingRole);
            }
        }
        RouteDecision::Render
    }
}
