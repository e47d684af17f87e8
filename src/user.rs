use crate::role::Role;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use std::fmt;

/// Profile of an authenticated principal, as stored by the external profile
/// store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    /// Identifier assigned by the identity provider.
    pub id: UserId,
    /// Login email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role; immutable once assigned.
    pub role: Role,
    /// Department, if recorded.
    pub department: Option<String>,
    /// Phone number, if recorded.
    pub phone: Option<String>,
    /// Avatar location, if recorded.
    pub avatar_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Most recent sign-in, if any.
    pub last_login: Option<DateTime<Utc>>,
    /// Whether the account is active.
    pub is_active: bool,
}

impl UserProfile {
    /// Creates a fresh active profile with empty optional fields.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
            department: None,
            phone: None,
            avatar_url: None,
            created_at,
            updated_at: created_at,
            last_login: None,
            is_active: true,
        }
    }
}

/// Input to the identity provider's sign-up operation.
///
/// The typed `role` field keeps "role must be one of the fixed enumeration"
/// out of the runtime error space entirely.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignUpRequest {
    /// Login email address.
    pub email: String,
    /// Initial password, forwarded verbatim to the provider.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Role for the new account.
    pub role: Role,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
