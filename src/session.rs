use crate::types::UserId;
use std::fmt;

/// Opaque authentication proof issued by the external identity provider.
///
/// The core never inspects the token; it only passes it back to the
/// provider. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a provider-issued token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for handing back to the provider.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// An established session: the token plus the user id it resolves to.
///
/// Lifecycle is owned by the identity provider; the core only reacts to
/// session-established and session-cleared notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    user_id: UserId,
    token: SessionToken,
}

impl Session {
    /// Creates a session from provider data.
    pub fn new(user_id: UserId, token: SessionToken) -> Self {
        Self { user_id, token }
    }

    /// Returns the id of the user this session belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the opaque token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let session = Session::new(
            UserId::from_string("user_1".to_string()),
            SessionToken::new("sess-secret-1"),
        );
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("sess-secret-1"));
        assert!(rendered.contains("<redacted>"));
    }
}
