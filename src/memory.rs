//! In-memory identity/profile collaborator for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::error::ProviderError;
use crate::provider::{IdentityProvider, ProfileStore};
use crate::role::Role;
use crate::session::{Session, SessionToken};
use crate::types::UserId;
use crate::user::{SignUpRequest, UserProfile};

/// Rejections issued by [`MemoryProvider`]; the `Display` output is the
/// message surfaced to callers.
#[derive(Debug, Error)]
enum Rejection {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for {0}")]
    DuplicateEmail(String),
}

#[derive(Debug)]
struct Account {
    user_id: UserId,
    password: String,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: RwLock<HashMap<String, Account>>,
    profiles: RwLock<HashMap<UserId, UserProfile>>,
    session: RwLock<Option<Session>>,
    counter: AtomicU64,
}

/// In-memory provider implementation.
///
/// Accounts are keyed by email; tokens are counter-issued opaque strings.
/// Holds at most one session, like the real provider's client.
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    inner: Arc<Inner>,
}

/// Demo accounts, one per role in common use.
const SEED_USERS: &[(&str, &str, &str, Role)] = &[
    ("admin@company.com", "admin123", "Admin User", Role::SuperAdmin),
    ("manager@company.com", "manager123", "Manager User", Role::Manager),
    (
        "accountant@company.com",
        "accountant123",
        "Accountant User",
        Role::Accountant,
    ),
    (
        "inventory@company.com",
        "inventory123",
        "Inventory Manager",
        Role::InventoryManager,
    ),
    ("hr@company.com", "hr123", "HR Manager", Role::HrManager),
    ("sales@company.com", "sales123", "Sales User", Role::Sales),
    ("viewer@company.com", "viewer123", "Viewer User", Role::Viewer),
];

impl MemoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account and its profile; returns the new user id.
    pub fn register(&self, request: SignUpRequest) -> Result<UserId, ProviderError> {
        let mut accounts = self.inner.accounts.write().expect("poisoned lock");
        if accounts.contains_key(&request.email) {
            return Err(Box::new(Rejection::DuplicateEmail(request.email)));
        }

        let serial = self.inner.counter.fetch_add(1, Ordering::Relaxed);
        let user_id = UserId::from_string(format!("user-{serial}"));
        accounts.insert(
            request.email.clone(),
            Account {
                user_id: user_id.clone(),
                password: request.password,
            },
        );
        drop(accounts);

        let profile = UserProfile::new(
            user_id.clone(),
            request.email,
            request.name,
            request.role,
            Utc::now(),
        );
        let mut profiles = self.inner.profiles.write().expect("poisoned lock");
        profiles.insert(user_id.clone(), profile);

        Ok(user_id)
    }

    /// Registers the seven demo accounts.
    pub fn seed_demo_users(&self) -> Result<(), ProviderError> {
        for (email, password, name, role) in SEED_USERS {
            self.register(SignUpRequest {
                email: (*email).to_string(),
                password: (*password).to_string(),
                name: (*name).to_string(),
                role: *role,
            })?;
        }
        Ok(())
    }

    /// Deletes a profile while leaving the account and any session intact.
    ///
    /// Test hook for the session-without-profile failure path.
    pub fn remove_profile(&self, id: &UserId) {
        let mut profiles = self.inner.profiles.write().expect("poisoned lock");
        profiles.remove(id);
    }

    fn issue_session(&self, user_id: UserId) -> Session {
        let serial = self.inner.counter.fetch_add(1, Ordering::Relaxed);
        Session::new(user_id, SessionToken::new(format!("sess-{serial}")))
    }
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    async fn current_session(&self) -> Result<Option<Session>, ProviderError> {
        let session = self.inner.session.read().expect("poisoned lock");
        Ok(session.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let accounts = self.inner.accounts.read().expect("poisoned lock");
        let account = accounts
            .get(email)
            .filter(|account| account.password == password)
            .ok_or_else(|| Box::new(Rejection::InvalidCredentials) as ProviderError)?;
        let session = self.issue_session(account.user_id.clone());
        drop(accounts);

        let mut slot = self.inner.session.write().expect("poisoned lock");
        *slot = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<(), ProviderError> {
        self.register(request).map(|_| ())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let mut slot = self.inner.session.write().expect("poisoned lock");
        *slot = None;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProvider {
    async fn resolve_user(&self, id: &UserId) -> Result<Option<UserProfile>, ProviderError> {
        let profiles = self.inner.profiles.read().expect("poisoned lock");
        Ok(profiles.get(id).cloned())
    }

    async fn record_login(&self, id: &UserId) -> Result<(), ProviderError> {
        let mut profiles = self.inner.profiles.write().expect("poisoned lock");
        if let Some(profile) = profiles.get_mut(id) {
            let now = Utc::now();
            profile.last_login = Some(now);
            profile.updated_at = now;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn request(email: &str, role: Role) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "pass-1234".to_string(),
            name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn register_then_sign_in_issues_session() {
        let provider = MemoryProvider::new();
        let user_id = provider
            .register(request("user@company.com", Role::Sales))
            .unwrap();

        let session = block_on(provider.sign_in("user@company.com", "pass-1234")).unwrap();
        assert_eq!(session.user_id(), &user_id);
        assert_eq!(
            block_on(provider.current_session()).unwrap(),
            Some(session)
        );
    }

    #[test]
    fn wrong_password_is_rejected_with_message() {
        let provider = MemoryProvider::new();
        provider
            .register(request("user@company.com", Role::Sales))
            .unwrap();

        let err = block_on(provider.sign_in("user@company.com", "wrong")).expect_err("must reject");
        assert_eq!(err.to_string(), "invalid email or password");
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let provider = MemoryProvider::new();
        provider
            .register(request("user@company.com", Role::Sales))
            .unwrap();
        let err = provider
            .register(request("user@company.com", Role::Viewer))
            .expect_err("must reject");
        assert!(err.to_string().contains("user@company.com"));
    }

    #[test]
    fn record_login_updates_profile_timestamps() {
        let provider = MemoryProvider::new();
        let user_id = provider
            .register(request("user@company.com", Role::Sales))
            .unwrap();

        block_on(provider.record_login(&user_id)).unwrap();
        let profile = block_on(provider.resolve_user(&user_id)).unwrap().unwrap();
        assert!(profile.last_login.is_some());
    }

    #[test]
    fn sign_out_clears_the_session_slot() {
        let provider = MemoryProvider::new();
        provider
            .register(request("user@company.com", Role::Sales))
            .unwrap();
        block_on(provider.sign_in("user@company.com", "pass-1234")).unwrap();

        block_on(provider.sign_out()).unwrap();
        assert_eq!(block_on(provider.current_session()).unwrap(), None);
    }

    #[test]
    fn seeded_demo_users_cover_their_roles() {
        let provider = MemoryProvider::new();
        provider.seed_demo_users().unwrap();

        let session = block_on(provider.sign_in("accountant@company.com", "accountant123")).unwrap();
        let profile = block_on(provider.resolve_user(session.user_id()))
            .unwrap()
            .unwrap();
        assert_eq!(profile.role, Role::Accountant);
    }
}
