//! Role-based access control core for ERP application shells.
//!
//! This crate provides closed role and permission enumerations, a total
//! role-to-permission registry, a fail-closed evaluator over a single
//! auth-state cell, a menu visibility filter, and a route guard. Session
//! lifecycle and profile storage are owned by an external collaborator
//! behind the [`Provider`] traits.
//!
//! # Examples
//!
//! Guarding a view on a permission:
//! ```
//! use erp_access::{AuthSnapshot, Permission, RouteDecision, RouteGuard};
//!
//! let guard = RouteGuard::new().require_permission(Permission::ReportsExport);
//! assert_eq!(guard.evaluate(&AuthSnapshot::Loading), RouteDecision::Loading);
//! assert_eq!(
//!     guard.evaluate(&AuthSnapshot::Unauthenticated),
//!     RouteDecision::Fallback
//! );
//! ```
//!
//! Full sign-in flow against the in-memory provider (enable
//! `memory-provider`):
//! ```no_run
//! # #[cfg(feature = "memory-provider")]
//! # {
//! use erp_access::{AuthService, MemoryProvider, Permission, default_menu};
//!
//! # futures::executor::block_on(async {
//! let provider = MemoryProvider::new();
//! provider.seed_demo_users().unwrap();
//!
//! let service = AuthService::new(provider);
//! service.sign_in("accountant@company.com", "accountant123").await.unwrap();
//! assert!(service.has_permission(Permission::AccountingEdit));
//! let entries = service.visible_entries(&default_menu());
//! # let _ = entries;
//! # });
//! # }
//! ```
#![forbid(unsafe_code)]

mod error;
mod guard;
mod menu;
mod permission;
mod provider;
mod registry;
mod role;
mod service;
mod session;
mod state;
mod types;
mod user;

#[cfg(feature = "memory-provider")]
mod memory;

#[cfg(feature = "axum")]
pub mod axum;

pub use crate::error::{Error, ProviderError, Result};
pub use crate::guard::{DenialReason, RouteDecision, RouteGuard};
pub use crate::menu::{
    NavEntry, Visibility, default_menu, entry_visibility, entry_visible, visible_entries,
};
pub use crate::permission::Permission;
pub use crate::provider::{IdentityProvider, ProfileStore, Provider};
pub use crate::registry::{
    permissions_for, role_has_permission, user_has_permission, user_has_role,
};
pub use crate::role::Role;
pub use crate::service::AuthService;
pub use crate::session::{Session, SessionToken};
pub use crate::state::{AuthCell, AuthSnapshot, ResolveTicket};
pub use crate::types::{EntryId, UserId};
pub use crate::user::{SignUpRequest, UserProfile};

#[cfg(feature = "memory-provider")]
pub use crate::memory::MemoryProvider;
