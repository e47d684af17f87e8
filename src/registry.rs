//! Role-to-permission registry and the pure access evaluator.
//!
//! The registry is process-wide constant data. Totality over [`Role`] is
//! enforced by the exhaustive `match` in [`permissions_for`]: a new role
//! variant without a grant set fails to compile.

use crate::permission::Permission;
use crate::role::Role;
use crate::user::UserProfile;

use crate::permission::Permission::*;

const SUPER_ADMIN: &[Permission] = &[
    DashboardView,
    AccountingView,
    AccountingCreate,
    AccountingEdit,
    AccountingDelete,
    InventoryView,
    InventoryCreate,
    InventoryEdit,
    InventoryDelete,
    TaxView,
    TaxCreate,
    TaxEdit,
    TaxDelete,
    PayrollView,
    PayrollCreate,
    PayrollEdit,
    PayrollDelete,
    InvoicingView,
    InvoicingCreate,
    InvoicingEdit,
    InvoicingDelete,
    ReportsView,
    ReportsExport,
    SettingsView,
    SettingsEdit,
    UsersView,
    UsersCreate,
    UsersEdit,
    UsersDelete,
];

// Same as super_admin minus users.delete.
const ADMIN: &[Permission] = &[
    DashboardView,
    AccountingView,
    AccountingCreate,
    AccountingEdit,
    AccountingDelete,
    InventoryView,
    InventoryCreate,
    InventoryEdit,
    InventoryDelete,
    TaxView,
    TaxCreate,
    TaxEdit,
    TaxDelete,
    PayrollView,
    PayrollCreate,
    PayrollEdit,
    PayrollDelete,
    InvoicingView,
    InvoicingCreate,
    InvoicingEdit,
    InvoicingDelete,
    ReportsView,
    ReportsExport,
    SettingsView,
    SettingsEdit,
    UsersView,
    UsersCreate,
    UsersEdit,
];

const MANAGER: &[Permission] = &[
    DashboardView,
    AccountingView,
    AccountingCreate,
    AccountingEdit,
    InventoryView,
    InventoryCreate,
    InventoryEdit,
    TaxView,
    TaxCreate,
    TaxEdit,
    PayrollView,
    PayrollCreate,
    PayrollEdit,
    InvoicingView,
    InvoicingCreate,
    InvoicingEdit,
    ReportsView,
    ReportsExport,
    SettingsView,
];

const ACCOUNTANT: &[Permission] = &[
    DashboardView,
    AccountingView,
    AccountingCreate,
    AccountingEdit,
    TaxView,
    TaxCreate,
    TaxEdit,
    InvoicingView,
    InvoicingCreate,
    InvoicingEdit,
    ReportsView,
    ReportsExport,
];

const INVENTORY_MANAGER: &[Permission] = &[
    DashboardView,
    InventoryView,
    InventoryCreate,
    InventoryEdit,
    InvoicingView,
    InvoicingCreate,
    ReportsView,
];

const HR_MANAGER: &[Permission] = &[
    DashboardView,
    PayrollView,
    PayrollCreate,
    PayrollEdit,
    ReportsView,
    ReportsExport,
];

const SALES: &[Permission] = &[
    DashboardView,
    InvoicingView,
    InvoicingCreate,
    InvoicingEdit,
    InventoryView,
    ReportsView,
];

const VIEWER: &[Permission] = &[
    DashboardView,
    AccountingView,
    InventoryView,
    TaxView,
    PayrollView,
    InvoicingView,
    ReportsView,
];

/// Returns the permission set granted to a role.
///
/// Total over [`Role`]; never fails, never returns an empty set.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN,
        Role::Admin => ADMIN,
        Role::Manager => MANAGER,
        Role::Accountant => ACCOUNTANT,
        Role::InventoryManager => INVENTORY_MANAGER,
        Role::HrManager => HR_MANAGER,
        Role::Sales => SALES,
        Role::Viewer => VIEWER,
    }
}

/// Returns whether a role grants a permission.
pub fn role_has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Returns whether the current user's role grants a permission.
///
/// Fail-closed: `false` when no user is present. A pure function of the
/// user's role, the permission, and the registry.
pub fn user_has_permission(user: Option<&UserProfile>, permission: Permission) -> bool {
    match user {
        Some(user) => role_has_permission(user.role, permission),
        None => false,
    }
}

/// Returns whether the current user's role is in the given role set.
///
/// Fail-closed: `false` when no user is present. A single role is passed as
/// a one-element array.
pub fn user_has_role(user: Option<&UserProfile>, roles: impl AsRef<[Role]>) -> bool {
    match user {
        Some(user) => roles.as_ref().contains(&user.role),
        None => false,
    }
}
