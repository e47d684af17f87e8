use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Fine-grained capability tag of the form `domain.action`.
///
/// Permissions are never combined or inherited implicitly; each role's grant
/// set enumerates them explicitly in [`crate::registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// View the dashboard.
    DashboardView,
    /// View accounting records.
    AccountingView,
    /// Create accounting records.
    AccountingCreate,
    /// Edit accounting records.
    AccountingEdit,
    /// Delete accounting records.
    AccountingDelete,
    /// View inventory.
    InventoryView,
    /// Create inventory records.
    InventoryCreate,
    /// Edit inventory records.
    InventoryEdit,
    /// Delete inventory records.
    InventoryDelete,
    /// View tax records.
    TaxView,
    /// Create tax records.
    TaxCreate,
    /// Edit tax records.
    TaxEdit,
    /// Delete tax records.
    TaxDelete,
    /// View payroll.
    PayrollView,
    /// Create payroll entries.
    PayrollCreate,
    /// Edit payroll entries.
    PayrollEdit,
    /// Delete payroll entries.
    PayrollDelete,
    /// View invoices.
    InvoicingView,
    /// Create invoices.
    InvoicingCreate,
    /// Edit invoices.
    InvoicingEdit,
    /// Delete invoices.
    InvoicingDelete,
    /// View reports.
    ReportsView,
    /// Export reports.
    ReportsExport,
    /// View settings.
    SettingsView,
    /// Edit settings.
    SettingsEdit,
    /// View user accounts.
    UsersView,
    /// Create user accounts.
    UsersCreate,
    /// Edit user accounts.
    UsersEdit,
    /// Delete user accounts.
    UsersDelete,
}

impl Permission {
    /// Returns the stable storage string (`domain.action`) for this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard.view",
            Self::AccountingView => "accounting.view",
            Self::AccountingCreate => "accounting.create",
            Self::AccountingEdit => "accounting.edit",
            Self::AccountingDelete => "accounting.delete",
            Self::InventoryView => "inventory.view",
            Self::InventoryCreate => "inventory.create",
            Self::InventoryEdit => "inventory.edit",
            Self::InventoryDelete => "inventory.delete",
            Self::TaxView => "tax.view",
            Self::TaxCreate => "tax.create",
            Self::TaxEdit => "tax.edit",
            Self::TaxDelete => "tax.delete",
            Self::PayrollView => "payroll.view",
            Self::PayrollCreate => "payroll.create",
            Self::PayrollEdit => "payroll.edit",
            Self::PayrollDelete => "payroll.delete",
            Self::InvoicingView => "invoicing.view",
            Self::InvoicingCreate => "invoicing.create",
            Self::InvoicingEdit => "invoicing.edit",
            Self::InvoicingDelete => "invoicing.delete",
            Self::ReportsView => "reports.view",
            Self::ReportsExport => "reports.export",
            Self::SettingsView => "settings.view",
            Self::SettingsEdit => "settings.edit",
            Self::UsersView => "users.view",
            Self::UsersCreate => "users.create",
            Self::UsersEdit => "users.edit",
            Self::UsersDelete => "users.delete",
        }
    }

    /// Returns the `domain` segment of the storage string.
    pub fn domain(&self) -> &'static str {
        self.as_str()
            .split_once('.')
            .map(|(domain, _)| domain)
            .unwrap_or_default()
    }

    /// Returns the `action` segment of the storage string.
    pub fn action(&self) -> &'static str {
        self.as_str()
            .split_once('.')
            .map(|(_, action)| action)
            .unwrap_or_default()
    }

    /// Returns all permissions.
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::DashboardView,
            Permission::AccountingView,
            Permission::AccountingCreate,
            Permission::AccountingEdit,
            Permission::AccountingDelete,
            Permission::InventoryView,
            Permission::InventoryCreate,
            Permission::InventoryEdit,
            Permission::InventoryDelete,
            Permission::TaxView,
            Permission::TaxCreate,
            Permission::TaxEdit,
            Permission::TaxDelete,
            Permission::PayrollView,
            Permission::PayrollCreate,
            Permission::PayrollEdit,
            Permission::PayrollDelete,
            Permission::InvoicingView,
            Permission::InvoicingCreate,
            Permission::InvoicingEdit,
            Permission::InvoicingDelete,
            Permission::ReportsView,
            Permission::ReportsExport,
            Permission::SettingsView,
            Permission::SettingsEdit,
            Permission::UsersView,
            Permission::UsersCreate,
            Permission::UsersEdit,
            Permission::UsersDelete,
        ];

        ALL
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|permission| permission.as_str() == value)
            .copied()
            .ok_or_else(|| Error::UnknownPermission(value.to_string()))
    }
}

// The stable wire string is `domain.action`, which no serde rename rule
// produces, so serialization goes through the storage string directly.
#[cfg(feature = "serde")]
impl serde::Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
