//! Navigation entries and the role-based visibility filter.

use crate::error::Result;
use crate::role::Role;
use crate::types::EntryId;
use crate::user::UserProfile;

/// A navigation tree node: static configuration, never user-specific.
///
/// Visibility is computed per request by [`visible_entries`], never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavEntry {
    /// Stable identifier; keys the visibility predicate.
    pub id: EntryId,
    /// Display label.
    pub label: String,
    /// Icon name; rendering is the presentation layer's concern.
    pub icon: String,
    /// Child entries, if any.
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Creates a leaf entry with a validated identifier.
    pub fn new(
        id: impl AsRef<str>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: EntryId::new(id)?,
            label: label.into(),
            icon: icon.into(),
            children: Vec::new(),
        })
    }

    /// Attaches child entries.
    pub fn with_children(mut self, children: Vec<NavEntry>) -> Self {
        self.children = children;
        self
    }
}

/// Visibility predicate for a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Visible to every authenticated role.
    Everyone,
    /// Visible only to the listed roles.
    AnyOf(&'static [Role]),
    /// Visible to every role except the listed ones.
    AllExcept(&'static [Role]),
}

impl Visibility {
    /// Returns whether the predicate admits a role.
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Self::Everyone => true,
            Self::AnyOf(roles) => roles.contains(&role),
            Self::AllExcept(roles) => !roles.contains(&role),
        }
    }
}

/// Returns the visibility predicate for an entry identifier.
///
/// Entries without an explicit predicate are visible to every authenticated
/// role. The default is permissive: an entry that must be restricted has to
/// be added to this table.
pub fn entry_visibility(id: &EntryId) -> Visibility {
    use crate::role::Role::*;
    match id.as_str() {
        // User management is only for admins.
        "users" => Visibility::AnyOf(&[SuperAdmin, Admin]),
        // Settings is for managers and above.
        "settings" => Visibility::AnyOf(&[SuperAdmin, Admin, Manager]),
        "payroll" => Visibility::AnyOf(&[SuperAdmin, Admin, Manager, HrManager]),
        "tax" => Visibility::AnyOf(&[SuperAdmin, Admin, Manager, Accountant]),
        "accounting" => Visibility::AnyOf(&[SuperAdmin, Admin, Manager, Accountant, Sales]),
        "inventory" => Visibility::AnyOf(&[SuperAdmin, Admin, Manager, InventoryManager, Sales]),
        // Quick actions are for every role except read-only viewers.
        "quick-invoice" => Visibility::AllExcept(&[Viewer]),
        _ => Visibility::Everyone,
    }
}

/// Filters top-level entries for the current user.
///
/// Fail-closed: an absent user sees no navigation at all. Input order is
/// preserved; entries are never duplicated or reordered; children pass
/// through untouched (predicates key on top-level identifiers).
pub fn visible_entries(entries: &[NavEntry], user: Option<&UserProfile>) -> Vec<NavEntry> {
    let Some(user) = user else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| {
            let visibility = entry_visibility(&entry.id);
            let allowed = visibility.allows(user.role);
            if !allowed {
                tracing::debug!(entry = %entry.id, role = %user.role, "navigation entry hidden");
            }
            allowed
        })
        .cloned()
        .collect()
}

/// Returns whether the user may see a single entry.
///
/// Same predicate [`visible_entries`] applies per element; exposed for
/// consumers rendering entries outside a list context.
pub fn entry_visible(id: &EntryId, user: Option<&UserProfile>) -> bool {
    match user {
        Some(user) => entry_visibility(id).allows(user.role),
        None => false,
    }
}

fn entry(id: &str, label: &str, icon: &str) -> NavEntry {
    NavEntry {
        id: EntryId::from_string(id.to_string()),
        label: label.to_string(),
        icon: icon.to_string(),
        children: Vec::new(),
    }
}

/// The default ERP navigation catalog.
///
/// Static configuration data; callers pass it (or their own tree) to
/// [`visible_entries`].
pub fn default_menu() -> Vec<NavEntry> {
    vec![
        entry("home", "HOME", "home"),
        entry("warehouse", "WAREHOUSE", "warehouse").with_children(vec![
            entry("warehouse-inventory", "INVENTORY", "package").with_children(vec![
                entry("stock-movement", "Stock Movement", "arrow-right-left"),
                entry("product-database", "Product Database", "database"),
                entry("transfer-stock", "Transfer Stock", "truck"),
                entry("inventory-audit", "Inventory Audit", "clipboard-check"),
            ]),
            entry("warehouse-purchasing", "PURCHASING", "shopping-bag").with_children(vec![
                entry("purchase-request", "Purchase Request", "file-text"),
                entry("purchase-order", "Purchase Order", "file-edit"),
                entry("receiving-stock", "Receiving Stock", "package-check"),
                entry("return-to-supplier", "Return to Supplier", "package-x"),
            ]),
            entry("warehouse-reports", "REPORTS", "file-bar-chart").with_children(vec![
                entry("inventory-report", "Inventory Report", "bar-chart-3"),
                entry("reorder-report", "Reorder Report", "alert-circle"),
                entry(
                    "item-suggested-stock-report",
                    "Item Suggested for Stock Report",
                    "file-check",
                ),
                entry(
                    "fast-slow-inventory-report",
                    "Fast/Slow Inventory Report",
                    "trending-up",
                ),
            ]),
        ]),
        entry("sales", "SALES", "shopping-cart").with_children(vec![
            entry("sales-transaction", "TRANSACTION", "credit-card").with_children(vec![
                entry("sales-inquiry", "Sales Inquiry", "file-text"),
                entry("sales-order", "Sales Order", "file-edit"),
                entry("order-slip", "Order Slip", "receipt"),
                entry("invoice", "Invoice", "file-spreadsheet"),
            ]),
            entry("sales-reports", "REPORTS", "file-bar-chart").with_children(vec![
                entry("inquiry-report", "Inquiry Report", "bar-chart-3"),
                entry("sales-report", "Sales Report", "trending-up"),
                entry(
                    "sales-development-report",
                    "Sales Development Report",
                    "file-check",
                ),
            ]),
        ]),
        entry("accounting", "ACCOUNTING", "calculator").with_children(vec![
            entry("accounting-transactions", "TRANSACTIONS", "wallet").with_children(vec![
                entry("freight-charges-debit", "Freight Charges (Debit)", "truck"),
                entry("sales-return-credit", "Sales Return (Credit)", "package-x"),
                entry(
                    "adjustment-entry",
                    "Adjustment Entry (Debit/Credit)",
                    "file-edit",
                ),
                entry("daily-collection-entry", "Daily Collection Entry", "dollar-sign"),
            ]),
            entry("accounting-accounting", "ACCOUNTING", "book-open").with_children(vec![
                entry("customer-ledger", "Customer Ledger", "book-open-check"),
                entry("collection-summary", "Collection Summary", "file-check"),
                entry(
                    "statement-of-account",
                    "Statement of Account",
                    "file-spreadsheet",
                ),
                entry("accounts-receivable", "Accounts Receivable", "receipt"),
            ]),
            entry("accounting-reports", "REPORTS", "file-bar-chart").with_children(vec![
                entry(
                    "freight-charges-report",
                    "Freight Charges (Debit) Report",
                    "bar-chart-3",
                ),
                entry(
                    "sales-return-report",
                    "Sales Return (Credit) Report",
                    "trending-up",
                ),
                entry("purchase-history", "Purchase History", "file-text"),
                entry(
                    "inactive-active-customers",
                    "Inactive/Active Customers",
                    "users",
                ),
                entry("old-new-customers", "Old/New Customers", "user-circle"),
                entry("daily-calls-monitoring", "Daily Calls Monitoring", "phone-call"),
            ]),
        ]),
        entry("maintenance", "MAINTENANCE", "wrench").with_children(vec![
            entry("maintenance-customer", "CUSTOMER", "users-round").with_children(vec![
                entry("customer-data", "Customer Data", "database"),
                entry("daily-call-monitoring", "Daily Call Monitoring", "phone-call"),
                entry("customer-group", "Customer Group", "users"),
            ]),
            entry("maintenance-product", "PRODUCT", "package").with_children(vec![
                entry("suppliers", "Suppliers", "building-2"),
                entry("special-price", "Special Price", "tag"),
                entry("category-management", "Category Management", "boxes"),
                entry("courier-management", "Courier Management", "map-pin"),
                entry("remark-templates", "Remark Templates", "message-square"),
            ]),
            entry("maintenance-profile", "PROFILE", "user-cog").with_children(vec![
                entry("staff", "Staff", "user-check"),
                entry("team", "Team", "users-round"),
                entry("approver", "Approver", "shield"),
                entry("activity-logs", "Activity Logs", "clipboard-list"),
                entry("system-access", "System Access", "lock"),
                entry("server-maintenance", "Server Maintenance", "server"),
            ]),
        ]),
        entry("communication", "COMMUNICATION", "message-circle").with_children(vec![
            entry("text-menu", "TEXT MENU", "message-square").with_children(vec![
                entry("text-messages", "Text Messages", "message-circle"),
                entry("inbox", "Inbox", "inbox"),
                entry("sent", "Sent", "send"),
                entry("pending", "Pending", "clock"),
                entry("failed", "Failed", "x-circle"),
                entry("operator", "Operator", "radio"),
            ]),
        ]),
        entry("settings", "Settings", "settings"),
    ]
}
