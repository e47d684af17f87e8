use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// User role determining baseline access.
///
/// The set is closed: every authenticated principal carries exactly one of
/// these, and the registry in [`crate::registry`] is total over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Full system access.
    SuperAdmin,
    /// Company-wide access.
    Admin,
    /// Department management access.
    Manager,
    /// Accounting and financial access.
    Accountant,
    /// Inventory and stock access.
    InventoryManager,
    /// Payroll and employee access.
    HrManager,
    /// Invoicing and billing access.
    Sales,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Returns the stable storage string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::InventoryManager => "inventory_manager",
            Self::HrManager => "hr_manager",
            Self::Sales => "sales",
            Self::Viewer => "viewer",
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::SuperAdmin,
            Role::Admin,
            Role::Manager,
            Role::Accountant,
            Role::InventoryManager,
            Role::HrManager,
            Role::Sales,
            Role::Viewer,
        ];

        ALL
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "accountant" => Ok(Self::Accountant),
            "inventory_manager" => Ok(Self::InventoryManager),
            "hr_manager" => Ok(Self::HrManager),
            "sales" => Ok(Self::Sales),
            "viewer" => Ok(Self::Viewer),
            _ => Err(Error::UnknownRole(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;
    use std::str::FromStr;

    #[test]
    fn storage_strings_round_trip() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), *role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = Role::from_str("intern").expect_err("must reject");
        assert!(err.to_string().contains("intern"));
    }
}
