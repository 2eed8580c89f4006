//! Staff permission catalog, grants and dependency rules.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod dependency;
mod grant;

pub use audit::AuditAction;
pub use catalog::{
    PERMISSION_CATALOG, Permission, PermissionCategory, find_category, find_permission,
    is_known_permission, list_all_permissions, list_categories, list_permissions_for_category,
};
pub use dependency::{
    DependencyTable, PERMISSION_DEPENDENCIES, PermissionDependency, resolve_dependencies,
    toggle_permission,
};
pub use grant::{PermissionError, PermissionGrant};

/// Key that allows reading other staff members' permissions.
pub const VIEW_EMPLOYEES: &str = "manage_employees.view";
/// Key that allows removing staff members.
pub const REMOVE_EMPLOYEES: &str = "manage_employees.remove";
/// Key that allows editing other staff members' permissions.
pub const MANAGE_PERMISSIONS: &str = "manage_employees.manage_permissions";
