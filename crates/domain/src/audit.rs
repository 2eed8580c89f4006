use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by staff permission use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a staff member's permissions are saved.
    StaffPermissionsUpdated,
    /// Emitted when a single staff permission is toggled.
    StaffPermissionToggled,
    /// Emitted when a staff member's permissions are removed.
    StaffPermissionsRevoked,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaffPermissionsUpdated => "staff.permissions.updated",
            Self::StaffPermissionToggled => "staff.permissions.toggled",
            Self::StaffPermissionsRevoked => "staff.permissions.revoked",
        }
    }
}
