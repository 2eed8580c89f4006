use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// API representation of one catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub key: String,
    pub category_id: String,
    pub action: String,
    pub label: String,
    pub description: Option<String>,
}

/// API representation of a permission category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-category-response.ts"
)]
pub struct PermissionCategoryResponse {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub permissions: Vec<PermissionResponse>,
}

/// API representation of one dependency rule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-dependency-response.ts"
)]
pub struct PermissionDependencyResponse {
    pub dependent: String,
    pub prerequisite: String,
}

/// Incoming payload for stateless dependency resolution.
///
/// Values are coerced to booleans before resolution.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolve-permissions-request.ts"
)]
pub struct ResolvePermissionsRequest {
    #[ts(type = "Record<string, unknown>")]
    pub grant: BTreeMap<String, Value>,
}

/// Resolved permission flags.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-grant-response.ts"
)]
pub struct PermissionGrantResponse {
    pub grant: BTreeMap<String, bool>,
}

/// Incoming payload replacing a staff member's permissions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-staff-permissions-request.ts"
)]
pub struct SaveStaffPermissionsRequest {
    pub permissions: BTreeMap<String, bool>,
}

/// Incoming payload toggling one staff permission.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/toggle-staff-permission-request.ts"
)]
pub struct ToggleStaffPermissionRequest {
    pub permission: String,
    pub enabled: bool,
}

/// API representation of a salon member's permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/staff-permissions-response.ts"
)]
pub struct StaffPermissionsResponse {
    pub salon_id: String,
    pub staff_subject: String,
    pub is_owner: bool,
    pub permissions: BTreeMap<String, bool>,
    pub updated_at: Option<String>,
}
