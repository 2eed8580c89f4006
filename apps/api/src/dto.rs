mod common;
mod permissions;

pub use common::{HealthDependencyStatus, HealthResponse};
pub use permissions::{
    PermissionCategoryResponse, PermissionDependencyResponse, PermissionGrantResponse,
    PermissionResponse, ResolvePermissionsRequest, SaveStaffPermissionsRequest,
    StaffPermissionsResponse, ToggleStaffPermissionRequest, grant_from_loose_flags,
};
