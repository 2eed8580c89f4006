mod conversions;
mod types;

pub use conversions::grant_from_loose_flags;
pub use types::{
    PermissionCategoryResponse, PermissionDependencyResponse, PermissionGrantResponse,
    PermissionResponse, ResolvePermissionsRequest, SaveStaffPermissionsRequest,
    StaffPermissionsResponse, ToggleStaffPermissionRequest,
};
