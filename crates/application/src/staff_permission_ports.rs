mod audit;
mod repositories;

pub use audit::AuditEvent;
pub use repositories::{
    SalonRepository, StaffPermissionRecord, StaffPermissionRepository, StaffPermissionToggle,
};
