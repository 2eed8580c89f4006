//! Application services and ports.

#![forbid(unsafe_code)]

mod staff_permission_ports;
mod staff_permission_service;

pub use staff_permission_ports::{
    AuditEvent, SalonRepository, StaffPermissionRecord, StaffPermissionRepository,
    StaffPermissionToggle,
};
pub use staff_permission_service::{StaffPermissionService, StaffPermissions};
