pub mod health;
pub mod permissions;
pub mod staff_permissions;
