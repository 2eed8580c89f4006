//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_salon_repository;
mod in_memory_staff_permission_repository;
mod postgres_audit_log;
mod postgres_pool;
mod postgres_salon_repository;
mod postgres_staff_permission_repository;

pub use in_memory_salon_repository::InMemorySalonRepository;
pub use in_memory_staff_permission_repository::InMemoryStaffPermissionRepository;
pub use postgres_pool::{connect_and_migrate, run_migrations};
pub use postgres_salon_repository::PostgresSalonRepository;
pub use postgres_staff_permission_repository::PostgresStaffPermissionRepository;
