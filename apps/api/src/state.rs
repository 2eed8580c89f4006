use std::sync::Arc;

use beautycom_application::StaffPermissionService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub staff_permission_service: StaffPermissionService,
    pub postgres_pool: Option<PgPool>,
    pub gateway_shared_secret: Arc<str>,
}
