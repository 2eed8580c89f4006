//! Beautycom staff permissions API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod salon_seed;
mod state;

use std::sync::Arc;

use beautycom_application::{SalonRepository, StaffPermissionRepository, StaffPermissionService};
use beautycom_core::AppError;
use beautycom_infrastructure::{
    InMemorySalonRepository, InMemoryStaffPermissionRepository, PostgresSalonRepository,
    PostgresStaffPermissionRepository, connect_and_migrate,
};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, StorageBackendConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let (repository, salon_repository, postgres_pool) = match &config.storage {
        StorageBackendConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = connect_and_migrate(database_url, *max_connections).await?;

            let repository: Arc<dyn StaffPermissionRepository> =
                Arc::new(PostgresStaffPermissionRepository::new(pool.clone()));
            let salon_repository: Arc<dyn SalonRepository> =
                Arc::new(PostgresSalonRepository::new(pool.clone()));

            (repository, salon_repository, Some(pool))
        }
        StorageBackendConfig::InMemory => {
            warn!("using in-memory storage; staff permissions are lost on restart");

            let repository: Arc<dyn StaffPermissionRepository> =
                Arc::new(InMemoryStaffPermissionRepository::new());
            let salon_repository: Arc<dyn SalonRepository> =
                Arc::new(InMemorySalonRepository::new());

            (repository, salon_repository, None)
        }
    };

    salon_seed::run(salon_repository.as_ref(), &config.salon_owners).await?;
    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let staff_permission_service = StaffPermissionService::new(repository, salon_repository);

    let app_state = AppState {
        staff_permission_service,
        postgres_pool,
        gateway_shared_secret: Arc::from(config.gateway_shared_secret.as_str()),
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "beautycom-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
