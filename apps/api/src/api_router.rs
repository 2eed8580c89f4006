use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use beautycom_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/salons/{salon_id}/staff/permissions",
            get(handlers::staff_permissions::list_staff_permissions_handler),
        )
        .route(
            "/api/salons/{salon_id}/staff/{staff_subject}/permissions",
            get(handlers::staff_permissions::staff_permissions_handler)
                .put(handlers::staff_permissions::save_staff_permissions_handler)
                .delete(handlers::staff_permissions::remove_staff_permissions_handler),
        )
        .route(
            "/api/salons/{salon_id}/staff/{staff_subject}/permissions/toggle",
            post(handlers::staff_permissions::toggle_staff_permission_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_gateway_identity,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/permissions/catalog",
            get(handlers::permissions::permission_catalog_handler),
        )
        .route(
            "/api/permissions/catalog/{category_id}",
            get(handlers::permissions::category_permissions_handler),
        )
        .route(
            "/api/permissions/dependencies",
            get(handlers::permissions::permission_dependencies_handler),
        )
        .route(
            "/api/permissions/resolve",
            post(handlers::permissions::resolve_permissions_handler),
        )
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
