use axum::Json;
use axum::extract::Path;
use beautycom_domain::{
    PERMISSION_DEPENDENCIES, list_categories, list_permissions_for_category, resolve_dependencies,
};

use crate::dto::{
    PermissionCategoryResponse, PermissionDependencyResponse, PermissionGrantResponse,
    PermissionResponse, ResolvePermissionsRequest, grant_from_loose_flags,
};

pub async fn permission_catalog_handler() -> Json<Vec<PermissionCategoryResponse>> {
    Json(
        list_categories()
            .iter()
            .map(PermissionCategoryResponse::from)
            .collect(),
    )
}

pub async fn category_permissions_handler(
    Path(category_id): Path<String>,
) -> Json<Vec<PermissionResponse>> {
    Json(
        list_permissions_for_category(category_id.as_str())
            .into_iter()
            .map(PermissionResponse::from)
            .collect(),
    )
}

pub async fn permission_dependencies_handler() -> Json<Vec<PermissionDependencyResponse>> {
    Json(
        PERMISSION_DEPENDENCIES
            .pairs()
            .iter()
            .map(PermissionDependencyResponse::from)
            .collect(),
    )
}

pub async fn resolve_permissions_handler(
    Json(payload): Json<ResolvePermissionsRequest>,
) -> Json<PermissionGrantResponse> {
    let grant = grant_from_loose_flags(payload.grant);
    Json(PermissionGrantResponse::from(resolve_dependencies(&grant)))
}
