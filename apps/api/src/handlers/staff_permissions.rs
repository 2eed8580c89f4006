use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use beautycom_core::{SalonId, UserIdentity};
use beautycom_domain::PermissionGrant;

use crate::dto::{
    SaveStaffPermissionsRequest, StaffPermissionsResponse, ToggleStaffPermissionRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_staff_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(salon_id): Path<String>,
) -> ApiResult<Json<Vec<StaffPermissionsResponse>>> {
    let salon_id = SalonId::from_str(salon_id.as_str())?;

    let staff = state
        .staff_permission_service
        .list_staff_permissions(&user, salon_id)
        .await?
        .into_iter()
        .map(StaffPermissionsResponse::from)
        .collect();

    Ok(Json(staff))
}

pub async fn staff_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((salon_id, staff_subject)): Path<(String, String)>,
) -> ApiResult<Json<StaffPermissionsResponse>> {
    let salon_id = SalonId::from_str(salon_id.as_str())?;

    let permissions = state
        .staff_permission_service
        .staff_permissions(&user, salon_id, staff_subject.as_str())
        .await?;

    Ok(Json(StaffPermissionsResponse::from(permissions)))
}

pub async fn save_staff_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((salon_id, staff_subject)): Path<(String, String)>,
    Json(payload): Json<SaveStaffPermissionsRequest>,
) -> ApiResult<Json<StaffPermissionsResponse>> {
    let salon_id = SalonId::from_str(salon_id.as_str())?;

    let permissions = state
        .staff_permission_service
        .save_staff_permissions(
            &user,
            salon_id,
            staff_subject.as_str(),
            PermissionGrant::from(payload.permissions),
        )
        .await?;

    Ok(Json(StaffPermissionsResponse::from(permissions)))
}

pub async fn toggle_staff_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((salon_id, staff_subject)): Path<(String, String)>,
    Json(payload): Json<ToggleStaffPermissionRequest>,
) -> ApiResult<Json<StaffPermissionsResponse>> {
    let salon_id = SalonId::from_str(salon_id.as_str())?;

    let permissions = state
        .staff_permission_service
        .toggle_staff_permission(
            &user,
            salon_id,
            staff_subject.as_str(),
            payload.permission.as_str(),
            payload.enabled,
        )
        .await?;

    Ok(Json(StaffPermissionsResponse::from(permissions)))
}

pub async fn remove_staff_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((salon_id, staff_subject)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let salon_id = SalonId::from_str(salon_id.as_str())?;

    state
        .staff_permission_service
        .remove_staff_permissions(&user, salon_id, staff_subject.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
