use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use beautycom_core::{AppError, NonEmptyString, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

pub(crate) const GATEWAY_SECRET_HEADER: &str = "x-beautycom-gateway-secret";
pub(crate) const SUBJECT_HEADER: &str = "x-beautycom-subject";
pub(crate) const DISPLAY_NAME_HEADER: &str = "x-beautycom-display-name";
pub(crate) const EMAIL_HEADER: &str = "x-beautycom-email";

/// Accepts identities forwarded by the authentication gateway.
pub async fn require_gateway_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers(), &state.gateway_shared_secret)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub(crate) fn identity_from_headers(
    headers: &HeaderMap,
    gateway_shared_secret: &str,
) -> Result<UserIdentity, AppError> {
    let provided_secret = header_value(headers, GATEWAY_SECRET_HEADER)
        .ok_or_else(|| AppError::Unauthorized("gateway credentials required".to_owned()))?;
    if !constant_time_eq(provided_secret.as_bytes(), gateway_shared_secret.as_bytes()) {
        return Err(AppError::Unauthorized(
            "gateway credentials rejected".to_owned(),
        ));
    }

    let subject = header_value(headers, SUBJECT_HEADER)
        .map(NonEmptyString::new)
        .transpose()
        .map_err(|_| AppError::Unauthorized("authentication required".to_owned()))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let subject = String::from(subject);
    let display_name = header_value(headers, DISPLAY_NAME_HEADER)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(subject.as_str())
        .to_owned();
    let email = header_value(headers, EMAIL_HEADER)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned);

    Ok(UserIdentity::new(subject, display_name, email))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}
