use std::collections::BTreeMap;

use beautycom_application::StaffPermissions;
use beautycom_domain::{Permission, PermissionCategory, PermissionDependency, PermissionGrant};
use serde_json::Value;

use super::types::{
    PermissionCategoryResponse, PermissionDependencyResponse, PermissionGrantResponse,
    PermissionResponse, StaffPermissionsResponse,
};

/// Coerces loosely typed flags into a grant.
///
/// Booleans are kept, numbers are granted when non-zero and strings when they
/// read `"true"` or `"1"`. Everything else is not granted.
pub fn grant_from_loose_flags(flags: BTreeMap<String, Value>) -> PermissionGrant {
    PermissionGrant::from_flags(
        flags
            .into_iter()
            .map(|(key, value)| (key, flag_from_value(&value))),
    )
}

fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("true") || text == "1"
        }
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

impl From<&Permission> for PermissionResponse {
    fn from(value: &Permission) -> Self {
        Self {
            key: value.key().to_owned(),
            category_id: value.category_id().to_owned(),
            action: value.action().to_owned(),
            label: value.label().to_owned(),
            description: value.description().map(str::to_owned),
        }
    }
}

impl From<&PermissionCategory> for PermissionCategoryResponse {
    fn from(value: &PermissionCategory) -> Self {
        Self {
            id: value.id().to_owned(),
            title: value.title().to_owned(),
            icon: value.icon().to_owned(),
            permissions: value
                .permissions()
                .iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

impl From<&PermissionDependency> for PermissionDependencyResponse {
    fn from(value: &PermissionDependency) -> Self {
        Self {
            dependent: value.dependent().to_owned(),
            prerequisite: value.prerequisite().to_owned(),
        }
    }
}

impl From<PermissionGrant> for PermissionGrantResponse {
    fn from(value: PermissionGrant) -> Self {
        Self {
            grant: value.into(),
        }
    }
}

impl From<StaffPermissions> for StaffPermissionsResponse {
    fn from(value: StaffPermissions) -> Self {
        Self {
            salon_id: value.salon_id.to_string(),
            staff_subject: value.staff_subject,
            is_owner: value.is_owner,
            permissions: value.grant.into(),
            updated_at: value.updated_at.map(|updated_at| updated_at.to_rfc3339()),
        }
    }
}
