use std::sync::Arc;

use beautycom_core::{AppError, AppResult, NonEmptyString, SalonId, UserIdentity};
use beautycom_domain::{
    AuditAction, MANAGE_PERMISSIONS, PermissionError, PermissionGrant, REMOVE_EMPLOYEES,
    VIEW_EMPLOYEES, is_known_permission, list_all_permissions, resolve_dependencies,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::staff_permission_ports::{
    AuditEvent, SalonRepository, StaffPermissionRecord, StaffPermissionRepository,
    StaffPermissionToggle,
};

const RESOURCE_TYPE: &str = "staff_permissions";

/// Permission state of one salon member as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPermissions {
    /// Salon scope.
    pub salon_id: SalonId,
    /// Staff member subject.
    pub staff_subject: String,
    /// Whether the subject owns the salon.
    pub is_owner: bool,
    /// Effective permission flags.
    pub grant: PermissionGrant,
    /// Last modification time of the stored grant, absent for owners.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<StaffPermissionRecord> for StaffPermissions {
    fn from(value: StaffPermissionRecord) -> Self {
        Self {
            salon_id: value.salon_id,
            staff_subject: value.staff_subject,
            is_owner: false,
            grant: resolve_dependencies(&value.grant),
            updated_at: Some(value.updated_at),
        }
    }
}

/// Application service for salon staff permission management.
#[derive(Clone)]
pub struct StaffPermissionService {
    repository: Arc<dyn StaffPermissionRepository>,
    salon_repository: Arc<dyn SalonRepository>,
}

impl StaffPermissionService {
    /// Creates a new service from repository implementations.
    #[must_use]
    pub fn new(
        repository: Arc<dyn StaffPermissionRepository>,
        salon_repository: Arc<dyn SalonRepository>,
    ) -> Self {
        Self {
            repository,
            salon_repository,
        }
    }

    /// Returns the stored grant of a staff member with dependencies applied.
    ///
    /// Staff members without a stored grant hold nothing.
    pub async fn effective_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<PermissionGrant> {
        Ok(self
            .repository
            .find_grant(salon_id, staff_subject)
            .await?
            .map(|record| resolve_dependencies(&record.grant))
            .unwrap_or_default())
    }

    /// Returns whether the actor holds the permission in the salon.
    ///
    /// The salon owner holds every permission.
    pub async fn has_permission(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        permission_key: &str,
    ) -> AppResult<bool> {
        let owner = self.salon_owner(salon_id).await?;
        if owner == actor.subject() {
            return Ok(true);
        }

        Ok(self
            .effective_grant(salon_id, actor.subject())
            .await?
            .is_granted(permission_key))
    }

    /// Ensures the actor holds the permission in the salon.
    pub async fn require_permission(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        permission_key: &str,
    ) -> AppResult<()> {
        if self
            .has_permission(actor, salon_id, permission_key)
            .await?
        {
            return Ok(());
        }

        debug!(
            %salon_id,
            subject = actor.subject(),
            permission = permission_key,
            "staff permission check denied"
        );
        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{permission_key}' in salon '{salon_id}'",
            actor.subject()
        )))
    }

    /// Returns the permissions of one salon member.
    ///
    /// Members may always read their own permissions; reading someone else's
    /// requires the employee view permission.
    pub async fn staff_permissions(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<StaffPermissions> {
        let staff_subject = normalize_subject(staff_subject)?;
        let owner = self.salon_owner(salon_id).await?;
        if staff_subject != actor.subject() {
            self.require_permission(actor, salon_id, VIEW_EMPLOYEES)
                .await?;
        }

        if staff_subject == owner {
            return Ok(StaffPermissions {
                salon_id,
                staff_subject: owner,
                is_owner: true,
                grant: PermissionGrant::from_flags(
                    list_all_permissions()
                        .into_iter()
                        .map(|permission| (permission.key(), true)),
                ),
                updated_at: None,
            });
        }

        self.repository
            .find_grant(salon_id, staff_subject.as_str())
            .await?
            .map(StaffPermissions::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no permissions stored for staff member '{staff_subject}' in salon '{salon_id}'"
                ))
            })
    }

    /// Lists the stored permissions of every staff member of a salon.
    pub async fn list_staff_permissions(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
    ) -> AppResult<Vec<StaffPermissions>> {
        self.require_permission(actor, salon_id, VIEW_EMPLOYEES)
            .await?;

        Ok(self
            .repository
            .list_grants_for_salon(salon_id)
            .await?
            .into_iter()
            .map(StaffPermissions::from)
            .collect())
    }

    /// Replaces a staff member's permissions.
    ///
    /// Unknown keys are rejected and the stored grant is closed under the
    /// dependency table.
    pub async fn save_staff_permissions(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        staff_subject: &str,
        grant: PermissionGrant,
    ) -> AppResult<StaffPermissions> {
        let staff_subject = self
            .authorize_edit(actor, salon_id, staff_subject, MANAGE_PERMISSIONS)
            .await?;
        grant.validate_known_keys()?;

        let record = StaffPermissionRecord {
            salon_id,
            staff_subject: staff_subject.clone(),
            grant: resolve_dependencies(&grant),
            updated_at: Utc::now(),
        };
        let event = audit_event(
            actor,
            salon_id,
            AuditAction::StaffPermissionsUpdated,
            &staff_subject,
            format!("granted [{}]", record.grant.granted_keys().join(", ")),
        );
        self.repository.save_grant(record.clone(), event).await?;

        info!(
            %salon_id,
            staff_subject = staff_subject.as_str(),
            granted = record.grant.granted_keys().len(),
            "saved staff permissions"
        );

        Ok(StaffPermissions::from(record))
    }

    /// Turns one staff permission on or off.
    ///
    /// Enabling grants prerequisites as well; disabling also disables every
    /// permission that depends on the key.
    pub async fn toggle_staff_permission(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        staff_subject: &str,
        permission_key: &str,
        enabled: bool,
    ) -> AppResult<StaffPermissions> {
        let staff_subject = self
            .authorize_edit(actor, salon_id, staff_subject, MANAGE_PERMISSIONS)
            .await?;
        if !is_known_permission(permission_key) {
            return Err(PermissionError::UnknownPermissionKey {
                key: permission_key.to_owned(),
            }
            .into());
        }

        let event = audit_event(
            actor,
            salon_id,
            AuditAction::StaffPermissionToggled,
            &staff_subject,
            format!("set '{permission_key}' to {enabled}"),
        );
        let record = self
            .repository
            .toggle_grant(
                StaffPermissionToggle {
                    salon_id,
                    staff_subject: staff_subject.clone(),
                    permission_key: permission_key.to_owned(),
                    enabled,
                    toggled_at: Utc::now(),
                },
                event,
            )
            .await?;

        info!(
            %salon_id,
            staff_subject = staff_subject.as_str(),
            permission = permission_key,
            enabled,
            "toggled staff permission"
        );

        Ok(StaffPermissions::from(record))
    }

    /// Removes a staff member's stored permissions when the staff
    /// relationship ends.
    pub async fn remove_staff_permissions(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<()> {
        let staff_subject = self
            .authorize_edit(actor, salon_id, staff_subject, REMOVE_EMPLOYEES)
            .await?;

        let event = audit_event(
            actor,
            salon_id,
            AuditAction::StaffPermissionsRevoked,
            &staff_subject,
            "staff relationship ended".to_owned(),
        );
        if !self
            .repository
            .delete_grant(salon_id, staff_subject.as_str(), event)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "no permissions stored for staff member '{staff_subject}' in salon '{salon_id}'"
            )));
        }

        info!(
            %salon_id,
            staff_subject = staff_subject.as_str(),
            "removed staff permissions"
        );

        Ok(())
    }

    async fn salon_owner(&self, salon_id: SalonId) -> AppResult<String> {
        self.salon_repository
            .find_owner(salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("salon '{salon_id}' does not exist")))
    }

    async fn authorize_edit(
        &self,
        actor: &UserIdentity,
        salon_id: SalonId,
        staff_subject: &str,
        permission_key: &str,
    ) -> AppResult<String> {
        let staff_subject = normalize_subject(staff_subject)?;
        self.require_permission(actor, salon_id, permission_key)
            .await?;

        if self.salon_owner(salon_id).await? == staff_subject {
            return Err(AppError::Validation(format!(
                "salon owner '{staff_subject}' holds every permission implicitly"
            )));
        }

        if staff_subject == actor.subject() {
            return Err(AppError::Forbidden(
                "staff members cannot change their own permissions".to_owned(),
            ));
        }

        Ok(staff_subject)
    }
}

fn normalize_subject(value: &str) -> AppResult<String> {
    Ok(NonEmptyString::new(value.trim())?.into())
}

fn audit_event(
    actor: &UserIdentity,
    salon_id: SalonId,
    action: AuditAction,
    staff_subject: &str,
    detail: String,
) -> AuditEvent {
    AuditEvent {
        salon_id,
        subject: actor.subject().to_owned(),
        action,
        resource_type: RESOURCE_TYPE.to_owned(),
        resource_id: staff_subject.to_owned(),
        detail: Some(detail),
    }
}
