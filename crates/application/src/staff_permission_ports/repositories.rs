use async_trait::async_trait;
use beautycom_core::{AppResult, SalonId};
use beautycom_domain::{PermissionGrant, toggle_permission};
use chrono::{DateTime, Utc};

use super::AuditEvent;

/// Stored permission grant for one staff member of one salon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPermissionRecord {
    /// Salon the staff member works for.
    pub salon_id: SalonId,
    /// Staff member subject.
    pub staff_subject: String,
    /// Permission flags, closed under the dependency table.
    pub grant: PermissionGrant,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Single permission switch applied to whatever grant is stored when the
/// repository holds the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPermissionToggle {
    /// Salon the staff member works for.
    pub salon_id: SalonId,
    /// Staff member subject.
    pub staff_subject: String,
    /// Catalog key being switched.
    pub permission_key: String,
    /// Target state of the key.
    pub enabled: bool,
    /// Timestamp recorded on the updated grant.
    pub toggled_at: DateTime<Utc>,
}

impl StaffPermissionToggle {
    /// Returns the record produced by applying the toggle to the current grant.
    #[must_use]
    pub fn apply(&self, current: &PermissionGrant) -> StaffPermissionRecord {
        StaffPermissionRecord {
            salon_id: self.salon_id,
            staff_subject: self.staff_subject.clone(),
            grant: toggle_permission(current, &self.permission_key, self.enabled),
            updated_at: self.toggled_at,
        }
    }
}

/// Repository port for staff permission grants keyed by salon and staff member.
///
/// Every mutation carries its audit event; adapters persist both in one unit
/// of work or neither.
#[async_trait]
pub trait StaffPermissionRepository: Send + Sync {
    /// Finds the stored grant for one staff member.
    async fn find_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<Option<StaffPermissionRecord>>;

    /// Lists every stored grant of a salon, ordered by staff subject.
    async fn list_grants_for_salon(&self, salon_id: SalonId)
    -> AppResult<Vec<StaffPermissionRecord>>;

    /// Inserts or replaces a staff grant.
    async fn save_grant(&self, record: StaffPermissionRecord, event: AuditEvent) -> AppResult<()>;

    /// Applies a toggle to the stored grant (empty when absent) while holding
    /// the row exclusively, returning the new record.
    async fn toggle_grant(
        &self,
        toggle: StaffPermissionToggle,
        event: AuditEvent,
    ) -> AppResult<StaffPermissionRecord>;

    /// Deletes a staff grant, returning whether one existed.
    ///
    /// The audit event is only recorded when a grant was deleted.
    async fn delete_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
        event: AuditEvent,
    ) -> AppResult<bool>;
}

/// Repository port for salon ownership.
#[async_trait]
pub trait SalonRepository: Send + Sync {
    /// Returns the owner subject of a salon, `None` when the salon is unknown.
    async fn find_owner(&self, salon_id: SalonId) -> AppResult<Option<String>>;

    /// Registers a salon, replacing the owner of an existing one.
    async fn register_salon(&self, salon_id: SalonId, owner_subject: &str) -> AppResult<()>;
}
