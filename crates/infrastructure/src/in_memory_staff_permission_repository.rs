use std::collections::HashMap;

use async_trait::async_trait;
use beautycom_application::{
    AuditEvent, StaffPermissionRecord, StaffPermissionRepository, StaffPermissionToggle,
};
use beautycom_core::{AppResult, SalonId};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct InMemoryState {
    grants: HashMap<(SalonId, String), StaffPermissionRecord>,
    audit_events: Vec<AuditEvent>,
}

impl InMemoryState {
    fn append_audit_event(&mut self, event: AuditEvent) {
        debug!(
            salon_id = %event.salon_id,
            action = event.action.as_str(),
            resource_id = event.resource_id.as_str(),
            "audit event appended"
        );
        self.audit_events.push(event);
    }
}

/// In-memory staff permission repository implementation.
///
/// Grants and their audit trail share one lock, so every mutation and its
/// audit event land together.
#[derive(Debug, Default)]
pub struct InMemoryStaffPermissionRepository {
    state: RwLock<InMemoryState>,
}

impl InMemoryStaffPermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn audit_events(&self) -> Vec<AuditEvent> {
        self.state.read().await.audit_events.clone()
    }
}

#[async_trait]
impl StaffPermissionRepository for InMemoryStaffPermissionRepository {
    async fn find_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<Option<StaffPermissionRecord>> {
        Ok(self
            .state
            .read()
            .await
            .grants
            .get(&(salon_id, staff_subject.to_owned()))
            .cloned())
    }

    async fn list_grants_for_salon(
        &self,
        salon_id: SalonId,
    ) -> AppResult<Vec<StaffPermissionRecord>> {
        let state = self.state.read().await;

        let mut values: Vec<StaffPermissionRecord> = state
            .grants
            .iter()
            .filter_map(|((stored_salon_id, _), record)| {
                (stored_salon_id == &salon_id).then_some(record.clone())
            })
            .collect();
        values.sort_by(|left, right| left.staff_subject.cmp(&right.staff_subject));

        Ok(values)
    }

    async fn save_grant(&self, record: StaffPermissionRecord, event: AuditEvent) -> AppResult<()> {
        let mut state = self.state.write().await;
        state
            .grants
            .insert((record.salon_id, record.staff_subject.clone()), record);
        state.append_audit_event(event);
        Ok(())
    }

    async fn toggle_grant(
        &self,
        toggle: StaffPermissionToggle,
        event: AuditEvent,
    ) -> AppResult<StaffPermissionRecord> {
        let mut state = self.state.write().await;
        let key = (toggle.salon_id, toggle.staff_subject.clone());
        let current = state
            .grants
            .get(&key)
            .map(|record| record.grant.clone())
            .unwrap_or_default();

        let record = toggle.apply(&current);
        state.grants.insert(key, record.clone());
        state.append_audit_event(event);
        Ok(record)
    }

    async fn delete_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
        event: AuditEvent,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state
            .grants
            .remove(&(salon_id, staff_subject.to_owned()))
            .is_none()
        {
            return Ok(false);
        }

        state.append_audit_event(event);
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
