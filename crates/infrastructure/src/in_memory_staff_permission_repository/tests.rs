use std::sync::Arc;

use beautycom_application::{
    AuditEvent, StaffPermissionRecord, StaffPermissionRepository, StaffPermissionToggle,
};
use beautycom_core::SalonId;
use beautycom_domain::{AuditAction, PermissionGrant};
use chrono::Utc;

use super::InMemoryStaffPermissionRepository;

fn record(salon_id: SalonId, staff_subject: &str, grant: PermissionGrant) -> StaffPermissionRecord {
    StaffPermissionRecord {
        salon_id,
        staff_subject: staff_subject.to_owned(),
        grant,
        updated_at: Utc::now(),
    }
}

fn event(salon_id: SalonId, action: AuditAction, staff_subject: &str) -> AuditEvent {
    AuditEvent {
        salon_id,
        subject: "owner".to_owned(),
        action,
        resource_type: "staff_permissions".to_owned(),
        resource_id: staff_subject.to_owned(),
        detail: None,
    }
}

fn toggle(salon_id: SalonId, staff_subject: &str, key: &str) -> StaffPermissionToggle {
    StaffPermissionToggle {
        salon_id,
        staff_subject: staff_subject.to_owned(),
        permission_key: key.to_owned(),
        enabled: true,
        toggled_at: Utc::now(),
    }
}

async fn save(
    repository: &InMemoryStaffPermissionRepository,
    salon_id: SalonId,
    staff_subject: &str,
    grant: PermissionGrant,
) {
    let saved = repository
        .save_grant(
            record(salon_id, staff_subject, grant),
            event(salon_id, AuditAction::StaffPermissionsUpdated, staff_subject),
        )
        .await;
    assert!(saved.is_ok());
}

#[tokio::test]
async fn grants_are_partitioned_by_salon_and_sorted() {
    let repository = InMemoryStaffPermissionRepository::new();
    let salon_id = SalonId::new();
    let other_salon_id = SalonId::new();

    save(&repository, salon_id, "zoe", PermissionGrant::new()).await;
    save(&repository, salon_id, "ana", PermissionGrant::new()).await;
    save(&repository, other_salon_id, "bob", PermissionGrant::new()).await;

    let listed = repository.list_grants_for_salon(salon_id).await;
    let subjects: Vec<String> = listed
        .unwrap_or_default()
        .into_iter()
        .map(|record| record.staff_subject)
        .collect();
    assert_eq!(subjects, vec!["ana".to_owned(), "zoe".to_owned()]);
    assert_eq!(repository.audit_events().await.len(), 3);
}

#[tokio::test]
async fn save_replaces_existing_grant() {
    let repository = InMemoryStaffPermissionRepository::new();
    let salon_id = SalonId::new();

    save(
        &repository,
        salon_id,
        "ana",
        PermissionGrant::from_flags([("reports.view", true)]),
    )
    .await;
    save(
        &repository,
        salon_id,
        "ana",
        PermissionGrant::from_flags([("appointments.view", true)]),
    )
    .await;

    let found = repository.find_grant(salon_id, "ana").await;
    assert!(matches!(
        found,
        Ok(Some(record)) if record.grant.granted_keys() == vec!["appointments.view"]
    ));
}

#[tokio::test]
async fn toggle_starts_from_stored_grant() {
    let repository = InMemoryStaffPermissionRepository::new();
    let salon_id = SalonId::new();
    save(
        &repository,
        salon_id,
        "ana",
        PermissionGrant::from_flags([("reports.view", true)]),
    )
    .await;

    let toggled = repository
        .toggle_grant(
            toggle(salon_id, "ana", "appointments.cancel"),
            event(salon_id, AuditAction::StaffPermissionToggled, "ana"),
        )
        .await;

    assert!(matches!(
        toggled,
        Ok(record) if record.grant.granted_keys()
            == vec!["appointments.cancel", "appointments.view", "reports.view"]
    ));
    let actions: Vec<AuditAction> = repository
        .audit_events()
        .await
        .into_iter()
        .map(|event| event.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::StaffPermissionsUpdated,
            AuditAction::StaffPermissionToggled,
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_are_all_applied() {
    let repository = Arc::new(InMemoryStaffPermissionRepository::new());
    let salon_id = SalonId::new();
    let keys = [
        "appointments.cancel",
        "appointments.reschedule",
        "reports.export",
        "reports.financial_reports",
        "salon_info.edit_photos",
        "system_settings.edit",
        "content_management.moderate_posts",
    ];

    let tasks: Vec<_> = keys
        .iter()
        .map(|key| {
            let repository = Arc::clone(&repository);
            let key = (*key).to_owned();
            tokio::spawn(async move {
                repository
                    .toggle_grant(
                        toggle(salon_id, "bob", &key),
                        event(salon_id, AuditAction::StaffPermissionToggled, "bob"),
                    )
                    .await
                    .is_ok()
            })
        })
        .collect();
    for task in tasks {
        assert!(matches!(task.await, Ok(true)));
    }

    let stored = repository.find_grant(salon_id, "bob").await;
    assert!(matches!(
        stored,
        Ok(Some(record)) if keys.iter().all(|key| record.grant.is_granted(key))
    ));
    assert_eq!(repository.audit_events().await.len(), keys.len());
}

#[tokio::test]
async fn delete_reports_missing_rows_and_audits_only_real_deletes() {
    let repository = InMemoryStaffPermissionRepository::new();
    let salon_id = SalonId::new();
    save(&repository, salon_id, "ana", PermissionGrant::new()).await;

    let revoked = || event(salon_id, AuditAction::StaffPermissionsRevoked, "ana");
    assert!(matches!(
        repository.delete_grant(salon_id, "ana", revoked()).await,
        Ok(true)
    ));
    assert!(matches!(
        repository.delete_grant(salon_id, "ana", revoked()).await,
        Ok(false)
    ));
    assert_eq!(repository.audit_events().await.len(), 2);
}
