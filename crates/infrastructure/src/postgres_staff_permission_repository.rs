use std::collections::BTreeMap;

use async_trait::async_trait;
use beautycom_application::{
    AuditEvent, StaffPermissionRecord, StaffPermissionRepository, StaffPermissionToggle,
};
use beautycom_core::{AppError, AppResult, SalonId};
use beautycom_domain::PermissionGrant;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::postgres_audit_log::insert_audit_event;

/// PostgreSQL-backed staff permission repository.
///
/// Grants are stored as one JSONB object per `(salon, staff member)` row.
#[derive(Clone)]
pub struct PostgresStaffPermissionRepository {
    pool: PgPool,
}

impl PostgresStaffPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StaffPermissionRow {
    salon_id: Uuid,
    staff_subject: String,
    permissions: Json<BTreeMap<String, bool>>,
    updated_at: DateTime<Utc>,
}

impl From<StaffPermissionRow> for StaffPermissionRecord {
    fn from(row: StaffPermissionRow) -> Self {
        Self {
            salon_id: SalonId::from_uuid(row.salon_id),
            staff_subject: row.staff_subject,
            grant: PermissionGrant::from(row.permissions.0),
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StaffPermissionRepository for PostgresStaffPermissionRepository {
    async fn find_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
    ) -> AppResult<Option<StaffPermissionRecord>> {
        let row = sqlx::query_as::<_, StaffPermissionRow>(
            r#"
            SELECT salon_id, staff_subject, permissions, updated_at
            FROM salon_staff_permissions
            WHERE salon_id = $1 AND staff_subject = $2
            "#,
        )
        .bind(salon_id.as_uuid())
        .bind(staff_subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load permissions of '{staff_subject}' in salon '{salon_id}': {error}"
            ))
        })?;

        Ok(row.map(StaffPermissionRecord::from))
    }

    async fn list_grants_for_salon(
        &self,
        salon_id: SalonId,
    ) -> AppResult<Vec<StaffPermissionRecord>> {
        let rows = sqlx::query_as::<_, StaffPermissionRow>(
            r#"
            SELECT salon_id, staff_subject, permissions, updated_at
            FROM salon_staff_permissions
            WHERE salon_id = $1
            ORDER BY staff_subject
            "#,
        )
        .bind(salon_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list staff permissions of salon '{salon_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(StaffPermissionRecord::from).collect())
    }

    async fn save_grant(&self, record: StaffPermissionRecord, event: AuditEvent) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        upsert_grant(&mut transaction, &record).await?;
        insert_audit_event(&mut transaction, event).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }

    async fn toggle_grant(
        &self,
        toggle: StaffPermissionToggle,
        event: AuditEvent,
    ) -> AppResult<StaffPermissionRecord> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        // Create the row first so concurrent toggles of a new staff member
        // serialize on its lock.
        sqlx::query(
            r#"
            INSERT INTO salon_staff_permissions (salon_id, staff_subject, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (salon_id, staff_subject) DO NOTHING
            "#,
        )
        .bind(toggle.salon_id.as_uuid())
        .bind(toggle.staff_subject.as_str())
        .bind(toggle.toggled_at)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to prepare permissions of '{}' in salon '{}': {error}",
                toggle.staff_subject, toggle.salon_id
            ))
        })?;

        let current = sqlx::query_scalar::<_, Json<BTreeMap<String, bool>>>(
            r#"
            SELECT permissions
            FROM salon_staff_permissions
            WHERE salon_id = $1 AND staff_subject = $2
            FOR UPDATE
            "#,
        )
        .bind(toggle.salon_id.as_uuid())
        .bind(toggle.staff_subject.as_str())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to lock permissions of '{}' in salon '{}': {error}",
                toggle.staff_subject, toggle.salon_id
            ))
        })?;

        let record = toggle.apply(&PermissionGrant::from(current.0));
        upsert_grant(&mut transaction, &record).await?;
        insert_audit_event(&mut transaction, event).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(record)
    }

    async fn delete_grant(
        &self,
        salon_id: SalonId,
        staff_subject: &str,
        event: AuditEvent,
    ) -> AppResult<bool> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        let result = sqlx::query(
            r#"
            DELETE FROM salon_staff_permissions
            WHERE salon_id = $1 AND staff_subject = $2
            "#,
        )
        .bind(salon_id.as_uuid())
        .bind(staff_subject)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete permissions of '{staff_subject}' in salon '{salon_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        insert_audit_event(&mut transaction, event).await?;
        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(true)
    }
}

async fn upsert_grant(
    connection: &mut PgConnection,
    record: &StaffPermissionRecord,
) -> AppResult<()> {
    let permissions: BTreeMap<String, bool> = record.grant.clone().into();

    sqlx::query(
        r#"
        INSERT INTO salon_staff_permissions (salon_id, staff_subject, permissions, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (salon_id, staff_subject) DO UPDATE
        SET permissions = EXCLUDED.permissions,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(record.salon_id.as_uuid())
    .bind(record.staff_subject.as_str())
    .bind(Json(permissions))
    .bind(record.updated_at)
    .execute(connection)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to save permissions of '{}' in salon '{}': {error}",
            record.staff_subject, record.salon_id
        ))
    })?;

    Ok(())
}
