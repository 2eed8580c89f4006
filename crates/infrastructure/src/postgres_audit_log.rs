use beautycom_application::AuditEvent;
use beautycom_core::{AppError, AppResult};
use sqlx::PgConnection;

/// Appends one audit event on the caller's connection, usually inside the
/// transaction that performed the audited write.
pub(crate) async fn insert_audit_event(
    connection: &mut PgConnection,
    event: AuditEvent,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_log_entries (
            salon_id,
            subject,
            action,
            resource_type,
            resource_id,
            detail
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(event.salon_id.as_uuid())
    .bind(event.subject)
    .bind(event.action.as_str())
    .bind(event.resource_type)
    .bind(event.resource_id)
    .bind(event.detail)
    .execute(connection)
    .await
    .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

    Ok(())
}
