use async_trait::async_trait;
use beautycom_application::SalonRepository;
use beautycom_core::{AppError, AppResult, NonEmptyString, SalonId};
use sqlx::PgPool;

/// PostgreSQL-backed salon ownership repository.
#[derive(Clone)]
pub struct PostgresSalonRepository {
    pool: PgPool,
}

impl PostgresSalonRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalonRepository for PostgresSalonRepository {
    async fn find_owner(&self, salon_id: SalonId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT owner_subject
            FROM salons
            WHERE id = $1
            "#,
        )
        .bind(salon_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to resolve owner of salon '{salon_id}': {error}"
            ))
        })
    }

    async fn register_salon(&self, salon_id: SalonId, owner_subject: &str) -> AppResult<()> {
        let owner_subject = NonEmptyString::new(owner_subject.trim())?;

        sqlx::query(
            r#"
            INSERT INTO salons (id, owner_subject)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
            SET owner_subject = EXCLUDED.owner_subject
            "#,
        )
        .bind(salon_id.as_uuid())
        .bind(owner_subject.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to register salon '{salon_id}': {error}"))
        })?;

        Ok(())
    }
}
