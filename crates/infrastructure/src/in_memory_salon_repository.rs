use std::collections::HashMap;

use async_trait::async_trait;
use beautycom_application::SalonRepository;
use beautycom_core::{AppResult, NonEmptyString, SalonId};
use tokio::sync::RwLock;

/// In-memory salon ownership repository implementation.
#[derive(Debug, Default)]
pub struct InMemorySalonRepository {
    owners: RwLock<HashMap<SalonId, String>>,
}

impl InMemorySalonRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalonRepository for InMemorySalonRepository {
    async fn find_owner(&self, salon_id: SalonId) -> AppResult<Option<String>> {
        Ok(self.owners.read().await.get(&salon_id).cloned())
    }

    async fn register_salon(&self, salon_id: SalonId, owner_subject: &str) -> AppResult<()> {
        let owner_subject = NonEmptyString::new(owner_subject.trim())?;
        self.owners
            .write()
            .await
            .insert(salon_id, owner_subject.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use beautycom_application::SalonRepository;
    use beautycom_core::SalonId;

    use super::InMemorySalonRepository;

    #[tokio::test]
    async fn registered_owner_is_found_and_replaced() {
        let repository = InMemorySalonRepository::new();
        let salon_id = SalonId::new();

        assert!(repository.register_salon(salon_id, "owner").await.is_ok());
        assert!(matches!(
            repository.find_owner(salon_id).await,
            Ok(Some(owner)) if owner == "owner"
        ));

        assert!(repository.register_salon(salon_id, " new-owner ").await.is_ok());
        assert!(matches!(
            repository.find_owner(salon_id).await,
            Ok(Some(owner)) if owner == "new-owner"
        ));
        assert!(matches!(repository.find_owner(SalonId::new()).await, Ok(None)));
    }

    #[tokio::test]
    async fn blank_owner_is_rejected() {
        let repository = InMemorySalonRepository::new();
        assert!(repository.register_salon(SalonId::new(), " ").await.is_err());
    }
}
