use beautycom_application::SalonRepository;
use beautycom_core::{AppResult, SalonId};
use tracing::info;

/// Registers the configured salon owners, replacing owners of existing salons.
pub async fn run(
    salon_repository: &dyn SalonRepository,
    salon_owners: &[(SalonId, String)],
) -> AppResult<()> {
    for (salon_id, owner_subject) in salon_owners {
        salon_repository
            .register_salon(*salon_id, owner_subject)
            .await?;
        info!(
            %salon_id,
            owner_subject = owner_subject.as_str(),
            "registered salon owner"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use beautycom_application::SalonRepository;
    use beautycom_core::SalonId;
    use beautycom_infrastructure::InMemorySalonRepository;

    use super::run;

    #[tokio::test]
    async fn configured_owners_are_registered() {
        let repository = InMemorySalonRepository::new();
        let first = SalonId::new();
        let second = SalonId::new();

        let seeded = run(
            &repository,
            &[(first, "owner-a".to_owned()), (second, "owner-b".to_owned())],
        )
        .await;
        assert!(seeded.is_ok());

        assert!(matches!(
            repository.find_owner(first).await,
            Ok(Some(owner)) if owner == "owner-a"
        ));
        assert!(matches!(
            repository.find_owner(second).await,
            Ok(Some(owner)) if owner == "owner-b"
        ));
    }
}
