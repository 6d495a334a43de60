use storage::{
    AthleteStore, CategoryStore, EntityStore, TrainingCenterStore,
    dto::{
        athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest},
        common::PaginationParams,
    },
    error::StorageError,
    models::{AthleteRecord, Category, TrainingCenter},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

async fn resolve_category(store: &dyn EntityStore, nome: &str) -> WebResult<Category> {
    store
        .find_category_by_name(nome)
        .await?
        .ok_or_else(|| {
            tracing::warn!(nome = %nome, "Athlete references unknown category");
            WebError::InvalidReference {
                field: "categoria",
                name: nome.to_string(),
            }
        })
}

async fn resolve_training_center(store: &dyn EntityStore, nome: &str) -> WebResult<TrainingCenter> {
    store
        .find_training_center_by_name(nome)
        .await?
        .ok_or_else(|| {
            tracing::warn!(nome = %nome, "Athlete references unknown training center");
            WebError::InvalidReference {
                field: "centro_treinamento",
                name: nome.to_string(),
            }
        })
}

fn map_write_error(error: StorageError, cpf: &str) -> WebError {
    if error.is_unique_violation() {
        tracing::warn!(cpf = %cpf, "Duplicate athlete cpf");
        return WebError::Conflict(format!(
            "An athlete with cpf {} is already registered",
            cpf
        ));
    }
    error.into()
}

/// Register a new athlete.
///
/// Resolves the category and training center by exact name, then inserts the
/// row pointing at their internal keys. The lookups are read-only, so a failed
/// insert leaves no state behind.
pub async fn create_athlete(
    store: &dyn EntityStore,
    request: CreateAthleteRequest,
) -> WebResult<AthleteRecord> {
    let category = resolve_category(store, &request.categoria.nome).await?;
    let center = resolve_training_center(store, &request.centro_treinamento.nome).await?;

    let row = request.into_row(&category, &center);

    let record = store
        .insert_athlete(&row)
        .await
        .map_err(|e| map_write_error(e, &row.cpf))?;

    tracing::info!(id = %record.athlete.id, "Athlete created");
    Ok(record)
}

/// List athletes filtered by name substring and/or exact cpf
pub async fn list_athletes(
    store: &dyn EntityStore,
    filter: &AthleteFilter,
    pagination: &PaginationParams,
) -> WebResult<(Vec<AthleteRecord>, i64)> {
    Ok(store.list_athletes(filter, pagination).await?)
}

/// Get athlete by id
pub async fn get_athlete(store: &dyn EntityStore, id: Uuid) -> WebResult<AthleteRecord> {
    store.find_athlete(id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::not_found("Athlete", id),
        other => other.into(),
    })
}

/// Apply a partial update.
///
/// Category and training center changes go through the same by-name
/// resolution as registration.
pub async fn update_athlete(
    store: &dyn EntityStore,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> WebResult<AthleteRecord> {
    let existing = get_athlete(store, id).await?;

    let category = match &request.categoria {
        Some(reference) => Some(resolve_category(store, &reference.nome).await?),
        None => None,
    };
    let center = match &request.centro_treinamento {
        Some(reference) => Some(resolve_training_center(store, &reference.nome).await?),
        None => None,
    };

    let updated = request.apply(existing.athlete, category.as_ref(), center.as_ref());

    let record = store
        .update_athlete(&updated)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::not_found("Athlete", id),
            other => map_write_error(other, &updated.cpf),
        })?;

    tracing::info!(id = %id, "Athlete updated");
    Ok(record)
}

/// Delete an athlete
pub async fn delete_athlete(store: &dyn EntityStore, id: Uuid) -> WebResult<()> {
    let athlete = get_athlete(store, id).await?;

    store
        .delete_athlete(athlete.athlete.id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::not_found("Athlete", id),
            other => other.into(),
        })?;

    tracing::info!(id = %id, "Athlete deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{
        MemoryStore,
        dto::{
            category::CreateCategoryRequest, common::NameRef,
            training_center::CreateTrainingCenterRequest,
        },
    };

    use crate::features::{categories, training_centers};

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        categories::services::create_category(
            &store,
            CreateCategoryRequest {
                nome: "Scale".to_string(),
            },
        )
        .await
        .unwrap();
        categories::services::create_category(
            &store,
            CreateCategoryRequest {
                nome: "RX".to_string(),
            },
        )
        .await
        .unwrap();
        training_centers::services::create_training_center(
            &store,
            CreateTrainingCenterRequest {
                nome: "CT King".to_string(),
                endereco: "Rua X".to_string(),
                proprietario: "Fernando".to_string(),
            },
        )
        .await
        .unwrap();
        store
    }

    fn request(cpf: &str) -> CreateAthleteRequest {
        CreateAthleteRequest {
            nome: "Joao".to_string(),
            cpf: cpf.to_string(),
            idade: 30,
            peso: 75.5,
            altura: 1.7,
            sexo: "M".to_string(),
            categoria: NameRef::new("Scale"),
            centro_treinamento: NameRef::new("CT King"),
        }
    }

    async fn athlete_count(store: &MemoryStore) -> i64 {
        list_athletes(store, &AthleteFilter::default(), &PaginationParams::default())
            .await
            .unwrap()
            .1
    }

    #[tokio::test]
    async fn test_create_resolves_references_by_name() {
        let store = seeded_store().await;
        let record = create_athlete(&store, request("11111111111")).await.unwrap();

        assert_eq!(record.categoria_nome, "Scale");
        assert_eq!(record.centro_treinamento_nome, "CT King");
        assert_eq!(record.athlete.cpf, "11111111111");
    }

    #[tokio::test]
    async fn test_unknown_category_is_invalid_reference_and_persists_nothing() {
        let store = seeded_store().await;
        let mut req = request("11111111111");
        req.categoria = NameRef::new("Ghost");

        let err = create_athlete(&store, req).await.unwrap_err();
        assert!(matches!(
            err,
            WebError::InvalidReference { field: "categoria", ref name } if name == "Ghost"
        ));
        assert_eq!(athlete_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_training_center_is_invalid_reference() {
        let store = seeded_store().await;
        let mut req = request("11111111111");
        req.centro_treinamento = NameRef::new("CT Ghost");

        let err = create_athlete(&store, req).await.unwrap_err();
        assert!(matches!(
            err,
            WebError::InvalidReference {
                field: "centro_treinamento",
                ..
            }
        ));
        assert_eq!(athlete_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_conflict() {
        let store = seeded_store().await;
        create_athlete(&store, request("11111111111")).await.unwrap();

        let err = create_athlete(&store, request("11111111111"))
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Conflict(ref msg) if msg.contains("11111111111")));

        let filter = AthleteFilter {
            cpf: Some("11111111111".to_string()),
            ..Default::default()
        };
        let (_, total) = list_athletes(&store, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_cpf_admits_exactly_one() {
        let store = seeded_store().await;
        let other = store.clone();

        let (first, second) = tokio::join!(
            create_athlete(&store, request("33333333333")),
            create_athlete(&other, request("33333333333")),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(WebError::Conflict(_))))
        );

        let filter = AthleteFilter {
            cpf: Some("33333333333".to_string()),
            ..Default::default()
        };
        let (_, total) = list_athletes(&store, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_cpf_on_threads() {
        let store = seeded_store().await;

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { create_athlete(&store, request("44444444444")).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(WebError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((created, conflicts), (1, 1));
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_given_fields() {
        let store = seeded_store().await;
        let created = create_athlete(&store, request("11111111111")).await.unwrap();

        let update = UpdateAthleteRequest {
            idade: Some(31),
            ..Default::default()
        };
        let updated = update_athlete(&store, created.athlete.id, &update)
            .await
            .unwrap();

        assert_eq!(updated.athlete.idade, 31);
        assert_eq!(updated.athlete.nome, created.athlete.nome);
        assert_eq!(updated.athlete.cpf, created.athlete.cpf);
        assert_eq!(updated.athlete.peso, created.athlete.peso);
        assert_eq!(updated.athlete.altura, created.athlete.altura);
        assert_eq!(updated.athlete.sexo, created.athlete.sexo);
        assert_eq!(updated.athlete.created_at, created.athlete.created_at);
        assert_eq!(updated.categoria_nome, created.categoria_nome);
        assert_eq!(updated.centro_treinamento_nome, created.centro_treinamento_nome);
    }

    #[tokio::test]
    async fn test_update_reassigns_category_by_name() {
        let store = seeded_store().await;
        let created = create_athlete(&store, request("11111111111")).await.unwrap();

        let update = UpdateAthleteRequest {
            categoria: Some(NameRef::new("RX")),
            ..Default::default()
        };
        let updated = update_athlete(&store, created.athlete.id, &update)
            .await
            .unwrap();
        assert_eq!(updated.categoria_nome, "RX");

        let update = UpdateAthleteRequest {
            categoria: Some(NameRef::new("Ghost")),
            ..Default::default()
        };
        let err = update_athlete(&store, created.athlete.id, &update)
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_update_to_taken_cpf_is_conflict() {
        let store = seeded_store().await;
        create_athlete(&store, request("11111111111")).await.unwrap();
        let second = create_athlete(&store, request("22222222222")).await.unwrap();

        let update = UpdateAthleteRequest {
            cpf: Some("11111111111".to_string()),
            ..Default::default()
        };
        let err = update_athlete(&store, second.athlete.id, &update)
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_athlete_is_not_found() {
        let store = seeded_store().await;
        let err = update_athlete(&store, Uuid::new_v4(), &UpdateAthleteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = seeded_store().await;
        let created = create_athlete(&store, request("11111111111")).await.unwrap();

        delete_athlete(&store, created.athlete.id).await.unwrap();

        let err = get_athlete(&store, created.athlete.id).await.unwrap_err();
        assert!(matches!(err, WebError::NotFound(_)));
        let err = delete_athlete(&store, created.athlete.id).await.unwrap_err();
        assert!(matches!(err, WebError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_name_and_cpf() {
        let store = seeded_store().await;
        create_athlete(&store, request("11111111111")).await.unwrap();
        let mut maria = request("22222222222");
        maria.nome = "Maria".to_string();
        create_athlete(&store, maria).await.unwrap();

        let filter = AthleteFilter {
            nome: Some("mar".to_string()),
            ..Default::default()
        };
        let (athletes, total) = list_athletes(&store, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(athletes[0].athlete.nome, "Maria");

        let filter = AthleteFilter {
            cpf: Some("1111111111".to_string()),
            ..Default::default()
        };
        let (_, total) = list_athletes(&store, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 0, "cpf filter is exact, not substring");
    }
}
