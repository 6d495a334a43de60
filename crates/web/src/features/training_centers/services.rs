use storage::{
    EntityStore, TrainingCenterStore,
    dto::{
        common::PaginationParams,
        training_center::{CreateTrainingCenterRequest, TrainingCenterFilter},
    },
    error::StorageError,
    models::TrainingCenter,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create a new training center
pub async fn create_training_center(
    store: &dyn EntityStore,
    request: CreateTrainingCenterRequest,
) -> WebResult<TrainingCenter> {
    let nome = request.nome.clone();

    match store.insert_training_center(&request.into_new()).await {
        Ok(center) => {
            tracing::info!(id = %center.id, nome = %center.nome, "Training center created");
            Ok(center)
        }
        Err(e) if e.is_unique_violation() => {
            tracing::warn!(nome = %nome, "Duplicate training center name");
            Err(WebError::Conflict(format!(
                "A training center named {} already exists",
                nome
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// List training centers, optionally filtered by name
pub async fn list_training_centers(
    store: &dyn EntityStore,
    filter: &TrainingCenterFilter,
    pagination: &PaginationParams,
) -> WebResult<(Vec<TrainingCenter>, i64)> {
    Ok(store.list_training_centers(filter, pagination).await?)
}

/// Get training center by id
pub async fn get_training_center(store: &dyn EntityStore, id: Uuid) -> WebResult<TrainingCenter> {
    store.find_training_center(id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::not_found("Training center", id),
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStore;

    fn request(nome: &str) -> CreateTrainingCenterRequest {
        CreateTrainingCenterRequest {
            nome: nome.to_string(),
            endereco: "Rua X, Q 5".to_string(),
            proprietario: "Fernando".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let created = create_training_center(&store, request("CT King"))
            .await
            .unwrap();

        let fetched = get_training_center(&store, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.endereco, "Rua X, Q 5");
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let store = MemoryStore::new();
        create_training_center(&store, request("CT King")).await.unwrap();
        create_training_center(&store, request("Box Norte")).await.unwrap();

        let filter = TrainingCenterFilter {
            nome: Some("king".to_string()),
        };
        let (centers, total) =
            list_training_centers(&store, &filter, &PaginationParams::default())
                .await
                .unwrap();
        assert_eq!(total, 1);
        assert_eq!(centers[0].nome, "CT King");

        let (all, total) = list_training_centers(
            &store,
            &TrainingCenterFilter::default(),
            &PaginationParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(total, 2);
        assert_eq!(all[0].nome, "CT King");
        assert_eq!(all[1].nome, "Box Norte");
    }

    #[tokio::test]
    async fn test_get_unknown_training_center_is_not_found() {
        let store = MemoryStore::new();
        let err = get_training_center(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::NotFound(_)));
    }
}
