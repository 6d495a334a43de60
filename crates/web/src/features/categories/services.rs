use storage::{
    CategoryStore, EntityStore,
    dto::{
        category::{CategoryFilter, CreateCategoryRequest},
        common::PaginationParams,
    },
    error::StorageError,
    models::Category,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create a new category
pub async fn create_category(
    store: &dyn EntityStore,
    request: CreateCategoryRequest,
) -> WebResult<Category> {
    let nome = request.nome.clone();

    match store.insert_category(&request.into_new()).await {
        Ok(category) => {
            tracing::info!(id = %category.id, nome = %category.nome, "Category created");
            Ok(category)
        }
        Err(e) if e.is_unique_violation() => {
            tracing::warn!(nome = %nome, "Duplicate category name");
            Err(WebError::Conflict(format!(
                "A category named {} already exists",
                nome
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// List categories, optionally filtered by name
pub async fn list_categories(
    store: &dyn EntityStore,
    filter: &CategoryFilter,
    pagination: &PaginationParams,
) -> WebResult<(Vec<Category>, i64)> {
    Ok(store.list_categories(filter, pagination).await?)
}

/// Get category by id
pub async fn get_category(store: &dyn EntityStore, id: Uuid) -> WebResult<Category> {
    store.find_category(id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::not_found("Category", id),
        other => other.into(),
    })
}
