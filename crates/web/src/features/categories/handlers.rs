use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    category::{CategoryFilter, CategoryResponse, CreateCategoryRequest},
    common::{PaginatedResponse, PaginationParams},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/categorias/",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(state.store(), req).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/",
    params(PaginationParams, CategoryFilter),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = PaginatedResponse<CategoryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<CategoryFilter>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (categories, total_items) =
        services::list_categories(state.store(), &filter, &pagination).await?;

    let response = PaginatedResponse::new(
        categories.into_iter().map(CategoryResponse::from).collect(),
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(state.store(), id).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}
