use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{PaginatedResponse, PaginationParams},
    training_center::{CreateTrainingCenterRequest, TrainingCenterFilter, TrainingCenterResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/centro_treinamento/",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Training center name already exists")
    ),
    tag = "centro_treinamento"
)]
pub async fn create_training_center(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_training_center(state.store(), req).await?;

    Ok((StatusCode::CREATED, Json(TrainingCenterResponse::from(center))).into_response())
}

#[utoipa::path(
    get,
    path = "/centro_treinamento/",
    params(PaginationParams, TrainingCenterFilter),
    responses(
        (status = 200, description = "Training centers retrieved successfully", body = PaginatedResponse<TrainingCenterResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "centro_treinamento"
)]
pub async fn list_training_centers(
    State(state): State<AppState>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<TrainingCenterFilter>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (centers, total_items) =
        services::list_training_centers(state.store(), &filter, &pagination).await?;

    let response = PaginatedResponse::new(
        centers.into_iter().map(TrainingCenterResponse::from).collect(),
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/centro_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "centro_treinamento"
)]
pub async fn get_training_center(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(state.store(), id).await?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}
