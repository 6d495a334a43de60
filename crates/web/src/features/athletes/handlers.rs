use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    athlete::{
        AthleteFilter, AthleteResponse, AthleteSummaryResponse, CreateAthleteRequest,
        UpdateAthleteRequest,
    },
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
    path = "/atletas/",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteSummaryResponse),
        (status = 400, description = "Validation error or unknown categoria / centro_treinamento"),
        (status = 409, description = "An athlete with this cpf already exists")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(state.store(), req).await?;

    Ok((StatusCode::CREATED, Json(AthleteSummaryResponse::from(athlete))).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/",
    params(PaginationParams, AthleteFilter),
    responses(
        (status = 200, description = "Athletes retrieved successfully", body = PaginatedResponse<AthleteResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    AppQuery(pagination): AppQuery<PaginationParams>,
    AppQuery(filter): AppQuery<AthleteFilter>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (athletes, total_items) =
        services::list_athletes(state.store(), &filter, &pagination).await?;

    let response = PaginatedResponse::new(
        athletes.into_iter().map(AthleteResponse::from).collect(),
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(state.store(), id).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error or unknown categoria / centro_treinamento"),
        (status = 404, description = "Athlete not found"),
        (status = 409, description = "An athlete with this cpf already exists")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(update_req): AppJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(state.store(), id, &update_req).await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(state.store(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
