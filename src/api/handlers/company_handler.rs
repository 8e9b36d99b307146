use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::search_dto::*},
    error::AppError,
};

pub async fn search_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let name = params.name.unwrap_or_default();
    debug!("Name search: {}", name);

    if name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let companies = state.search_service.search_by_name(&name).await;
    Ok(Json(CompanyListResponse::from(companies)))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting company: {}", id);

    let company = state
        .search_service
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Company not found: {}", id)))?;

    Ok(Json(company))
}
