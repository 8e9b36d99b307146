use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::search_dto::*},
    error::AppError,
    models::search::SearchResponse,
};

pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.q.unwrap_or_default();
    debug!("Search via query string: {}", query);

    run_search(
        &state,
        &query,
        params.limit.unwrap_or(0),
        params.assist.unwrap_or(true),
    )
    .await
}

pub async fn search_post(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Search via request body: {}", request.query);

    run_search(
        &state,
        &request.query,
        request.limit.unwrap_or(0),
        request.use_assist,
    )
    .await
}

async fn run_search(
    state: &AppState,
    query: &str,
    limit: usize,
    use_assist: bool,
) -> Result<Json<SearchResponse>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Query cannot be empty".to_string()));
    }

    let response = state.search_service.search(query, limit, use_assist).await;
    Ok(Json(response))
}

pub async fn store_connection(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.search_service.test_connection().await)
}

pub async fn store_statistics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.search_service.get_statistics().await)
}
