//! Endpoints that are not tied to a single media kind.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;

use super::{Health, health, page, raw, require_query};
use crate::{
    AppState,
    error::{ApiError, AppResult},
    models::{Page, SearchResult},
    tmdb::Params,
};

type AppStateRef = State<Arc<AppState>>;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(api_health))
        .route("/validate-key", get(validate_key))
        .route("/search/multi", get(search_multi))
        .route("/search/collection", get(search_collection))
        .route("/search/company", get(search_company))
        .route("/search/keyword", get(search_keyword))
        .route("/trending/{media_type}/{time_window}", get(trending))
        .route("/genres/movie", get(movie_genres))
        .route("/genres/tv", get(tv_genres))
}

async fn api_health() -> Json<Health> {
    health("API is healthy")
}

#[derive(Debug, Serialize)]
struct KeyStatus {
    valid: bool,
}

async fn validate_key(State(state): AppStateRef) -> (StatusCode, Json<KeyStatus>) {
    let valid = state.tmdb.validate_key().await;
    let status = if valid { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (status, Json(KeyStatus { valid }))
}

async fn search_multi(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<SearchResult>>> {
    require_query(&params)?;
    page(&state, "/search/multi", &params, "Failed to perform multi search", SearchResult::from_raw)
        .await
}

async fn search_collection(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    require_query(&params)?;
    raw(&state, "/search/collection", &params, "Failed to search collections").await
}

async fn search_company(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    require_query(&params)?;
    raw(&state, "/search/company", &params, "Failed to search companies").await
}

async fn search_keyword(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    require_query(&params)?;
    raw(&state, "/search/keyword", &params, "Failed to search keywords").await
}

async fn trending(
    State(state): AppStateRef,
    path: Result<Path<(String, String)>, PathRejection>,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<SearchResult>>> {
    let Path((media_type, time_window)) =
        path.map_err(|_| ApiError::BadRequest("Invalid trending path"))?;
    if !matches!(media_type.as_str(), "all" | "movie" | "tv" | "person") {
        return Err(ApiError::BadRequest("Media type must be one of all, movie, tv, person"));
    }
    if !matches!(time_window.as_str(), "day" | "week") {
        return Err(ApiError::BadRequest("Time window must be day or week"));
    }

    let endpoint = format!("/trending/{media_type}/{time_window}");
    page(&state, &endpoint, &params, "Failed to fetch trending media", SearchResult::from_raw).await
}

async fn movie_genres(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, "/genre/movie/list", &params, "Failed to fetch movie genres").await
}

async fn tv_genres(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, "/genre/tv/list", &params, "Failed to fetch TV genres").await
}
