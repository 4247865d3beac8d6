mod movies;
mod people;
mod search;
mod tv;

use std::{collections::HashMap, sync::Arc};

use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::{
    AppState,
    error::{ApiError, AppResult},
    models::Page,
    tmdb::Params,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(search::router())
        .nest("/movies", movies::router())
        .nest("/tv", tv::router())
        .nest("/people", people::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[derive(Debug, Serialize)]
pub struct Health {
    message: &'static str,
}

pub fn health(message: &'static str) -> Json<Health> {
    Json(Health { message })
}

/// Rejects the request unless a non-empty `query` param is present.
pub fn require_query(params: &Params) -> AppResult<()> {
    match params.iter().find(|(k, _)| k == "query") {
        Some((_, q)) if !q.is_empty() => Ok(()),
        _ => Err(ApiError::BadRequest("Query parameter is required")),
    }
}

pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Checks every captured path segment; used by the groups that validate ids in middleware.
pub fn require_numeric_params(
    params: &HashMap<String, String>,
    message: &'static str,
) -> AppResult<()> {
    if params.values().all(|v| is_numeric_id(v)) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(message))
    }
}

pub async fn raw(
    state: &AppState,
    endpoint: &str,
    params: &Params,
    failure: &'static str,
) -> AppResult<Json<Value>> {
    let value = state.tmdb.fetch(endpoint, params).await.map_err(ApiError::upstream(failure))?;
    Ok(Json(value))
}

pub async fn single<T>(
    state: &AppState,
    endpoint: &str,
    params: &Params,
    failure: &'static str,
    normalize: fn(&Value) -> T,
) -> AppResult<Json<T>> {
    let value = state.tmdb.fetch(endpoint, params).await.map_err(ApiError::upstream(failure))?;
    Ok(Json(normalize(&value)))
}

pub async fn page<T>(
    state: &AppState,
    endpoint: &str,
    params: &Params,
    failure: &'static str,
    normalize: fn(&Value) -> T,
) -> AppResult<Json<Page<T>>> {
    let value = state.tmdb.fetch(endpoint, params).await.map_err(ApiError::upstream(failure))?;
    Ok(Json(Page::from_raw(value, normalize)))
}
