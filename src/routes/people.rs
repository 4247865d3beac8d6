use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::PathRejection},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use serde_json::Value;

use super::{Health, health, page, raw, require_numeric_params, single};
use crate::{
    AppState,
    error::{ApiError, AppResult},
    models::{Page, Person},
    tmdb::Params,
};

type AppStateRef = State<Arc<AppState>>;

pub fn router() -> Router<Arc<AppState>> {
    let by_person = Router::new()
        .route("/{id}", get(details))
        .route("/{id}/movie_credits", get(movie_credits))
        .route("/{id}/tv_credits", get(tv_credits))
        .route("/{id}/images", get(images))
        .route("/{id}/external_ids", get(external_ids))
        .route_layer(middleware::from_fn(require_person_id));

    Router::new()
        .route("/health", get(people_health))
        .route("/popular", get(popular))
        .route("/search", get(search))
        .merge(by_person)
}

async fn require_person_id(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let Path(params) = params.map_err(|_| ApiError::BadRequest("Invalid person ID"))?;
    require_numeric_params(&params, "Invalid person ID")?;
    Ok(next.run(request).await)
}

async fn people_health() -> Json<Health> {
    health("People API is healthy")
}

async fn popular(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Person>>> {
    page(
        &state,
        "/person/popular",
        &params,
        "Failed to fetch popular people",
        Person::from_raw,
    )
    .await
}

/// Unlike the movie and TV searches, an empty `query` is forwarded as-is.
async fn search(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Person>>> {
    page(&state, "/search/person", &params, "Failed to search people", Person::from_raw).await
}

async fn details(
    State(state): AppStateRef,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Person>> {
    single(
        &state,
        &format!("/person/{id}"),
        &params,
        "Failed to fetch person details",
        Person::from_raw,
    )
    .await
}

async fn movie_credits(
    State(state): AppStateRef,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/person/{id}/movie_credits");
    raw(&state, &endpoint, &params, "Failed to fetch person movie credits").await
}

async fn tv_credits(
    State(state): AppStateRef,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/person/{id}/tv_credits");
    raw(&state, &endpoint, &params, "Failed to fetch person TV credits").await
}

async fn images(
    State(state): AppStateRef,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/person/{id}/images"), &params, "Failed to fetch person images").await
}

async fn external_ids(
    State(state): AppStateRef,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/person/{id}/external_ids");
    raw(&state, &endpoint, &params, "Failed to fetch person external IDs").await
}
