use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::PathRejection},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use serde_json::Value;

use super::{Health, health, page, raw, require_numeric_params, require_query, single};
use crate::{
    AppState,
    error::{ApiError, AppResult},
    models::{Page, Review, TvShow},
    tmdb::Params,
};

type AppStateRef = State<Arc<AppState>>;

pub fn router() -> Router<Arc<AppState>> {
    let by_series = Router::new()
        .route("/{series_id}", get(details))
        .route("/{series_id}/images", get(images))
        .route("/{series_id}/credits", get(credits))
        .route("/{series_id}/external_ids", get(external_ids))
        .route("/{series_id}/recommendations", get(recommendations))
        .route("/{series_id}/reviews", get(reviews))
        .route("/{series_id}/similar", get(similar))
        .route("/{series_id}/videos", get(videos))
        .route("/{series_id}/watch/providers", get(watch_providers))
        .route_layer(middleware::from_fn(require_series_id));

    Router::new()
        .route("/health", get(tv_health))
        .route("/popular", get(popular))
        .route("/top_rated", get(top_rated))
        .route("/airing_today", get(airing_today))
        .route("/on_the_air", get(on_the_air))
        .route("/latest", get(latest))
        .route("/search", get(search))
        .merge(by_series)
}

async fn require_series_id(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let Path(params) = params.map_err(|_| ApiError::BadRequest("Invalid series ID"))?;
    require_numeric_params(&params, "Invalid series ID")?;
    Ok(next.run(request).await)
}

async fn tv_health() -> Json<Health> {
    health("TV Shows API is healthy")
}

async fn popular(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    page(&state, "/tv/popular", &params, "Failed to fetch popular TV shows", TvShow::from_raw).await
}

async fn top_rated(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    page(&state, "/tv/top_rated", &params, "Failed to fetch top rated TV shows", TvShow::from_raw)
        .await
}

async fn airing_today(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    let failure = "Failed to fetch TV shows airing today";
    page(&state, "/tv/airing_today", &params, failure, TvShow::from_raw).await
}

async fn on_the_air(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    page(&state, "/tv/on_the_air", &params, "Failed to fetch on the air TV shows", TvShow::from_raw)
        .await
}

async fn latest(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<TvShow>> {
    single(&state, "/tv/latest", &params, "Failed to fetch latest TV show", TvShow::from_raw).await
}

async fn search(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    require_query(&params)?;
    page(&state, "/search/tv", &params, "Failed to search TV shows", TvShow::from_raw).await
}

async fn details(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<TvShow>> {
    let endpoint = format!("/tv/{series_id}");
    single(&state, &endpoint, &params, "Failed to fetch TV show details", TvShow::from_raw).await
}

async fn images(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/tv/{series_id}/images"), &params, "Failed to fetch TV show images").await
}

async fn credits(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/tv/{series_id}/credits"), &params, "Failed to fetch TV show credits")
        .await
}

async fn external_ids(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/tv/{series_id}/external_ids");
    raw(&state, &endpoint, &params, "Failed to fetch TV show external IDs").await
}

async fn recommendations(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    let endpoint = format!("/tv/{series_id}/recommendations");
    page(&state, &endpoint, &params, "Failed to fetch TV show recommendations", TvShow::from_raw)
        .await
}

async fn reviews(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Review>>> {
    let endpoint = format!("/tv/{series_id}/reviews");
    page(&state, &endpoint, &params, "Failed to fetch TV show reviews", Review::from_raw).await
}

async fn similar(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<TvShow>>> {
    let endpoint = format!("/tv/{series_id}/similar");
    page(&state, &endpoint, &params, "Failed to fetch similar TV shows", TvShow::from_raw).await
}

async fn videos(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/tv/{series_id}/videos"), &params, "Failed to fetch TV show videos").await
}

async fn watch_providers(
    State(state): AppStateRef,
    Path(series_id): Path<String>,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/tv/{series_id}/watch/providers");
    raw(&state, &endpoint, &params, "Failed to fetch TV show watch providers").await
}
