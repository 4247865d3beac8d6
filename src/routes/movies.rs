use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    routing::get,
};
use serde_json::Value;

use super::{Health, health, is_numeric_id, page, raw, require_query, single};
use crate::{
    AppState,
    error::{ApiError, AppResult},
    models::{Movie, Page, Review},
    tmdb::Params,
};

type AppStateRef = State<Arc<AppState>>;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(movies_health))
        .route("/popular", get(popular))
        .route("/now_playing", get(now_playing))
        .route("/top_rated", get(top_rated))
        .route("/upcoming", get(upcoming))
        .route("/search", get(search))
        .route("/{id}", get(details))
        .route("/{id}/images", get(images))
        .route("/{id}/credits", get(credits))
        .route("/{id}/external_ids", get(external_ids))
        .route("/{id}/recommendations", get(recommendations))
        .route("/{id}/reviews", get(reviews))
        .route("/{id}/similar", get(similar))
        .route("/{id}/videos", get(videos))
        .route("/{id}/watch/providers", get(watch_providers))
}

/// A movie id that only matches digit-only path segments.
///
/// Anything else is answered as if no route matched, instead of the 400 that the
/// TV and people groups return from their id middleware.
pub struct MovieId(String);

impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) =
            Path::<String>::from_request_parts(parts, state).await.map_err(|_| ApiError::NotFound)?;
        if !is_numeric_id(&id) {
            return Err(ApiError::NotFound);
        }
        Ok(Self(id))
    }
}

async fn movies_health() -> Json<Health> {
    health("Movies API is healthy")
}

async fn popular(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    page(&state, "/movie/popular", &params, "Failed to fetch popular movies", Movie::from_raw).await
}

async fn now_playing(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    page(
        &state,
        "/movie/now_playing",
        &params,
        "Failed to fetch now playing movies",
        Movie::from_raw,
    )
    .await
}

async fn top_rated(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    page(&state, "/movie/top_rated", &params, "Failed to fetch top rated movies", Movie::from_raw)
        .await
}

async fn upcoming(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    page(
        &state,
        "/movie/upcoming",
        &params,
        "Failed to fetch upcoming movies",
        Movie::from_raw,
    )
    .await
}

async fn search(
    State(state): AppStateRef,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    require_query(&params)?;
    page(&state, "/search/movie", &params, "Failed to search movies", Movie::from_raw).await
}

async fn details(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Movie>> {
    single(
        &state,
        &format!("/movie/{id}"),
        &params,
        "Failed to fetch movie details",
        Movie::from_raw,
    )
    .await
}

async fn images(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/movie/{id}/images"), &params, "Failed to fetch movie images").await
}

async fn credits(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/movie/{id}/credits"), &params, "Failed to fetch movie credits").await
}

async fn external_ids(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/movie/{id}/external_ids"), &params, "Failed to fetch movie external IDs")
        .await
}

async fn recommendations(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    let endpoint = format!("/movie/{id}/recommendations");
    page(&state, &endpoint, &params, "Failed to fetch movie recommendations", Movie::from_raw).await
}

async fn reviews(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Review>>> {
    let endpoint = format!("/movie/{id}/reviews");
    page(&state, &endpoint, &params, "Failed to fetch movie reviews", Review::from_raw).await
}

async fn similar(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Page<Movie>>> {
    let endpoint = format!("/movie/{id}/similar");
    page(&state, &endpoint, &params, "Failed to fetch similar movies", Movie::from_raw).await
}

async fn videos(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    raw(&state, &format!("/movie/{id}/videos"), &params, "Failed to fetch movie videos").await
}

async fn watch_providers(
    State(state): AppStateRef,
    MovieId(id): MovieId,
    Query(params): Query<Params>,
) -> AppResult<Json<Value>> {
    let endpoint = format!("/movie/{id}/watch/providers");
    raw(&state, &endpoint, &params, "Failed to fetch movie watch providers").await
}
