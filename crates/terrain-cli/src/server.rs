//! JSON service over the contribution pipeline.
//!
//! Every request re-fetches from the configured source; nothing is cached
//! between requests.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use terrain_core::{
    ContributionStats, DateWindow, GitHubUser, InteractionState, LayoutOptions, TOP_REPOSITORIES,
    layout, normalize_user, plan, top_repositories,
};
use terrain_source::{AnySource, ContributionSource, FetchError, FetchRequest};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    source: AnySource,
}

impl AppState {
    pub fn new(source: AnySource) -> Self {
        Self { source }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/github/{login}/stats", get(stats))
        .route("/api/github/{login}/points", get(points))
        .route("/api/github/{login}/terrain", get(terrain))
        .route("/api/github/{login}/repos", get(repos))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Default, Deserialize)]
struct WindowQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct TerrainQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    #[serde(default)]
    instanced: bool,
    #[serde(default = "default_center")]
    center: bool,
}

fn default_center() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct ReposQuery {
    limit: Option<usize>,
}

struct ApiError(FetchError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            FetchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        let body = Json(serde_json::json!({ "error": self.0.message() }));
        (status, body).into_response()
    }
}

async fn fetch(
    state: &AppState,
    login: String,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<GitHubUser, ApiError> {
    let (from, to) = DateWindow::day_bounds(from, to);
    let request = FetchRequest::new(login).with_window(from, to);
    state.source.fetch(&request).await.map_err(|e| {
        tracing::warn!(login = %request.login, "fetch failed: {e}");
        ApiError(e)
    })
}

async fn health() -> &'static str {
    "ok"
}

async fn stats(
    State(state): State<Arc<AppState>>,
    Path(login): Path<String>,
    Query(q): Query<WindowQuery>,
) -> Result<Json<ContributionStats>, ApiError> {
    let user = fetch(&state, login, q.from, q.to).await?;
    Ok(Json(ContributionStats::from_user(&user)))
}

async fn points(
    State(state): State<Arc<AppState>>,
    Path(login): Path<String>,
    Query(q): Query<WindowQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = fetch(&state, login, q.from, q.to).await?;
    let points = normalize_user(&user);
    Ok(Json(serde_json::json!({
        "total_contributions": user.calendar().total_contributions,
        "empty": points.is_empty(),
        "points": points,
    })))
}

async fn terrain(
    State(state): State<Arc<AppState>>,
    Path(login): Path<String>,
    Query(q): Query<TerrainQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = fetch(&state, login, q.from, q.to).await?;
    let points = normalize_user(&user);
    let laid_out = layout(&points, LayoutOptions { center: q.center });
    let body = match plan(&laid_out, InteractionState::Idle, q.instanced) {
        Some(render) => serde_json::json!({
            "status": "ready",
            "bounds": laid_out.terrain().map(|t| t.bounds),
            "offset": laid_out.terrain().map(|t| t.offset),
            "plan": render,
        }),
        None => serde_json::json!({ "status": "no_data" }),
    };
    Ok(Json(body))
}

async fn repos(
    State(state): State<Arc<AppState>>,
    Path(login): Path<String>,
    Query(q): Query<ReposQuery>,
) -> Result<Json<Vec<terrain_core::Repository>>, ApiError> {
    let user = fetch(&state, login, None, None).await?;
    let limit = q.limit.unwrap_or(TOP_REPOSITORIES);
    Ok(Json(top_repositories(&user.repositories.nodes, limit)))
}
