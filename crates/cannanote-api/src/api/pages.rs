// Public pages: landing page and health check

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use minijinja::context;
use serde::Serialize;

use crate::{auth::gate::session_from_jar, error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
}

/// Create public page routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
}

/// GET / - Landing page; shows the entries link once logged in
pub async fn landing(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let username = session_from_jar(&state, &jar)
        .await?
        .filter(|s| s.logged_in)
        .map(|s| s.username);

    let page = state
        .views
        .render("main.html", context! { username => username })?;
    Ok(page.into_response())
}

/// GET /health - Liveness probe
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}
