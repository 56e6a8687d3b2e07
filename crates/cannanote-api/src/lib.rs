// CannaNote HTTP server
//
// Server-rendered pages over axum. Handlers call the services, services call
// the store traits, and the storage backend decides what sits behind them.
//
// Key design decisions:
// - Entry routes sit behind the session gate; landing, health and auth are public
// - HTML forms tunnel PUT/DELETE through `?_method=`, rewritten before routing
// - All shared handles live in AppState and are created once in main

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod method_override;
pub mod services;
pub mod views;

use anyhow::Result;
use axum::{extract::Request, middleware, Router};
use cannanote_storage::StorageBackend;
use std::sync::Arc;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::services::{AuthService, EntryService};
use crate::views::Views;

/// Session cookie settings derived from configuration
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub max_age_minutes: i64,
    pub secure: bool,
}

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<EntryService>,
    pub auth: Arc<AuthService>,
    pub views: Arc<Views>,
    pub cookie: CookieSettings,
    /// Backend name reported by /health
    pub storage: &'static str,
}

impl AppState {
    pub fn new(backend: &StorageBackend, config: &AppConfig) -> Result<Self> {
        Ok(Self {
            entries: Arc::new(EntryService::new(backend.entry_store())),
            auth: Arc::new(AuthService::new(
                backend.user_store(),
                backend.session_store(),
                config.session_ttl(),
            )),
            views: Arc::new(Views::new()?),
            cookie: CookieSettings {
                max_age_minutes: config.session_max_age_minutes,
                secure: config.cookie_secure,
            },
            storage: backend.name(),
        })
    }
}

/// Router with every route; the entry group is gated
pub fn router(state: AppState) -> Router {
    let protected = api::entries::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_session,
    ));

    Router::new()
        .merge(api::pages::routes())
        .merge(auth::routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The complete service: method override in front of the router
pub type App = MapRequest<Router, fn(Request) -> Request>;

pub fn app(state: AppState) -> App {
    MapRequestLayer::new(method_override::rewrite as fn(Request) -> Request).layer(router(state))
}
