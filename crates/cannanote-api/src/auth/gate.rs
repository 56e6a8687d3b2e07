// Access gate for the protected route group
// Decision: Unauthenticated requests are redirected to "/" before any handler runs
// Decision: The resolved Session travels in request extensions, not in globals

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cannanote_core::Session;

use crate::{error::ApiError, AppState};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "cannanote_session";

/// Whether a request with this session may enter the protected group
pub fn allow(session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.logged_in)
}

/// Resolve the session cookie, if any, to a live session
pub async fn session_from_jar(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<Session>, ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    Ok(state.auth.current_session(cookie.value()).await?)
}

/// Middleware guarding the protected routes
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_from_jar(&state, &jar).await?;

    if !allow(session.as_ref()) {
        tracing::debug!(path = %req.uri().path(), "No session, redirecting to landing page");
        return Ok(Redirect::to("/").into_response());
    }

    if let Some(session) = session {
        req.extensions_mut().insert(session);
    }
    Ok(next.run(req).await)
}

/// Session of the logged-in user, placed by `require_session`
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| Redirect::to("/"))
    }
}

/// Cookie carrying a freshly issued session token
pub fn session_cookie(token: String, max_age_minutes: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::minutes(max_age_minutes))
        .build()
}

/// Removal cookie matching `session_cookie`'s path
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
