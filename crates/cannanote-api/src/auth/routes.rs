// Signup, login and logout routes
// Decision: Form posts with server-rendered error pages, sessions in an HTTP-only cookie
// Decision: Unknown user and wrong password get the same response

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::CookieJar;
use cannanote_core::CannaError;
use minijinja::context;

use super::gate::{clear_session_cookie, session_cookie, SESSION_COOKIE};
use crate::{api::forms::CredentialsForm, error::ApiError, AppState};

const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

/// GET /signup - Signup form
pub async fn signup_form(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(state.views.render("signup.html", context! {})?.into_response())
}

/// POST /signup - Create an account and log in
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let form_username = form.username.trim().to_string();

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(CannaError::Validation(message)) => {
            let page = state.views.render(
                "signup.html",
                context! { error => message, form_username => form_username },
            )?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    match state.auth.signup(credentials).await {
        Ok((token, _session)) => Ok(logged_in_response(&state, jar, token)),
        Err(CannaError::DuplicateUsername(_)) => {
            let page = state.views.render(
                "signup.html",
                context! { not_unique => true, form_username => form_username },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login - Login form
pub async fn login_form(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(state.views.render("login.html", context! {})?.into_response())
}

/// POST /login - Log in with username and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let form_username = form.username.trim().to_string();

    let result = match form.validate() {
        Ok(credentials) => state.auth.login(credentials).await,
        // Malformed input gets the same answer as wrong credentials
        Err(CannaError::Validation(_)) => Err(CannaError::InvalidCredentials),
        Err(e) => Err(e),
    };

    match result {
        Ok((token, _session)) => Ok(logged_in_response(&state, jar, token)),
        Err(e) if e.is_auth_failure() => {
            let page = state.views.render(
                "login.html",
                context! { error => LOGIN_FAILED_MESSAGE, form_username => form_username },
            )?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout - End the session and clear the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value()).await?;
        tracing::info!("User logged out");
    }
    Ok((clear_session_cookie(jar), Redirect::to("/")).into_response())
}

fn logged_in_response(state: &AppState, jar: CookieJar, token: String) -> Response {
    let cookie = session_cookie(token, state.cookie.max_age_minutes, state.cookie.secure);
    (jar.add(cookie), Redirect::to("/entries")).into_response()
}
