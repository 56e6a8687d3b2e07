// Entry routes (protected group)
// Decision: Every write answers with a 303 redirect so a refresh never resubmits
// Decision: Ids arrive as strings; malformed ids are reported as 404

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, put},
    Form, Router,
};
use cannanote_core::CannaError;
use minijinja::context;

use super::forms::EntryForm;
use crate::{auth::CurrentSession, error::ApiError, services::EntryService, AppState};

/// Create entry routes; the caller applies the access gate
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/new", get(new_entry))
        .route("/entries/seed", get(seed_entries))
        .route(
            "/entries/:id",
            get(show_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/:id/edit", get(edit_entry))
        .route("/entries/:id/delete", get(delete_confirm))
        .route("/entries/:id/like", put(like_entry))
}

/// GET /entries - List all entries
pub async fn list_entries(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Response, ApiError> {
    let entries = state.entries.list().await?;
    let page = state.views.render(
        "index.html",
        context! { entries => entries, username => session.username },
    )?;
    Ok(page.into_response())
}

/// GET /entries/new - Blank entry form
pub async fn new_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Response, ApiError> {
    let page = state
        .views
        .render("new.html", context! { username => session.username })?;
    Ok(page.into_response())
}

/// GET /entries/seed - Replace all entries with sample data
pub async fn seed_entries(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    state.entries.seed_reset().await?;
    Ok(Redirect::to("/entries"))
}

/// GET /entries/:id - Entry detail
pub async fn show_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let entry = state.entries.get(EntryService::parse_id(&id)?).await?;
    let page = state.views.render(
        "show.html",
        context! { entry => entry, username => session.username },
    )?;
    Ok(page.into_response())
}

/// GET /entries/:id/edit - Edit form prefilled with the entry
pub async fn edit_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let entry = state.entries.get(EntryService::parse_id(&id)?).await?;
    let page = state.views.render(
        "edit.html",
        context! { entry => entry, username => session.username },
    )?;
    Ok(page.into_response())
}

/// GET /entries/:id/delete - Delete confirmation fragment (htmx)
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let entry = state.entries.get(EntryService::parse_id(&id)?).await?;
    let fragment = state
        .views
        .render("delete_confirm.html", context! { entry => entry })?;
    Ok(fragment.into_response())
}

/// POST /entries - Create an entry owned by the session user
pub async fn create_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Form(form): Form<EntryForm>,
) -> Result<Response, ApiError> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(CannaError::Validation(message)) => {
            let page = state.views.render(
                "new.html",
                context! { error => message, username => session.username },
            )?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let entry = state.entries.create(fields, &session.username).await?;
    Ok(Redirect::to(&format!("/entries/{}", entry.id)).into_response())
}

/// PUT /entries/:id - Replace the editable fields of an entry
pub async fn update_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<EntryForm>,
) -> Result<Response, ApiError> {
    let id = EntryService::parse_id(&id)?;
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(CannaError::Validation(message)) => {
            // The form is shown again over the stored, unchanged entry
            let entry = state.entries.get(id).await?;
            let page = state.views.render(
                "edit.html",
                context! { entry => entry, error => message, username => session.username },
            )?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    state.entries.update(id, fields).await?;
    Ok(Redirect::to(&format!("/entries/{id}")).into_response())
}

/// PUT /entries/:id/like - Add a favorite
pub async fn like_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    state
        .entries
        .increment_favorite(EntryService::parse_id(&id)?)
        .await?;
    Ok(Redirect::to("/entries"))
}

/// DELETE /entries/:id - Remove an entry
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    state.entries.delete(EntryService::parse_id(&id)?).await?;
    Ok(Redirect::to("/entries"))
}
