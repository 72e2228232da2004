//! Author pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{form_data, form_response, found, FormPairs};
use crate::{
    error::AppResult,
    models::RecordId,
    services::DeleteOutcome,
    validation::AuthorForm,
    views::{self, Page},
    AppState,
};

const LIST_URL: &str = "/catalog/authors";

/// List all authors
pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let authors = state.services.authors.list().await?;
    Ok(views::author::list(&authors))
}

/// Author with their books
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let author = state.services.authors.detail(RecordId::parse(&id)?).await?;
    Ok(views::author::detail(&author))
}

pub async fn create_form() -> Page {
    views::author::form("Create Author", &AuthorForm::default(), &[])
}

pub async fn create(State(state): State<AppState>, form: FormPairs) -> AppResult<Response> {
    let outcome = state.services.authors.create(&form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, _, errors| {
        views::author::form("Create Author", form, errors)
    }))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.edit(RecordId::parse(&id)?).await? {
        Some(form) => Ok(views::author::form("Update Author", &form, &[]).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.services.authors.update(RecordId::parse(&id)?, &form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, _, errors| {
        views::author::form("Update Author", form, errors)
    }))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.deletion(RecordId::parse(&id)?).await? {
        Some(author) => Ok(views::author::delete(&author).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

/// Deletes the author, or shows the books that prevent it
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    match state.services.authors.delete(RecordId::parse(&id)?).await? {
        DeleteOutcome::Deleted => Ok(found(LIST_URL)),
        DeleteOutcome::Blocked(blocking) => Ok(views::author::delete(&blocking).into_response()),
    }
}
