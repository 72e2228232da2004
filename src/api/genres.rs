//! Genre pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{form_data, form_response, found, FormPairs};
use crate::{
    error::AppResult,
    models::RecordId,
    validation::GenreForm,
    views::{self, Page},
    AppState,
};

const LIST_URL: &str = "/catalog/genres";

pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let genres = state.services.genres.list().await?;
    Ok(views::genre::list(&genres))
}

/// Genre with the books filed under it
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let genre = state.services.genres.detail(RecordId::parse(&id)?).await?;
    Ok(views::genre::detail(&genre))
}

pub async fn create_form() -> Page {
    views::genre::form("Create Genre", &GenreForm::default(), &[])
}

/// Creates the genre, or redirects to an existing one with the same name
pub async fn create(State(state): State<AppState>, form: FormPairs) -> AppResult<Response> {
    let outcome = state.services.genres.create(&form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, _, errors| {
        views::genre::form("Create Genre", form, errors)
    }))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.edit(RecordId::parse(&id)?).await? {
        Some(form) => Ok(views::genre::form("Update Genre", &form, &[]).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.services.genres.update(RecordId::parse(&id)?, &form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, _, errors| {
        views::genre::form("Update Genre", form, errors)
    }))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.deletion(RecordId::parse(&id)?).await? {
        Some(genre) => Ok(views::genre::delete(&genre).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    state.services.genres.delete(RecordId::parse(&id)?).await?;
    Ok(found(LIST_URL))
}
