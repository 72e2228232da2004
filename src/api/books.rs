//! Book pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{form_data, form_response, found, FormPairs};
use crate::{
    error::AppResult,
    models::RecordId,
    validation::BookForm,
    views::{self, Page},
    AppState,
};

const LIST_URL: &str = "/catalog/books";

/// List all books by title, with their authors
pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let books = state.services.books.list().await?;
    Ok(views::book::list(&books))
}

/// Book with its author, genres and copies
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let book = state.services.books.detail(RecordId::parse(&id)?).await?;
    Ok(views::book::detail(&book))
}

/// Empty form with every author and genre to pick from
pub async fn create_form(State(state): State<AppState>) -> AppResult<Page> {
    let choices = state.services.books.choices().await?;
    Ok(views::book::form("Create Book", &BookForm::default(), &choices, &[]))
}

pub async fn create(State(state): State<AppState>, form: FormPairs) -> AppResult<Response> {
    let outcome = state.services.books.create(&form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, choices, errors| {
        views::book::form("Create Book", form, choices, errors)
    }))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.edit(RecordId::parse(&id)?).await? {
        Some((form, choices)) => {
            Ok(views::book::form("Update Book", &form, &choices, &[]).into_response())
        }
        None => Ok(found(LIST_URL)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.services.books.update(RecordId::parse(&id)?, &form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, choices, errors| {
        views::book::form("Update Book", form, choices, errors)
    }))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.deletion(RecordId::parse(&id)?).await? {
        Some(book) => Ok(views::book::delete(&book).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    state.services.books.delete(RecordId::parse(&id)?).await?;
    Ok(found(LIST_URL))
}
