//! Book copy pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{form_data, form_response, found, FormPairs};
use crate::{
    error::AppResult,
    models::RecordId,
    validation::BookInstanceForm,
    views::{self, Page},
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let instances = state.services.book_instances.list().await?;
    Ok(views::book_instance::list(&instances))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let instance = state.services.book_instances.detail(RecordId::parse(&id)?).await?;
    Ok(views::book_instance::detail(&instance))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Page> {
    let books = state.services.book_instances.choices().await?;
    Ok(views::book_instance::form("Create BookInstance", &BookInstanceForm::default(), &books, &[]))
}

pub async fn create(State(state): State<AppState>, form: FormPairs) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(&form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, books, errors| {
        views::book_instance::form("Create BookInstance", form, books, errors)
    }))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.edit(RecordId::parse(&id)?).await? {
        Some((form, books)) => {
            Ok(views::book_instance::form("Update BookInstance", &form, &books, &[])
                .into_response())
        }
        None => Ok(found(LIST_URL)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormPairs,
) -> AppResult<Response> {
    let id = RecordId::parse(&id)?;
    let outcome = state.services.book_instances.update(id, &form_data(form)).await?;
    Ok(form_response(outcome, LIST_URL, |form, books, errors| {
        views::book_instance::form("Update BookInstance", form, books, errors)
    }))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.deletion(RecordId::parse(&id)?).await? {
        Some(instance) => Ok(views::book_instance::delete(&instance).into_response()),
        None => Ok(found(LIST_URL)),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    state.services.book_instances.delete(RecordId::parse(&id)?).await?;
    Ok(found(LIST_URL))
}
