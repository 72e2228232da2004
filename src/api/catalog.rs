//! Catalog home page

use axum::{extract::State, response::Response};

use super::found;
use crate::{
    error::AppResult,
    views::{self, Page},
    AppState,
};

/// Site root; the catalog is the only section
pub async fn home() -> Response {
    found("/catalog")
}

/// Record counts for every collection
pub async fn index(State(state): State<AppState>) -> AppResult<Page> {
    let counts = state.services.catalog.counts().await?;
    Ok(views::index::page(&counts))
}
