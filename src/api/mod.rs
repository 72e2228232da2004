//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    extract::{Request, State},
    http::{header::LOCATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, ErrorReport},
    services::FormOutcome,
    validation::{FieldError, FormData},
    views::{self, Page},
    AppState,
};

/// Submitted form body as raw pairs; repeated names are kept
pub type FormPairs = axum::Form<Vec<(String, String)>>;

pub(crate) fn form_data(axum::Form(pairs): FormPairs) -> FormData {
    FormData::from_pairs(pairs)
}

/// `302 Found` to `location`
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Turns a submission outcome into a redirect or a re-rendered form
pub(crate) fn form_response<F, R>(
    outcome: FormOutcome<F, R>,
    list_url: &str,
    render: impl FnOnce(&F, &R, &[FieldError]) -> Page,
) -> Response {
    match outcome {
        FormOutcome::Saved(url) => found(&url),
        FormOutcome::Rejected { form, errors, choices } => {
            render(&form, &choices, &errors).into_response()
        }
        FormOutcome::Missing => found(list_url),
    }
}

/// Re-renders error pages with internal details in development mode
async fn error_detail(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !state.config.is_development() {
        return response;
    }
    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => {
            let mut detailed = (report.status, views::error::page(&report, true)).into_response();
            detailed.extensions_mut().insert(report);
            detailed
        }
        None => response,
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        .route("/book/:id/update", get(books::update_form).post(books::update))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_form).post(authors::create))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete))
        .route("/author/:id/update", get(authors::update_form).post(authors::update))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update))
        // Book copies
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        );

    Router::new()
        .route("/", get(catalog::home))
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), error_detail))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
