//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod populate;

use crate::{repository::Repository, validation::FieldError};

/// Result of a create or update submission
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<F, R = ()> {
    /// The record was written (or, for genres, already existed) at this URL
    Saved(String),
    /// The checklist failed: re-render `form` with `errors`, using `choices`
    /// to rebuild the selection controls
    Rejected { form: F, errors: Vec<FieldError>, choices: R },
    /// The record to update no longer exists
    Missing,
}

/// Result of a delete submission
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<C> {
    Deleted,
    /// Dependents still reference the record; `C` is the confirmation page data
    Blocked(C),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}
