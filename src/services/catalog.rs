//! Catalog summary service

use serde::Serialize;

use crate::{error::AppResult, models::BookInstanceStatus, repository::Repository};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All five counts, queried concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let store = self.repository.store();
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            store.count_books(),
            store.count_book_instances(None),
            store.count_book_instances(Some(BookInstanceStatus::Available)),
            store.count_authors(),
            store.count_genres(),
        )?;

        Ok(CatalogCounts { books, book_instances, book_instances_available, authors, genres })
    }
}
