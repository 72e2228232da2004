//! Repository layer: the document store client.
//!
//! Every collection is reachable through [`CatalogStore`].  References between
//! records are stored as identifiers and are never resolved here; resolving
//! them is the populate step of the service layer.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceStatus,
        Genre, GenreData, RecordId,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Operations of the document store, one group per collection.
///
/// Lookups by id return `None` for absent records; deleting an absent record
/// is not an error.  Updates return `None` when there was nothing to update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Authors
    /// All authors, ordered by family name then first name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_author(&self, id: RecordId) -> AppResult<Option<Author>>;
    async fn find_authors(&self, ids: &[RecordId]) -> AppResult<Vec<Author>>;
    async fn insert_author(&self, data: AuthorData) -> AppResult<Author>;
    async fn update_author(&self, id: RecordId, data: AuthorData) -> AppResult<Option<Author>>;
    async fn delete_author(&self, id: RecordId) -> AppResult<()>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Genres
    /// All genres, ordered by name
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn find_genre(&self, id: RecordId) -> AppResult<Option<Genre>>;
    async fn find_genres(&self, ids: &[RecordId]) -> AppResult<Vec<Genre>>;
    /// First genre whose name matches exactly
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn insert_genre(&self, data: GenreData) -> AppResult<Genre>;
    async fn update_genre(&self, id: RecordId, data: GenreData) -> AppResult<Option<Genre>>;
    async fn delete_genre(&self, id: RecordId) -> AppResult<()>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Books
    /// All books, ordered by title
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn find_book(&self, id: RecordId) -> AppResult<Option<Book>>;
    async fn find_books(&self, ids: &[RecordId]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author: RecordId) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre: RecordId) -> AppResult<Vec<Book>>;
    async fn insert_book(&self, data: BookData) -> AppResult<Book>;
    async fn update_book(&self, id: RecordId, data: BookData) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: RecordId) -> AppResult<()>;
    async fn count_books(&self) -> AppResult<i64>;

    // Book instances
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn find_book_instance(&self, id: RecordId) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book: RecordId) -> AppResult<Vec<BookInstance>>;
    async fn insert_book_instance(&self, data: BookInstanceData) -> AppResult<BookInstance>;
    async fn update_book_instance(
        &self,
        id: RecordId,
        data: BookInstanceData,
    ) -> AppResult<Option<BookInstance>>;
    async fn delete_book_instance(&self, id: RecordId) -> AppResult<()>;
    /// Number of copies, optionally restricted to one status
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// Main repository struct holding the process-wide store client
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CatalogStore>,
}

impl Repository {
    /// Create a repository around an already constructed store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(PgStore::new(pool)))
    }

    /// Create a repository backed by an empty in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }
}
