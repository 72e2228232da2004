//! In-process implementation of the store.
//!
//! Used by the test suites and by `database.url = "memory://"`.  Records keep
//! their insertion order, and the same orderings as the PostgreSQL store are
//! applied on listing.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceStatus,
        Genre, GenreData, RecordId,
    },
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<RecordId, Author>,
    genres: IndexMap<RecordId, Genre>,
    books: IndexMap<RecordId, Book>,
    book_instances: IndexMap<RecordId, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn pick<T: Clone>(records: &IndexMap<RecordId, T>, ids: &[RecordId]) -> Vec<T> {
    records
        .iter()
        .filter(|(id, _)| ids.contains(id))
        .map(|(_, record)| record.clone())
        .collect()
}

fn count<T>(records: &IndexMap<RecordId, T>) -> i64 {
    i64::try_from(records.len()).unwrap_or(i64::MAX)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let collections = self.collections.read().await;
        let mut authors: Vec<Author> = collections.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            (&a.family_name, &a.first_name).cmp(&(&b.family_name, &b.first_name))
        });
        Ok(authors)
    }

    async fn find_author(&self, id: RecordId) -> AppResult<Option<Author>> {
        Ok(self.collections.read().await.authors.get(&id).cloned())
    }

    async fn find_authors(&self, ids: &[RecordId]) -> AppResult<Vec<Author>> {
        Ok(pick(&self.collections.read().await.authors, ids))
    }

    async fn insert_author(&self, data: AuthorData) -> AppResult<Author> {
        let author = Author::from_data(RecordId::generate(), data);
        self.collections.write().await.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: RecordId, data: AuthorData) -> AppResult<Option<Author>> {
        let mut collections = self.collections.write().await;
        Ok(collections.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete_author(&self, id: RecordId) -> AppResult<()> {
        self.collections.write().await.authors.shift_remove(&id);
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(count(&self.collections.read().await.authors))
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let collections = self.collections.read().await;
        let mut genres: Vec<Genre> = collections.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_genre(&self, id: RecordId) -> AppResult<Option<Genre>> {
        Ok(self.collections.read().await.genres.get(&id).cloned())
    }

    async fn find_genres(&self, ids: &[RecordId]) -> AppResult<Vec<Genre>> {
        Ok(pick(&self.collections.read().await.genres, ids))
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let collections = self.collections.read().await;
        Ok(collections.genres.values().find(|g| g.name == name).cloned())
    }

    async fn insert_genre(&self, data: GenreData) -> AppResult<Genre> {
        let genre = Genre::from_data(RecordId::generate(), data);
        self.collections.write().await.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update_genre(&self, id: RecordId, data: GenreData) -> AppResult<Option<Genre>> {
        let mut collections = self.collections.write().await;
        Ok(collections.genres.get_mut(&id).map(|slot| {
            *slot = Genre::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete_genre(&self, id: RecordId) -> AppResult<()> {
        self.collections.write().await.genres.shift_remove(&id);
        Ok(())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(count(&self.collections.read().await.genres))
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        let mut books: Vec<Book> = collections.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn find_book(&self, id: RecordId) -> AppResult<Option<Book>> {
        Ok(self.collections.read().await.books.get(&id).cloned())
    }

    async fn find_books(&self, ids: &[RecordId]) -> AppResult<Vec<Book>> {
        Ok(pick(&self.collections.read().await.books, ids))
    }

    async fn books_by_author(&self, author: RecordId) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        Ok(collections.books.values().filter(|b| b.author == author).cloned().collect())
    }

    async fn books_by_genre(&self, genre: RecordId) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        Ok(collections.books.values().filter(|b| b.genre.contains(&genre)).cloned().collect())
    }

    async fn insert_book(&self, data: BookData) -> AppResult<Book> {
        let book = Book::from_data(RecordId::generate(), data);
        self.collections.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: RecordId, data: BookData) -> AppResult<Option<Book>> {
        let mut collections = self.collections.write().await;
        Ok(collections.books.get_mut(&id).map(|slot| {
            *slot = Book::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete_book(&self, id: RecordId) -> AppResult<()> {
        self.collections.write().await.books.shift_remove(&id);
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(count(&self.collections.read().await.books))
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.collections.read().await.book_instances.values().cloned().collect())
    }

    async fn find_book_instance(&self, id: RecordId) -> AppResult<Option<BookInstance>> {
        Ok(self.collections.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_by_book(&self, book: RecordId) -> AppResult<Vec<BookInstance>> {
        let collections = self.collections.read().await;
        Ok(collections.book_instances.values().filter(|i| i.book == book).cloned().collect())
    }

    async fn insert_book_instance(&self, data: BookInstanceData) -> AppResult<BookInstance> {
        let instance = BookInstance::from_data(RecordId::generate(), data);
        self.collections.write().await.book_instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update_book_instance(
        &self,
        id: RecordId,
        data: BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let mut collections = self.collections.write().await;
        Ok(collections.book_instances.get_mut(&id).map(|slot| {
            *slot = BookInstance::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete_book_instance(&self, id: RecordId) -> AppResult<()> {
        self.collections.write().await.book_instances.shift_remove(&id);
        Ok(())
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let collections = self.collections.read().await;
        let n = collections
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}
