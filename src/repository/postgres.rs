//! PostgreSQL implementation of the store.
//!
//! One table per collection; references are plain UUID columns (a UUID array
//! for book genres) without foreign keys, so dangling references behave as
//! they do in a document store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceStatus,
        Genre, GenreData, RecordId,
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn uuids(ids: &[RecordId]) -> Vec<Uuid> {
    ids.iter().map(RecordId::as_uuid).collect()
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(FromRow)]
struct AuthorRow {
    id: Uuid,
    first_name: String,
    family_name: String,
    date_of_birth: Option<NaiveDate>,
    date_of_death: Option<NaiveDate>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: row.id.into(),
            first_name: row.first_name,
            family_name: row.family_name,
            date_of_birth: row.date_of_birth,
            date_of_death: row.date_of_death,
        }
    }
}

#[derive(FromRow)]
struct GenreRow {
    id: Uuid,
    name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre { id: row.id.into(), name: row.name }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author_id: Uuid,
    summary: Option<String>,
    isbn: String,
    genre_ids: Vec<Uuid>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id.into(),
            title: row.title,
            author: row.author_id.into(),
            summary: row.summary,
            isbn: row.isbn,
            genre: row.genre_ids.into_iter().map(RecordId::from).collect(),
        }
    }
}

#[derive(FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: DateTime<Utc>,
}

impl From<BookInstanceRow> for BookInstance {
    fn from(row: BookInstanceRow) -> Self {
        let status = row.status.parse().unwrap_or_else(|e| {
            tracing::warn!("Book copy {} has {}, reading it as Maintenance", row.id, e);
            BookInstanceStatus::default()
        });
        BookInstance {
            id: row.id.into(),
            book: row.book_id.into(),
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        }
    }
}

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";
const BOOK_INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

#[async_trait]
impl CatalogStore for PgStore {
    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors ORDER BY family_name, first_name",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_author(&self, id: RecordId) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn find_authors(&self, ids: &[RecordId]) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors WHERE id = ANY($1)",
            AUTHOR_COLUMNS
        ))
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn insert_author(&self, data: AuthorData) -> AppResult<Author> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(RecordId::generate().as_uuid())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_author(&self, id: RecordId, data: AuthorData) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn delete_author(&self, id: RecordId) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn find_genre(&self, id: RecordId) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Genre::from))
    }

    async fn find_genres(&self, ids: &[RecordId]) -> AppResult<Vec<Genre>> {
        let rows =
            sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = ANY($1) ORDER BY name")
                .bind(uuids(ids))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Genre::from))
    }

    async fn insert_genre(&self, data: GenreData) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, GenreRow>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(RecordId::generate().as_uuid())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_genre(&self, id: RecordId, data: GenreData) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id.as_uuid())
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn delete_genre(&self, id: RecordId) -> AppResult<()> {
        sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books ORDER BY title",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_book(&self, id: RecordId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn find_books(&self, ids: &[RecordId]) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books WHERE id = ANY($1)",
            BOOK_COLUMNS
        ))
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn books_by_author(&self, author: RecordId) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books WHERE author_id = $1",
            BOOK_COLUMNS
        ))
        .bind(author.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn books_by_genre(&self, genre: RecordId) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids)",
            BOOK_COLUMNS
        ))
        .bind(genre.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn insert_book(&self, data: BookData) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(RecordId::generate().as_uuid())
        .bind(&data.title)
        .bind(data.author.as_uuid())
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(uuids(&data.genre))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_book(&self, id: RecordId, data: BookData) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(&data.title)
        .bind(data.author.as_uuid())
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(uuids(&data.genre))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn delete_book(&self, id: RecordId) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances",
            BOOK_INSTANCE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookInstance::from).collect())
    }

    async fn find_book_instance(&self, id: RecordId) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(BookInstance::from))
    }

    async fn book_instances_by_book(&self, book: RecordId) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(book.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookInstance::from).collect())
    }

    async fn insert_book_instance(&self, data: BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(RecordId::generate().as_uuid())
        .bind(data.book.as_uuid())
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_book_instance(
        &self,
        id: RecordId,
        data: BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(data.book.as_uuid())
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(BookInstance::from))
    }

    async fn delete_book_instance(&self, id: RecordId) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
