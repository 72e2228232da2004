//! Books service
//!
//! Books are the only records with references in both directions: they point
//! at an author and at genres, and copies point at them.  Reads resolve the
//! outgoing references through [`populate`](super::populate).

use super::{populate, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, BookInstance, Genre, PopulatedBook, RecordId},
    repository::Repository,
    validation::{BookForm, FormData},
};

/// Selection controls of the book form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

/// A book with its author, genres and copies
#[derive(Debug, Clone, PartialEq)]
pub struct BookWithInstances {
    pub book: PopulatedBook,
    pub instances: Vec<BookInstance>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books by title, with their authors
    pub async fn list(&self) -> AppResult<Vec<PopulatedBook>> {
        let store = self.repository.store();
        let books = store.list_books().await?;
        populate::books(store, books).await
    }

    async fn with_instances(&self, id: RecordId) -> AppResult<Option<BookWithInstances>> {
        let store = self.repository.store();
        let (book, instances) =
            tokio::try_join!(store.find_book(id), store.book_instances_by_book(id))?;
        let Some(book) = book else {
            return Ok(None);
        };
        let book = populate::book(store, book).await?;
        Ok(Some(BookWithInstances { book, instances }))
    }

    pub async fn detail(&self, id: RecordId) -> AppResult<BookWithInstances> {
        self.with_instances(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// All authors and genres, fetched concurrently
    pub async fn choices(&self) -> AppResult<BookChoices> {
        let store = self.repository.store();
        let (authors, genres) = tokio::try_join!(store.list_authors(), store.list_genres())?;
        Ok(BookChoices { authors, genres })
    }

    pub async fn create(
        &self,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<BookForm, BookChoices>> {
        let form = BookForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            let choices = self.choices().await?;
            return Ok(FormOutcome::Rejected { form, errors, choices });
        }

        let book = self.repository.store().insert_book(form.to_data()?).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(FormOutcome::Saved(book.url()))
    }

    /// Prefilled form and its choices, `None` if the book is gone
    pub async fn edit(&self, id: RecordId) -> AppResult<Option<(BookForm, BookChoices)>> {
        let (book, choices) =
            tokio::try_join!(self.repository.store().find_book(id), self.choices())?;
        Ok(book.map(|book| (BookForm::from_book(&book), choices)))
    }

    pub async fn update(
        &self,
        id: RecordId,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<BookForm, BookChoices>> {
        let form = BookForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            let choices = self.choices().await?;
            return Ok(FormOutcome::Rejected { form, errors, choices });
        }

        match self.repository.store().update_book(id, form.to_data()?).await? {
            Some(book) => {
                tracing::info!("Updated book {}", book.id);
                Ok(FormOutcome::Saved(book.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    pub async fn deletion(&self, id: RecordId) -> AppResult<Option<BookWithInstances>> {
        self.with_instances(id).await
    }

    /// Deletes the book; its copies keep their now dangling reference
    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        let instances = self.repository.store().book_instances_by_book(id).await?;
        if !instances.is_empty() {
            tracing::debug!("Book {} still has {} copies", id, instances.len());
        }
        self.repository.store().delete_book(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
