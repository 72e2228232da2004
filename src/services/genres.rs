//! Genres service

use super::FormOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, RecordId},
    repository::Repository,
    validation::{FormData, GenreForm},
};

/// A genre with the books filed under it
#[derive(Debug, Clone, PartialEq)]
pub struct GenreWithBooks {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.store().list_genres().await
    }

    async fn with_books(&self, id: RecordId) -> AppResult<Option<GenreWithBooks>> {
        let store = self.repository.store();
        let (genre, books) = tokio::try_join!(store.find_genre(id), store.books_by_genre(id))?;
        Ok(genre.map(|genre| GenreWithBooks { genre, books }))
    }

    pub async fn detail(&self, id: RecordId) -> AppResult<GenreWithBooks> {
        self.with_books(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Creates the genre, or points at the existing one with the same name
    pub async fn create(&self, submitted: &FormData) -> AppResult<FormOutcome<GenreForm>> {
        let form = GenreForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            return Ok(FormOutcome::Rejected { form, errors, choices: () });
        }

        // Check-then-insert: concurrent submissions of one name may both insert.
        let store = self.repository.store();
        if let Some(existing) = store.find_genre_by_name(&form.name).await? {
            tracing::debug!("Genre {:?} already exists as {}", existing.name, existing.id);
            return Ok(FormOutcome::Saved(existing.url()));
        }

        let genre = store.insert_genre(form.to_data()).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(FormOutcome::Saved(genre.url()))
    }

    pub async fn edit(&self, id: RecordId) -> AppResult<Option<GenreForm>> {
        let genre = self.repository.store().find_genre(id).await?;
        Ok(genre.as_ref().map(GenreForm::from_genre))
    }

    pub async fn update(
        &self,
        id: RecordId,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<GenreForm>> {
        let form = GenreForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            return Ok(FormOutcome::Rejected { form, errors, choices: () });
        }

        match self.repository.store().update_genre(id, form.to_data()).await? {
            Some(genre) => {
                tracing::info!("Updated genre {}", genre.id);
                Ok(FormOutcome::Saved(genre.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    pub async fn deletion(&self, id: RecordId) -> AppResult<Option<GenreWithBooks>> {
        self.with_books(id).await
    }

    /// Deletes the genre; books keep their now dangling reference
    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        let books = self.repository.store().books_by_genre(id).await?;
        if !books.is_empty() {
            tracing::debug!("Genre {} still filed on {} book(s)", id, books.len());
        }
        self.repository.store().delete_genre(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(())
    }
}
