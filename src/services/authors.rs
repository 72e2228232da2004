//! Authors service

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, RecordId},
    repository::Repository,
    validation::{AuthorForm, FormData},
};

/// An author with the books that reference it
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorWithBooks {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.store().list_authors().await
    }

    /// Author and the books that reference it, fetched concurrently
    async fn with_books(&self, id: RecordId) -> AppResult<Option<AuthorWithBooks>> {
        let store = self.repository.store();
        let (author, books) = tokio::try_join!(store.find_author(id), store.books_by_author(id))?;
        Ok(author.map(|author| AuthorWithBooks { author, books }))
    }

    pub async fn detail(&self, id: RecordId) -> AppResult<AuthorWithBooks> {
        self.with_books(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub async fn create(&self, submitted: &FormData) -> AppResult<FormOutcome<AuthorForm>> {
        let form = AuthorForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            return Ok(FormOutcome::Rejected { form, errors, choices: () });
        }

        let author = self.repository.store().insert_author(form.to_data()).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(FormOutcome::Saved(author.url()))
    }

    /// Prefilled form for the update page, `None` if the author is gone
    pub async fn edit(&self, id: RecordId) -> AppResult<Option<AuthorForm>> {
        let author = self.repository.store().find_author(id).await?;
        Ok(author.as_ref().map(AuthorForm::from_author))
    }

    pub async fn update(
        &self,
        id: RecordId,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<AuthorForm>> {
        let form = AuthorForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            return Ok(FormOutcome::Rejected { form, errors, choices: () });
        }

        match self.repository.store().update_author(id, form.to_data()).await? {
            Some(author) => {
                tracing::info!("Updated author {}", author.id);
                Ok(FormOutcome::Saved(author.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    /// Confirmation page data, `None` if the author is gone
    pub async fn deletion(&self, id: RecordId) -> AppResult<Option<AuthorWithBooks>> {
        self.with_books(id).await
    }

    /// Deletes the author unless books still reference it
    pub async fn delete(&self, id: RecordId) -> AppResult<DeleteOutcome<AuthorWithBooks>> {
        let Some(found) = self.with_books(id).await? else {
            return Ok(DeleteOutcome::Deleted);
        };

        if !found.books.is_empty() {
            tracing::info!(
                "Refusing to delete author {}: referenced by {} book(s)",
                id,
                found.books.len()
            );
            return Ok(DeleteOutcome::Blocked(found));
        }

        self.repository.store().delete_author(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorData, BookData};
    use crate::repository::{CatalogStore, MemoryStore};
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, AuthorsService) {
        let store = Arc::new(MemoryStore::new());
        let service = AuthorsService::new(Repository::new(store.clone()));
        (store, service)
    }

    fn submitted(first: &str, family: &str) -> FormData {
        FormData::from_pairs(vec![("first_name", first), ("family_name", family)])
    }

    #[tokio::test]
    async fn test_create_and_detail() {
        let (_, service) = setup();
        let outcome = service.create(&submitted("Isaac", "Asimov")).await.unwrap();
        let FormOutcome::Saved(url) = outcome else { panic!("expected a redirect") };

        let authors = service.list().await.unwrap();
        assert_eq!(1, authors.len());
        assert_eq!(authors[0].url(), url);

        let detail = service.detail(authors[0].id).await.unwrap();
        assert_eq!("Isaac, Asimov", detail.author.name());
        assert!(detail.books.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejected_writes_nothing() {
        let (store, service) = setup();
        let outcome = service.create(&submitted("", "Asimov")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Rejected { ref errors, .. } if errors[0].field == "first_name"));
        assert_eq!(0, store.count_authors().await.unwrap());
    }

    #[tokio::test]
    async fn test_detail_missing() {
        let (_, service) = setup();
        let err = service.detail(RecordId::generate()).await.unwrap_err();
        assert_eq!("Author not found", err.to_string());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (_, service) = setup();
        let id = RecordId::generate();
        assert_eq!(None, service.edit(id).await.unwrap());
        assert_eq!(FormOutcome::Missing, service.update(id, &submitted("A", "B")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_blocked_by_books() {
        let (store, service) = setup();
        let author = store
            .insert_author(AuthorData {
                first_name: "Jim".into(),
                family_name: "Butcher".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let book = store
            .insert_book(BookData {
                title: "Storm Front".into(),
                author: author.id,
                summary: None,
                isbn: "9780451457813".into(),
                genre: vec![],
            })
            .await
            .unwrap();

        let outcome = service.delete(author.id).await.unwrap();
        assert_eq!(
            DeleteOutcome::Blocked(AuthorWithBooks { author: author.clone(), books: vec![book.clone()] }),
            outcome
        );
        assert!(store.find_author(author.id).await.unwrap().is_some());

        store.delete_book(book.id).await.unwrap();
        assert_eq!(DeleteOutcome::Deleted, service.delete(author.id).await.unwrap());
        assert!(store.find_author(author.id).await.unwrap().is_none());
    }
}
