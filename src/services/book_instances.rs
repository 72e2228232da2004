//! Book copies service

use chrono::Utc;

use super::{populate, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, PopulatedBookInstance, RecordId},
    repository::Repository,
    validation::{BookInstanceForm, FormData},
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<PopulatedBookInstance>> {
        let store = self.repository.store();
        let instances = store.list_book_instances().await?;
        populate::book_instances(store, instances).await
    }

    async fn find(&self, id: RecordId) -> AppResult<Option<PopulatedBookInstance>> {
        let store = self.repository.store();
        let Some(instance) = store.find_book_instance(id).await? else {
            return Ok(None);
        };
        Ok(populate::book_instances(store, vec![instance]).await?.pop())
    }

    pub async fn detail(&self, id: RecordId) -> AppResult<PopulatedBookInstance> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// Books a copy can belong to
    pub async fn choices(&self) -> AppResult<Vec<Book>> {
        self.repository.store().list_books().await
    }

    pub async fn create(
        &self,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<BookInstanceForm, Vec<Book>>> {
        let form = BookInstanceForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            let choices = self.choices().await?;
            return Ok(FormOutcome::Rejected { form, errors, choices });
        }

        let data = form.to_data(Utc::now())?;
        let instance = self.repository.store().insert_book_instance(data).await?;
        tracing::info!("Created copy {} of book {}", instance.id, instance.book);
        Ok(FormOutcome::Saved(instance.url()))
    }

    pub async fn edit(&self, id: RecordId) -> AppResult<Option<(BookInstanceForm, Vec<Book>)>> {
        let (instance, choices) =
            tokio::try_join!(self.repository.store().find_book_instance(id), self.choices())?;
        Ok(instance.map(|instance| (BookInstanceForm::from_instance(&instance), choices)))
    }

    pub async fn update(
        &self,
        id: RecordId,
        submitted: &FormData,
    ) -> AppResult<FormOutcome<BookInstanceForm, Vec<Book>>> {
        let form = BookInstanceForm::from_form(submitted);
        let errors = form.check();
        if !errors.is_empty() {
            let choices = self.choices().await?;
            return Ok(FormOutcome::Rejected { form, errors, choices });
        }

        let data = form.to_data(Utc::now())?;
        match self.repository.store().update_book_instance(id, data).await? {
            Some(instance) => {
                tracing::info!("Updated copy {}", instance.id);
                Ok(FormOutcome::Saved(instance.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    pub async fn deletion(&self, id: RecordId) -> AppResult<Option<PopulatedBookInstance>> {
        self.find(id).await
    }

    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        self.repository.store().delete_book_instance(id).await?;
        tracing::info!("Deleted copy {}", id);
        Ok(())
    }
}
