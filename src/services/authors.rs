//! Author service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book, FieldError, Rejected},
};

use super::{FormOutcome, Store};

/// An author with the books credited to them
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

/// A rejected author form, ready to show again
#[derive(Debug, Clone)]
pub struct AuthorFormData {
    pub author: AuthorForm,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Store,
}

impl AuthorsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Author and their books; `None` when the author does not exist
    pub async fn find(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let Some(author) = self.store.get_author(id).await? else {
            return Ok(None);
        };
        let books = self.store.books_by_author(id).await?;
        Ok(Some(AuthorDetail { author, books }))
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<Author, AuthorFormData>> {
        match form.check() {
            Ok(input) => {
                let author = self.store.create_author(&input).await?;
                tracing::info!("Author created: id={}", author.id);
                Ok(FormOutcome::Saved(author))
            }
            Err(Rejected { form, errors }) => Ok(FormOutcome::Invalid(AuthorFormData { author: form, errors })),
        }
    }

    /// Remove the author; their books keep the dangling reference
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_author(id).await? {
            tracing::info!("Author deleted: id={}", id);
        }
        Ok(())
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<AuthorForm> {
        let author = self
            .store
            .get_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(AuthorForm::from_author(&author))
    }

    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<FormOutcome<Author, AuthorFormData>> {
        match form.check() {
            Ok(input) => {
                let author = self
                    .store
                    .update_author(id, &input)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
                tracing::info!("Author updated: id={}", author.id);
                Ok(FormOutcome::Saved(author))
            }
            Err(Rejected { form, errors }) => Ok(FormOutcome::Invalid(AuthorFormData { author: form, errors })),
        }
    }
}
