//! Book instance (copy) service

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceWithBook, FieldError,
        Rejected,
    },
};

use super::{FormOutcome, Store};

/// Book instance form with the books to choose from
#[derive(Debug, Clone)]
pub struct BookInstanceFormData {
    pub books: Vec<Book>,
    pub selected_book: Option<Uuid>,
    pub instance: Option<BookInstanceForm>,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    store: Store,
}

impl BookInstancesService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let instances = self.store.list_book_instances().await?;

        let mut book_ids: Vec<Uuid> = instances.iter().map(|i| i.book_id).collect();
        book_ids.sort();
        book_ids.dedup();
        let books: HashMap<Uuid, Book> = self
            .store
            .books_by_ids(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book_id).cloned();
                BookInstanceWithBook { instance, book }
            })
            .collect())
    }

    /// A copy and the book it belongs to
    pub async fn detail(&self, id: Uuid) -> AppResult<(BookInstance, Book)> {
        let instance = self
            .store
            .get_book_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        let book = self
            .store
            .get_book(instance.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book of copy {} not found", id)))?;
        Ok((instance, book))
    }

    pub async fn create_form(&self) -> AppResult<BookInstanceFormData> {
        self.form_data(None, Vec::new()).await
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstanceFormData>> {
        match self.check(form).await? {
            Ok(input) => {
                let instance = self.store.create_book_instance(&input).await?;
                tracing::info!(
                    "Book copy created: id={} book_id={} status={}",
                    instance.id,
                    instance.book_id,
                    instance.status
                );
                Ok(FormOutcome::Saved(instance))
            }
            Err(Rejected { form, errors }) => {
                tracing::debug!("Book copy create rejected: {} field error(s)", errors.len());
                Ok(FormOutcome::Invalid(self.form_data(Some(form), errors).await?))
            }
        }
    }

    /// Confirmation data; `None` when the copy is already gone
    pub async fn deletion(&self, id: Uuid) -> AppResult<Option<BookInstanceWithBook>> {
        let Some(instance) = self.store.get_book_instance(id).await? else {
            return Ok(None);
        };
        let book = self.store.get_book(instance.book_id).await?;
        Ok(Some(BookInstanceWithBook { instance, book }))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_book_instance(id).await? {
            tracing::info!("Book copy deleted: id={}", id);
        }
        Ok(())
    }

    /// Field rules first, then the book must exist
    async fn check(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Result<BookInstanceInput, Rejected<BookInstanceForm>>> {
        let input = match form.check() {
            Ok(input) => input,
            Err(rejected) => return Ok(Err(rejected)),
        };
        if self.store.get_book(input.book_id).await?.is_none() {
            return Ok(Err(Rejected {
                form: BookInstanceForm::from_input(&input),
                errors: vec![FieldError::new("book", "Book must be a valid selection.")],
            }));
        }
        Ok(Ok(input))
    }

    async fn form_data(
        &self,
        instance: Option<BookInstanceForm>,
        errors: Vec<FieldError>,
    ) -> AppResult<BookInstanceFormData> {
        let books = self.store.list_books().await?;
        let selected_book = instance.as_ref().and_then(BookInstanceForm::selected_book);
        Ok(BookInstanceFormData {
            books,
            selected_book,
            instance,
            errors,
        })
    }
}
