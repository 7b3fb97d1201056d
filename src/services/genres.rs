//! Genre service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, FieldError, Genre, GenreForm, Rejected},
};

use super::{FormOutcome, Store};

/// A genre with the books filed under it
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone)]
pub struct GenreFormData {
    pub genre: GenreForm,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct GenresService {
    store: Store,
}

impl GenresService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.list_genres().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let Some(genre) = self.store.get_genre(id).await? else {
            return Ok(None);
        };
        let books = self.store.books_by_genre(id).await?;
        Ok(Some(GenreDetail { genre, books }))
    }

    /// Create a genre, or hand back the existing one with the same name
    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreFormData>> {
        let input = match form.check() {
            Ok(input) => input,
            Err(Rejected { form, errors }) => {
                return Ok(FormOutcome::Invalid(GenreFormData { genre: form, errors }));
            }
        };

        if let Some(existing) = self.store.find_genre_by_name(&input.name).await? {
            tracing::debug!("Genre create: '{}' already exists as id={}", input.name, existing.id);
            return Ok(FormOutcome::Saved(existing));
        }

        let genre = self.store.create_genre(&input).await?;
        tracing::info!("Genre created: id={} name={}", genre.id, genre.name);
        Ok(FormOutcome::Saved(genre))
    }

    /// Remove the genre; books keep the stale id
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_genre(id).await? {
            tracing::info!("Genre deleted: id={}", id);
        }
        Ok(())
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreForm> {
        let genre = self
            .store
            .get_genre(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(GenreForm::from_genre(&genre))
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreFormData>> {
        match form.check() {
            Ok(input) => {
                let genre = self
                    .store
                    .update_genre(id, &input)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
                tracing::info!("Genre updated: id={}", genre.id);
                Ok(FormOutcome::Saved(genre))
            }
            Err(Rejected { form, errors }) => Ok(FormOutcome::Invalid(GenreFormData { genre: form, errors })),
        }
    }
}
