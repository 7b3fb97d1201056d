//! Book catalog service

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::genre_choices, Author, Book, BookForm, BookInput, BookInstance, BookWithAuthor,
        FieldError, Genre, GenreChoice, Rejected,
    },
};

use super::{FormOutcome, Store};

/// Everything the book detail page shows
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Book form with its choice lists
#[derive(Debug, Clone)]
pub struct BookFormData {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreChoice>,
    /// Values to prefill; `None` for a blank form
    pub book: Option<BookForm>,
    pub errors: Vec<FieldError>,
}

/// A book about to be deleted, with the copies that will be left behind
#[derive(Debug, Clone)]
pub struct BookDeletion {
    pub book: Book,
    pub instances: Vec<BookInstance>,
}

#[derive(Clone)]
pub struct BooksService {
    store: Store,
}

impl BooksService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All books by title, with their authors
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = self.store.list_books().await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author_id).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors: HashMap<Uuid, Author> = self
            .store
            .authors_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author_id).cloned();
                BookWithAuthor { book, author }
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let book = self
            .store
            .get_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let author = self
            .store
            .get_author(book.author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author of book {} not found", id)))?;
        let genres = self.store.genres_by_ids(&book.genre_ids).await?;
        let instances = self.store.book_instances_by_book(id).await?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Blank create form
    pub async fn create_form(&self) -> AppResult<BookFormData> {
        self.form_data(None, Vec::new()).await
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<Book, BookFormData>> {
        match self.check(form).await? {
            Ok(input) => {
                let book = self.store.create_book(&input).await?;
                tracing::info!("Book created: id={} title={}", book.id, book.title);
                Ok(FormOutcome::Saved(book))
            }
            Err(Rejected { form, errors }) => {
                tracing::debug!("Book create rejected: {} field error(s)", errors.len());
                Ok(FormOutcome::Invalid(self.form_data(Some(form), errors).await?))
            }
        }
    }

    /// Confirmation data; `None` when the book is already gone
    pub async fn deletion(&self, id: Uuid) -> AppResult<Option<BookDeletion>> {
        let Some(book) = self.store.get_book(id).await? else {
            return Ok(None);
        };
        let instances = self.store.book_instances_by_book(id).await?;
        Ok(Some(BookDeletion { book, instances }))
    }

    /// Remove the book whether or not copies still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_book(id).await? {
            tracing::info!("Book deleted: id={}", id);
        } else {
            tracing::debug!("Book delete: id={} was already gone", id);
        }
        Ok(())
    }

    /// Update form prefilled from the stored book
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookFormData> {
        let book = self
            .store
            .get_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        self.form_data(Some(BookForm::from_book(&book)), Vec::new()).await
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<FormOutcome<Book, BookFormData>> {
        match self.check(form).await? {
            Ok(input) => {
                let book = self
                    .store
                    .update_book(id, &input)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
                tracing::info!("Book updated: id={}", book.id);
                Ok(FormOutcome::Saved(book))
            }
            Err(Rejected { form, errors }) => Ok(FormOutcome::Invalid(self.form_data(Some(form), errors).await?)),
        }
    }

    /// Field rules first, then the author and every genre must exist
    async fn check(&self, form: BookForm) -> AppResult<Result<BookInput, Rejected<BookForm>>> {
        let input = match form.check() {
            Ok(input) => input,
            Err(rejected) => return Ok(Err(rejected)),
        };

        let mut errors = Vec::new();
        if self.store.get_author(input.author_id).await?.is_none() {
            errors.push(FieldError::new("author", "Author must be a valid selection."));
        }
        if !input.genre_ids.is_empty() {
            let found = self.store.genres_by_ids(&input.genre_ids).await?;
            if found.len() != input.genre_ids.len() {
                errors.push(FieldError::new("genre", "Genre selection is invalid."));
            }
        }

        if errors.is_empty() {
            Ok(Ok(input))
        } else {
            Ok(Err(Rejected {
                form: BookForm::from_input(&input),
                errors,
            }))
        }
    }

    async fn form_data(&self, book: Option<BookForm>, errors: Vec<FieldError>) -> AppResult<BookFormData> {
        let authors = self.store.list_authors().await?;
        let genres = self.store.list_genres().await?;
        let selected = book.as_ref().map(BookForm::selected_genres).unwrap_or_default();

        Ok(BookFormData {
            authors,
            genres: genre_choices(genres, &selected),
            book,
            errors,
        })
    }
}
