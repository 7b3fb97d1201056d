//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    author::Author,
    form::{self, field_errors, FieldError, FormList, Rejected},
    genre::Genre,
};

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with its author resolved. The author is `None` when the reference dangles.
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Validated book fields
#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

/// Book create/update form. `genre` may be posted zero, one or many times.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub genre: FormList,
}

impl BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn"];

    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book
                .genre_ids
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    /// Form holding already sanitized values, for re-rendering
    pub fn from_input(input: &BookInput) -> Self {
        Self {
            title: input.title.clone(),
            author: input.author_id.to_string(),
            summary: input.summary.clone(),
            isbn: input.isbn.clone(),
            genre: input
                .genre_ids
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    /// Ids of the genres ticked on the form, skipping anything unparsable
    pub fn selected_genres(&self) -> Vec<Uuid> {
        self.genre
            .iter()
            .filter_map(|g| Uuid::parse_str(g).ok())
            .collect()
    }

    /// Ids of the author picked on the form
    pub fn selected_author(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.author).ok()
    }

    pub fn check(mut self) -> Result<BookInput, Rejected<BookForm>> {
        form::trim(&mut self.title);
        form::trim(&mut self.author);
        form::trim(&mut self.summary);
        form::trim(&mut self.isbn);

        let mut errors = field_errors(self.validate(), Self::FIELDS);

        self.title = form::escape(&self.title);
        self.author = form::escape(&self.author);
        self.summary = form::escape(&self.summary);
        self.isbn = form::escape(&self.isbn);
        self.genre = self
            .genre
            .iter()
            .map(|g| form::escape(g.trim()))
            .filter(|g| !g.is_empty())
            .collect::<Vec<_>>()
            .into();

        let author_id = match form::parse_id(&self.author) {
            Ok(id) => id,
            Err(_) => {
                errors.push(FieldError::new("author", "Author must be a valid selection."));
                None
            }
        };

        let mut genre_ids = Vec::with_capacity(self.genre.0.len());
        for value in self.genre.iter() {
            match Uuid::parse_str(value) {
                Ok(id) if !genre_ids.contains(&id) => genre_ids.push(id),
                Ok(_) => {}
                Err(_) => {
                    errors.push(FieldError::new("genre", "Genre selection is invalid."));
                    break;
                }
            }
        }

        match (errors.is_empty(), author_id) {
            (true, Some(author_id)) => Ok(BookInput {
                title: self.title,
                author_id,
                summary: self.summary,
                isbn: self.isbn,
                genre_ids,
            }),
            _ => Err(Rejected { form: self, errors }),
        }
    }
}

/// A genre offered on the book form
#[derive(Debug, Clone, PartialEq)]
pub struct GenreChoice {
    pub genre: Genre,
    pub checked: bool,
}

/// Tick every genre whose id is among `selected`
pub fn genre_choices(genres: Vec<Genre>, selected: &[Uuid]) -> Vec<GenreChoice> {
    genres
        .into_iter()
        .map(|genre| {
            let checked = selected.iter().any(|id| *id == genre.id);
            GenreChoice { genre, checked }
        })
        .collect()
}
