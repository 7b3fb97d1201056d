//! View models handed to the template layer
//!
//! Every page is a [`View`]: the template name, the page title and the
//! page-specific data flattened next to them. Records carry their derived
//! fields (canonical `url`, author `name` and `lifespan`, formatted due date)
//! so templates never compute them.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    Author, Book, BookInstance, BookInstanceStatus, BookWithAuthor, Genre, GenreChoice,
};

/// A rendered page
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub template: &'static str,
    pub title: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> View<T> {
    pub fn new(template: &'static str, title: impl Into<String>, data: T) -> Self {
        Self {
            template,
            title: title.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<&Author> for AuthorView {
    fn from(a: &Author) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name.clone(),
            family_name: a.family_name.clone(),
            date_of_birth: a.date_of_birth,
            date_of_death: a.date_of_death,
            name: a.name(),
            lifespan: a.lifespan(),
            url: a.url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreView {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl From<&Genre> for GenreView {
    fn from(g: &Genre) -> Self {
        Self {
            id: g.id,
            name: g.name.clone(),
            url: g.url(),
        }
    }
}

/// A genre checkbox on the book form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreChoiceView {
    #[serde(flatten)]
    pub genre: GenreView,
    pub checked: bool,
}

impl From<&GenreChoice> for GenreChoiceView {
    fn from(c: &GenreChoice) -> Self {
        Self {
            genre: GenreView::from(&c.genre),
            checked: c.checked,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    /// `None` when the author record no longer exists
    pub author: Option<AuthorView>,
    pub genre: Vec<GenreView>,
    pub url: String,
}

impl BookView {
    pub fn new(book: &Book, author: Option<&Author>, genres: &[Genre]) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author_id: book.author_id,
            author: author.map(AuthorView::from),
            genre: genres.iter().map(GenreView::from).collect(),
            url: book.url(),
        }
    }
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self::new(book, None, &[])
    }
}

impl From<&BookWithAuthor> for BookView {
    fn from(b: &BookWithAuthor) -> Self {
        Self::new(&b.book, b.author.as_ref(), &[])
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
    pub due_back_formatted: String,
    /// `None` when the book record no longer exists
    pub book: Option<BookView>,
    pub url: String,
}

impl BookInstanceView {
    pub fn new(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            id: instance.id,
            book_id: instance.book_id,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
            due_back_formatted: instance.due_back_formatted(),
            book: book.map(BookView::from),
            url: instance.url(),
        }
    }
}

impl From<&BookInstance> for BookInstanceView {
    fn from(instance: &BookInstance) -> Self {
        Self::new(instance, None)
    }
}
