//! Book pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookForm, FieldError},
    services::{books::BookFormData, FormOutcome},
    AppState,
};

use super::{
    parse_id,
    views::{AuthorView, BookInstanceView, BookView, GenreChoiceView, View},
};

#[derive(Debug, Serialize)]
pub struct BookListData {
    pub book_list: Vec<BookView>,
}

#[derive(Debug, Serialize)]
pub struct BookDetailData {
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize)]
pub struct BookFormView {
    pub authors: Vec<AuthorView>,
    pub selected_author: Option<Uuid>,
    pub genres: Vec<GenreChoiceView>,
    pub book: Option<BookForm>,
    pub errors: Vec<FieldError>,
}

impl From<BookFormData> for BookFormView {
    fn from(data: BookFormData) -> Self {
        Self {
            authors: data.authors.iter().map(AuthorView::from).collect(),
            selected_author: data.book.as_ref().and_then(BookForm::selected_author),
            genres: data.genres.iter().map(GenreChoiceView::from).collect(),
            book: data.book,
            errors: data.errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookDeleteData {
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

const BOOK_LIST: &str = "/catalog/books";

/// List all books, sorted by title
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses((status = 200, description = "book_list view"))
)]
pub async fn book_list(State(state): State<AppState>) -> AppResult<View<BookListData>> {
    let books = state.services.books.list().await?;
    Ok(View::new(
        "book_list",
        "Book List",
        BookListData {
            book_list: books.iter().map(BookView::from).collect(),
        },
    ))
}

/// Book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "book_detail view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookDetailData>> {
    let detail = state.services.books.detail(parse_id(&id)?).await?;
    let book = BookView::new(&detail.book, Some(&detail.author), &detail.genres);
    Ok(View::new(
        "book_detail",
        detail.book.title.clone(),
        BookDetailData {
            book,
            book_instances: detail.instances.iter().map(BookInstanceView::from).collect(),
        },
    ))
}

/// Empty book form
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses((status = 200, description = "book_form view"))
)]
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<View<BookFormView>> {
    let data = state.services.books.create_form().await?;
    Ok(View::new("book_form", "Create Book", data.into()))
}

/// Create a book, or show the form again with errors
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new book"),
        (status = 200, description = "book_form view with field errors")
    )
)]
pub async fn book_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    Ok(match state.services.books.create(form).await? {
        FormOutcome::Saved(book) => Redirect::to(&book.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("book_form", "Create Book", BookFormView::from(data)).into_response()
        }
    })
}

/// Delete confirmation listing the copies that reference the book
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "book_delete view"),
        (status = 303, description = "Book already gone, redirect to the list")
    )
)]
pub async fn book_delete_get(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Some(deletion) = state.services.books.deletion(parse_id(&id)?).await? else {
        return Ok(Redirect::to(BOOK_LIST).into_response());
    };
    Ok(View::new(
        "book_delete",
        "Delete Book",
        BookDeleteData {
            book: BookView::from(&deletion.book),
            book_instances: deletion.instances.iter().map(BookInstanceView::from).collect(),
        },
    )
    .into_response())
}

/// Delete the book; its copies are left in place
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses((status = 303, description = "Redirect to the book list"))
)]
pub async fn book_delete_post(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Redirect> {
    state.services.books.delete(parse_id(&id)?).await?;
    Ok(Redirect::to(BOOK_LIST))
}

/// Book form prefilled with the stored values
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "book_form view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookFormView>> {
    let data = state.services.books.update_form(parse_id(&id)?).await?;
    Ok(View::new("book_form", "Update Book", data.into()))
}

/// Replace the book's fields, keeping its id
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the updated book"),
        (status = 200, description = "book_form view with field errors"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    Ok(match state.services.books.update(parse_id(&id)?, form).await? {
        FormOutcome::Saved(book) => Redirect::to(&book.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("book_form", "Update Book", BookFormView::from(data)).into_response()
        }
    })
}
