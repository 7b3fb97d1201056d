//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{BookInstanceForm, BookInstanceStatus, FieldError},
    services::{book_instances::BookInstanceFormData, FormOutcome},
    AppState,
};

use super::{
    parse_id,
    views::{BookInstanceView, BookView, View},
};

#[derive(Debug, Serialize)]
pub struct BookInstanceListData {
    pub bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDetailData {
    pub bookinstance: BookInstanceView,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceFormView {
    pub book_list: Vec<BookView>,
    pub selected_book: Option<Uuid>,
    pub statuses: Vec<BookInstanceStatus>,
    pub bookinstance: Option<BookInstanceForm>,
    pub errors: Vec<FieldError>,
}

impl From<BookInstanceFormData> for BookInstanceFormView {
    fn from(data: BookInstanceFormData) -> Self {
        Self {
            book_list: data.books.iter().map(BookView::from).collect(),
            selected_book: data.selected_book,
            statuses: BookInstanceStatus::ALL.to_vec(),
            bookinstance: data.instance,
            errors: data.errors,
        }
    }
}

const BOOKINSTANCE_LIST: &str = "/catalog/bookinstances";

/// List all copies with their books
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses((status = 200, description = "bookinstance_list view"))
)]
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<View<BookInstanceListData>> {
    let instances = state.services.book_instances.list().await?;
    Ok(View::new(
        "bookinstance_list",
        "Book Instance List",
        BookInstanceListData {
            bookinstance_list: instances
                .iter()
                .map(|i| BookInstanceView::new(&i.instance, i.book.as_ref()))
                .collect(),
        },
    ))
}

/// One copy, titled after its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance id")),
    responses(
        (status = 200, description = "bookinstance_detail view"),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookInstanceDetailData>> {
    let (instance, book) = state.services.book_instances.detail(parse_id(&id)?).await?;
    Ok(View::new(
        "bookinstance_detail",
        format!("Copy: {}", book.title),
        BookInstanceDetailData {
            bookinstance: BookInstanceView::new(&instance, Some(&book)),
        },
    ))
}

/// Empty copy form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses((status = 200, description = "bookinstance_form view"))
)]
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<View<BookInstanceFormView>> {
    let data = state.services.book_instances.create_form().await?;
    Ok(View::new("bookinstance_form", "Create BookInstance", data.into()))
}

/// Create a copy, or show the form again with errors
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new copy"),
        (status = 200, description = "bookinstance_form view with field errors")
    )
)]
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.create(form).await? {
        FormOutcome::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("bookinstance_form", "Create BookInstance", BookInstanceFormView::from(data))
                .into_response()
        }
    })
}

/// Delete confirmation for a single copy
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance id")),
    responses(
        (status = 200, description = "bookinstance_delete view"),
        (status = 303, description = "Copy already gone, redirect to the list")
    )
)]
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(found) = state.services.book_instances.deletion(parse_id(&id)?).await? else {
        return Ok(Redirect::to(BOOKINSTANCE_LIST).into_response());
    };
    Ok(View::new(
        "bookinstance_delete",
        "Delete Book Instance",
        BookInstanceDetailData {
            bookinstance: BookInstanceView::new(&found.instance, found.book.as_ref()),
        },
    )
    .into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance id")),
    responses((status = 303, description = "Redirect to the copy list"))
)]
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.services.book_instances.delete(parse_id(&id)?).await?;
    Ok(Redirect::to(BOOKINSTANCE_LIST))
}

/// Copies cannot be edited
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance id")),
    responses((status = 501, description = "Not implemented", body = crate::error::ErrorResponse))
)]
pub async fn bookinstance_update_get(Path(_id): Path<String>) -> AppError {
    AppError::NotImplemented("BookInstance update GET".to_string())
}

/// Copies cannot be edited
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance id")),
    responses((status = 501, description = "Not implemented", body = crate::error::ErrorResponse))
)]
pub async fn bookinstance_update_post(Path(_id): Path<String>) -> AppError {
    AppError::NotImplemented("BookInstance update POST".to_string())
}
