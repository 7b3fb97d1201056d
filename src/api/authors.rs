//! Author pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{AuthorForm, FieldError},
    services::{authors::AuthorFormData, FormOutcome},
    AppState,
};

use super::{
    parse_id,
    views::{AuthorView, BookView, View},
};

#[derive(Debug, Serialize)]
pub struct AuthorListData {
    pub author_list: Vec<AuthorView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetailData {
    pub author: AuthorView,
    pub author_books: Vec<BookView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorFormView {
    pub author: Option<AuthorForm>,
    pub errors: Vec<FieldError>,
}

impl From<AuthorFormData> for AuthorFormView {
    fn from(data: AuthorFormData) -> Self {
        Self {
            author: Some(data.author),
            errors: data.errors,
        }
    }
}

const AUTHOR_LIST: &str = "/catalog/authors";

/// List all authors, sorted by family name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses((status = 200, description = "author_list view"))
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<View<AuthorListData>> {
    let authors = state.services.authors.list().await?;
    Ok(View::new(
        "author_list",
        "Author List",
        AuthorListData {
            author_list: authors.iter().map(AuthorView::from).collect(),
        },
    ))
}

/// Author with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 200, description = "author_detail view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<AuthorDetailData>> {
    let detail = state.services.authors.detail(parse_id(&id)?).await?;
    Ok(View::new(
        "author_detail",
        "Author Detail",
        AuthorDetailData {
            author: AuthorView::from(&detail.author),
            author_books: detail.books.iter().map(BookView::from).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses((status = 200, description = "author_form view"))
)]
pub async fn author_create_get() -> View<AuthorFormView> {
    View::new(
        "author_form",
        "Create Author",
        AuthorFormView {
            author: None,
            errors: Vec::new(),
        },
    )
}

#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new author"),
        (status = 200, description = "author_form view with field errors")
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    Ok(match state.services.authors.create(form).await? {
        FormOutcome::Saved(author) => Redirect::to(&author.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("author_form", "Create Author", AuthorFormView::from(data)).into_response()
        }
    })
}

/// Delete confirmation listing the author's books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 200, description = "author_delete view"),
        (status = 303, description = "Author already gone, redirect to the list")
    )
)]
pub async fn author_delete_get(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Some(detail) = state.services.authors.find(parse_id(&id)?).await? else {
        return Ok(Redirect::to(AUTHOR_LIST).into_response());
    };
    Ok(View::new(
        "author_delete",
        "Delete Author",
        AuthorDetailData {
            author: AuthorView::from(&detail.author),
            author_books: detail.books.iter().map(BookView::from).collect(),
        },
    )
    .into_response())
}

/// Delete the author even if books still reference them
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    responses((status = 303, description = "Redirect to the author list"))
)]
pub async fn author_delete_post(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Redirect> {
    state.services.authors.delete(parse_id(&id)?).await?;
    Ok(Redirect::to(AUTHOR_LIST))
}

#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 200, description = "author_form view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<AuthorFormView>> {
    let form = state.services.authors.update_form(parse_id(&id)?).await?;
    Ok(View::new(
        "author_form",
        "Update Author",
        AuthorFormView {
            author: Some(form),
            errors: Vec::new(),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author id")),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the updated author"),
        (status = 200, description = "author_form view with field errors"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    Ok(match state.services.authors.update(parse_id(&id)?, form).await? {
        FormOutcome::Saved(author) => Redirect::to(&author.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("author_form", "Update Author", AuthorFormView::from(data)).into_response()
        }
    })
}
