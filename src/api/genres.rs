//! Genre pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{FieldError, GenreForm},
    services::{genres::GenreFormData, FormOutcome},
    AppState,
};

use super::{
    parse_id,
    views::{BookView, GenreView, View},
};

#[derive(Debug, Serialize)]
pub struct GenreListData {
    pub genre_list: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailData {
    pub genre: GenreView,
    pub genre_books: Vec<BookView>,
}

#[derive(Debug, Serialize)]
pub struct GenreFormView {
    pub genre: Option<GenreForm>,
    pub errors: Vec<FieldError>,
}

impl From<GenreFormData> for GenreFormView {
    fn from(data: GenreFormData) -> Self {
        Self {
            genre: Some(data.genre),
            errors: data.errors,
        }
    }
}

const GENRE_LIST: &str = "/catalog/genres";

#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses((status = 200, description = "genre_list view"))
)]
pub async fn genre_list(State(state): State<AppState>) -> AppResult<View<GenreListData>> {
    let genres = state.services.genres.list().await?;
    Ok(View::new(
        "genre_list",
        "Genre List",
        GenreListData {
            genre_list: genres.iter().map(GenreView::from).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = String, Path, description = "Genre id")),
    responses(
        (status = 200, description = "genre_detail view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<GenreDetailData>> {
    let detail = state.services.genres.detail(parse_id(&id)?).await?;
    Ok(View::new(
        "genre_detail",
        "Genre Detail",
        GenreDetailData {
            genre: GenreView::from(&detail.genre),
            genre_books: detail.books.iter().map(BookView::from).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses((status = 200, description = "genre_form view"))
)]
pub async fn genre_create_get() -> View<GenreFormView> {
    View::new(
        "genre_form",
        "Create Genre",
        GenreFormView {
            genre: None,
            errors: Vec::new(),
        },
    )
}

/// Create a genre; an existing genre of the same name is reused
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new or existing genre"),
        (status = 200, description = "genre_form view with field errors")
    )
)]
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    Ok(match state.services.genres.create(form).await? {
        FormOutcome::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("genre_form", "Create Genre", GenreFormView::from(data)).into_response()
        }
    })
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = String, Path, description = "Genre id")),
    responses(
        (status = 200, description = "genre_delete view"),
        (status = 303, description = "Genre already gone, redirect to the list")
    )
)]
pub async fn genre_delete_get(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Some(detail) = state.services.genres.find(parse_id(&id)?).await? else {
        return Ok(Redirect::to(GENRE_LIST).into_response());
    };
    Ok(View::new(
        "genre_delete",
        "Delete Genre",
        GenreDetailData {
            genre: GenreView::from(&detail.genre),
            genre_books: detail.books.iter().map(BookView::from).collect(),
        },
    )
    .into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = String, Path, description = "Genre id")),
    responses((status = 303, description = "Redirect to the genre list"))
)]
pub async fn genre_delete_post(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Redirect> {
    state.services.genres.delete(parse_id(&id)?).await?;
    Ok(Redirect::to(GENRE_LIST))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = String, Path, description = "Genre id")),
    responses(
        (status = 200, description = "genre_form view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<GenreFormView>> {
    let form = state.services.genres.update_form(parse_id(&id)?).await?;
    Ok(View::new(
        "genre_form",
        "Update Genre",
        GenreFormView {
            genre: Some(form),
            errors: Vec::new(),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = String, Path, description = "Genre id")),
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the updated genre"),
        (status = 200, description = "genre_form view with field errors"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    Ok(match state.services.genres.update(parse_id(&id)?, form).await? {
        FormOutcome::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        FormOutcome::Invalid(data) => {
            View::new("genre_form", "Update Genre", GenreFormView::from(data)).into_response()
        }
    })
}
