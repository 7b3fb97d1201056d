//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;
pub mod openapi;
pub mod views;

use axum::{
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{error::{AppError, AppResult}, AppState};

/// Parse an id taken from the URL. Malformed ids cannot name a record.
pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("No record with id {}", raw)))
}

/// Routes under `/catalog`
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        // Books
        .route("/books", get(books::book_list))
        .route("/book/create", get(books::book_create_get).post(books::book_create_post))
        .route("/book/:id", get(books::book_detail))
        .route("/book/:id/delete", get(books::book_delete_get).post(books::book_delete_post))
        .route("/book/:id/update", get(books::book_update_get).post(books::book_update_post))
        // Authors
        .route("/authors", get(authors::author_list))
        .route("/author/create", get(authors::author_create_get).post(authors::author_create_post))
        .route("/author/:id", get(authors::author_detail))
        .route("/author/:id/delete", get(authors::author_delete_get).post(authors::author_delete_post))
        .route("/author/:id/update", get(authors::author_update_get).post(authors::author_update_post))
        // Genres
        .route("/genres", get(genres::genre_list))
        .route("/genre/create", get(genres::genre_create_get).post(genres::genre_create_post))
        .route("/genre/:id", get(genres::genre_detail))
        .route("/genre/:id/delete", get(genres::genre_delete_get).post(genres::genre_delete_post))
        .route("/genre/:id/update", get(genres::genre_update_get).post(genres::genre_update_post))
        // Book instances
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get).post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get).post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get).post(book_instances::bookinstance_update_post),
        )
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog_routes())
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
