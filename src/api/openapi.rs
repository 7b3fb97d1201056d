//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, genres, health, home, views};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.3.0",
        description = "Local library catalog: books, authors, genres and book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        home::index,
        // Books
        books::book_list,
        books::book_detail,
        books::book_create_get,
        books::book_create_post,
        books::book_delete_get,
        books::book_delete_post,
        books::book_update_get,
        books::book_update_post,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_get,
        authors::author_create_post,
        authors::author_delete_get,
        authors::author_delete_post,
        authors::author_update_get,
        authors::author_update_post,
        // Genres
        genres::genre_list,
        genres::genre_detail,
        genres::genre_create_get,
        genres::genre_create_post,
        genres::genre_delete_get,
        genres::genre_delete_post,
        genres::genre_update_get,
        genres::genre_update_post,
        // Book instances
        book_instances::bookinstance_list,
        book_instances::bookinstance_detail,
        book_instances::bookinstance_create_get,
        book_instances::bookinstance_create_post,
        book_instances::bookinstance_delete_get,
        book_instances::bookinstance_delete_post,
        book_instances::bookinstance_update_get,
        book_instances::bookinstance_update_post,
    ),
    components(
        schemas(
            // Records
            crate::models::Author,
            crate::models::Genre,
            crate::models::Book,
            crate::models::BookInstance,
            crate::models::BookInstanceStatus,
            // Forms
            crate::models::AuthorForm,
            crate::models::GenreForm,
            crate::models::BookForm,
            crate::models::BookInstanceForm,
            crate::models::FieldError,
            // Views
            views::AuthorView,
            views::GenreView,
            views::GenreChoiceView,
            views::BookView,
            views::BookInstanceView,
            home::HomeData,
            crate::services::home::CatalogCounts,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home and record counts"),
        (name = "books", description = "Book pages"),
        (name = "authors", description = "Author pages"),
        (name = "genres", description = "Genre pages"),
        (name = "bookinstances", description = "Book copy pages")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
