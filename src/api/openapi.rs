//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Library catalog REST API: authors, books, search and statistics"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::create_author,
        authors::get_author,
        authors::update_author,
        authors::delete_author,
        authors::list_author_books,
        authors::get_author_stats,
        // Books
        books::list_books,
        books::search_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorWithBooks,
            crate::models::author::CreateAuthor,
            // Books
            crate::models::book::Book,
            crate::models::book::BookWithAuthor,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Search
            crate::models::search::Pagination,
            crate::models::search::BookPage,
            // Stats
            crate::models::stats::AuthorStats,
            crate::models::stats::BookYear,
            crate::models::stats::BookPages,
            // Health
            health::HealthResponse,
            // Common
            super::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management and statistics"),
        (name = "books", description = "Book catalog and search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
