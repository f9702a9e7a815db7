//! Book endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Book, BookListQuery, BookSearchParams, BookWithAuthor, CreateBook, PageEnvelope,
        UpdateBook,
    },
    AppState,
};

use super::{
    extract::{AppJson, AppPath, QueryPairs},
    MessageResponse,
};

/// List books with their author, optionally filtered by genre
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<BookWithAuthor>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryPairs(pairs): QueryPairs,
) -> AppResult<Json<Vec<BookWithAuthor>>> {
    let query = BookListQuery::from_pairs(pairs);
    let books = state.services.books.list(query.genre()).await?;
    Ok(Json(books))
}

/// Search books with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookSearchParams),
    responses(
        (status = 200, description = "One page of matching books", body = crate::models::search::BookPage)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    QueryPairs(pairs): QueryPairs,
) -> AppResult<Json<PageEnvelope<BookWithAuthor>>> {
    let params = BookSearchParams::from_pairs(pairs);
    let page = state.services.books.search(&params).await?;
    Ok(Json(page))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing fields or unknown author", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get book details with its author
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookWithAuthor),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<BookWithAuthor>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid fields or unknown author", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(id, data).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}
