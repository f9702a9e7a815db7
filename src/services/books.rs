//! Book catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, StoreErrorKind},
    models::{
        Book, BookSearchParams, BookWithAuthor, CreateBook, PageEnvelope, UpdateBook,
    },
    repository::{AuthorStore, BookStore},
};

#[derive(Clone)]
pub struct BooksService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

fn translate_write_error(e: crate::error::StoreError) -> AppError {
    match e.kind {
        StoreErrorKind::UniqueViolation => {
            AppError::Conflict("ISBN is already registered".to_string())
        }
        StoreErrorKind::ForeignKeyViolation => {
            AppError::InvalidReference("authorId does not reference an existing author".to_string())
        }
        _ => e.into(),
    }
}

impl BooksService {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    /// List books, optionally restricted to one genre
    pub async fn list(&self, genre: Option<&str>) -> AppResult<Vec<BookWithAuthor>> {
        Ok(self.books.list(genre.map(str::to_owned)).await?)
    }

    /// Books of one author, 404 when the author does not exist
    pub async fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.authors.get(author_id).await?;
        Ok(self.books.list_by_author(author_id).await?)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookWithAuthor> {
        Ok(self.books.get(id).await?)
    }

    /// Create a book. ISBN must be unique and the author must exist.
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let new = data.into_new_book()?;
        let created = self.books.create(new).await.map_err(translate_write_error)?;
        tracing::info!("Created book {} for author {}", created.id, created.author_id);
        Ok(created)
    }

    /// Update the fields present in the request
    pub async fn update(&self, id: Uuid, data: UpdateBook) -> AppResult<Book> {
        let changes = data.checked()?;
        if changes.is_empty() {
            return Ok(self.books.get(id).await?.book);
        }
        let updated = self
            .books
            .update(id, changes)
            .await
            .map_err(translate_write_error)?;
        tracing::info!("Updated book {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.books.delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    /// Search books with filters, sorting and pagination.
    ///
    /// The count and the page are read with the same filters but not in one
    /// transaction, so `total` may be off by concurrent writes.
    pub async fn search(&self, params: &BookSearchParams) -> AppResult<PageEnvelope<BookWithAuthor>> {
        let search = params.normalize();
        tracing::debug!("Book search: {:?}", search);

        let (total, rows) = tokio::try_join!(self.books.count(&search), self.books.search(&search))?;

        Ok(PageEnvelope::new(rows, total, search.page, search.limit))
    }
}
