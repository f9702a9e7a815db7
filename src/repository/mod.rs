//! Repository layer for database operations.
//!
//! Services talk to the store through [`AuthorStore`] and [`BookStore`]; the
//! Postgres implementations live in the submodules. Every failure comes back
//! as a [`StoreError`](crate::error::StoreError) with a closed kind.

pub mod authors;
pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::StoreResult,
    models::{
        Author, AuthorWithBooks, Book, BookSearch, BookWithAuthor, NewAuthor, NewBook, UpdateBook,
    },
};

/// Author persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors, newest first
    async fn list(&self) -> StoreResult<Vec<Author>>;

    async fn get(&self, id: Uuid) -> StoreResult<Author>;

    /// Author with every book they own
    async fn get_with_books(&self, id: Uuid) -> StoreResult<AuthorWithBooks>;

    async fn create(&self, author: NewAuthor) -> StoreResult<Author>;

    /// Replace every writable field
    async fn update(&self, id: Uuid, author: NewAuthor) -> StoreResult<Author>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Book persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books with their author, newest first, optionally of one genre
    async fn list(&self, genre: Option<String>) -> StoreResult<Vec<BookWithAuthor>>;

    /// Books of one author, newest first
    async fn list_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Book>>;

    async fn get(&self, id: Uuid) -> StoreResult<BookWithAuthor>;

    async fn create(&self, book: NewBook) -> StoreResult<Book>;

    /// Apply the fields present in `changes`
    async fn update(&self, id: Uuid, changes: UpdateBook) -> StoreResult<Book>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Number of books matching the search filters, ignoring pagination
    async fn count(&self, search: &BookSearch) -> StoreResult<i64>;

    /// Current page of books matching the search
    async fn search(&self, search: &BookSearch) -> StoreResult<Vec<BookWithAuthor>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn author_store(&self) -> Arc<dyn AuthorStore> {
        Arc::new(self.authors.clone())
    }

    pub fn book_store(&self) -> Arc<dyn BookStore> {
        Arc::new(self.books.clone())
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
