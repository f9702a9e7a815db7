//! Data models for Bookshelf

pub mod author;
pub mod book;
pub mod search;
pub mod stats;

// Re-export commonly used types
pub use author::{Author, AuthorWithBooks, CreateAuthor, NewAuthor, UpdateAuthor};
pub use book::{Book, BookListQuery, BookWithAuthor, CreateBook, NewBook, UpdateBook};
pub use search::{BookSearch, BookSearchParams, PageEnvelope, Pagination};
pub use stats::{AuthorStats, BookPages, BookYear};
