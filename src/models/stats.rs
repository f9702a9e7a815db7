//! Per-author statistics returned by `GET /authors/{id}/stats`

use indexmap::IndexSet;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A book identified by title, with its publication year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookYear {
    pub title: String,
    pub year: Option<i32>,
}

/// A book identified by title, with its page count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookPages {
    pub title: String,
    pub pages: Option<i32>,
}

/// Aggregate statistics over one author's books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub author_id: Uuid,
    pub author_name: String,
    /// Every book counts, with or without year and pages
    pub total_books: i64,
    /// Earliest published book
    pub first_book: Option<BookYear>,
    /// Most recently published book
    pub latest_book: Option<BookYear>,
    /// Mean page count over books that have one, rounded half up
    pub average_pages: i64,
    /// Distinct genres in first-seen order
    #[schema(value_type = Vec<String>)]
    pub genres: IndexSet<String>,
    pub longest_book: Option<BookPages>,
    pub shortest_book: Option<BookPages>,
}
