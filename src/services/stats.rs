//! Statistics service

use std::sync::Arc;

use indexmap::IndexSet;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AuthorStats, Book, BookPages, BookYear},
    repository::AuthorStore,
};

/// Aggregate one author's books.
///
/// Pure and total: any slice, including an empty one, yields a value.
/// Among books tied on the smallest year or page count the one listed first
/// wins; among books tied on the largest the one listed last wins, which is
/// what taking both ends of a stable ascending sort gives.
pub fn compute_author_stats(author_id: Uuid, author_name: &str, books: &[Book]) -> AuthorStats {
    let first_book = books
        .iter()
        .filter(|b| b.published_year.is_some())
        .min_by_key(|b| b.published_year)
        .map(book_year);
    let latest_book = books
        .iter()
        .filter(|b| b.published_year.is_some())
        .max_by_key(|b| b.published_year)
        .map(book_year);

    let with_pages: Vec<(&Book, i32)> = books
        .iter()
        .filter_map(|b| b.pages.map(|p| (b, p)))
        .collect();
    let average_pages = if with_pages.is_empty() {
        0
    } else {
        let sum: i64 = with_pages.iter().map(|(_, p)| i64::from(*p)).sum();
        round_half_up(sum as f64 / with_pages.len() as f64)
    };
    let shortest_book = with_pages
        .iter()
        .min_by_key(|(_, p)| *p)
        .map(|(b, _)| book_pages(b));
    let longest_book = with_pages
        .iter()
        .max_by_key(|(_, p)| *p)
        .map(|(b, _)| book_pages(b));

    let genres: IndexSet<String> = books
        .iter()
        .filter_map(|b| b.genre.as_deref())
        .filter(|g| !g.is_empty())
        .map(str::to_owned)
        .collect();

    AuthorStats {
        author_id,
        author_name: author_name.to_owned(),
        total_books: books.len() as i64,
        first_book,
        latest_book,
        average_pages,
        genres,
        longest_book,
        shortest_book,
    }
}

/// 2.5 -> 3, 2.4 -> 2
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn book_year(book: &Book) -> BookYear {
    BookYear {
        title: book.title.clone(),
        year: book.published_year,
    }
}

fn book_pages(book: &Book) -> BookPages {
    BookPages {
        title: book.title.clone(),
        pages: book.pages,
    }
}

#[derive(Clone)]
pub struct StatsService {
    authors: Arc<dyn AuthorStore>,
}

impl StatsService {
    pub fn new(authors: Arc<dyn AuthorStore>) -> Self {
        Self { authors }
    }

    /// Statistics for one author, 404 when the author does not exist
    pub async fn author_stats(&self, author_id: Uuid) -> AppResult<AuthorStats> {
        let found = self.authors.get_with_books(author_id).await?;
        tracing::debug!(
            "Computing stats for author {} over {} books",
            author_id,
            found.books.len()
        );
        Ok(compute_author_stats(
            found.author.id,
            &found.author.name,
            &found.books,
        ))
    }
}
