//! Business logic services

pub mod authors;
pub mod books;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let author_store = repository.author_store();
        let book_store = repository.book_store();
        Self {
            authors: authors::AuthorsService::new(author_store.clone()),
            books: books::BooksService::new(author_store.clone(), book_store),
            stats: stats::StatsService::new(author_store),
            repository,
        }
    }

    /// Check the database is reachable
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        Ok(self.repository.ping().await?)
    }
}
