//! Author management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, StoreErrorKind},
    models::{Author, AuthorWithBooks, CreateAuthor, UpdateAuthor},
    repository::AuthorStore,
};

#[derive(Clone)]
pub struct AuthorsService {
    authors: Arc<dyn AuthorStore>,
}

impl AuthorsService {
    pub fn new(authors: Arc<dyn AuthorStore>) -> Self {
        Self { authors }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        Ok(self.authors.list().await?)
    }

    /// Get author by ID with their books
    pub async fn get(&self, id: Uuid) -> AppResult<AuthorWithBooks> {
        Ok(self.authors.get_with_books(id).await?)
    }

    /// Create an author. Email must be unique.
    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        let new = data.into_new_author()?;
        let created = self.authors.create(new).await.map_err(|e| match e.kind {
            StoreErrorKind::UniqueViolation => {
                AppError::Conflict("Email is already registered".to_string())
            }
            _ => e.into(),
        })?;
        tracing::info!("Created author {}", created.id);
        Ok(created)
    }

    /// Replace an author's fields
    pub async fn update(&self, id: Uuid, data: UpdateAuthor) -> AppResult<Author> {
        let new = data.into_new_author()?;
        let updated = self.authors.update(id, new).await.map_err(|e| match e.kind {
            StoreErrorKind::UniqueViolation => {
                AppError::Conflict("Email is already registered".to_string())
            }
            _ => e.into(),
        })?;
        tracing::info!("Updated author {}", id);
        Ok(updated)
    }

    /// Delete an author. Refused while books still reference them.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.authors.delete(id).await.map_err(|e| match e.kind {
            StoreErrorKind::ForeignKeyViolation => {
                AppError::StillReferenced(format!("Author {} still has books", id))
            }
            _ => e.into(),
        })?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }
}
