//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::author::Author;
use crate::error::{AppError, AppResult};

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Unique across all books
    pub isbn: String,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub pages: Option<i32>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with its author embedded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

/// Query for `GET /books`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    /// Exact genre filter
    pub genre: Option<String>,
}

impl BookListQuery {
    /// Collect raw query pairs, keeping the first `genre`
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let genre = pairs
            .into_iter()
            .find(|(key, _)| key == "genre")
            .map(|(_, value)| value);
        Self { genre }
    }

    /// Genre filter, with an empty value meaning no filter
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

/// Create book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "isbn must not be empty"))]
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    #[validate(range(min = 0, message = "pages must not be negative"))]
    pub pages: Option<i32>,
    pub author_id: Option<Uuid>,
}

/// Validated book fields, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub isbn: String,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub pages: Option<i32>,
    pub author_id: Uuid,
}

impl CreateBook {
    /// Check the request and turn it into store input
    pub fn into_new_book(self) -> AppResult<NewBook> {
        self.validate()?;

        let (Some(title), Some(isbn), Some(author_id)) = (self.title, self.isbn, self.author_id)
        else {
            return Err(AppError::Validation(
                "title, isbn and authorId are required".to_string(),
            ));
        };

        Ok(NewBook {
            title,
            description: self.description,
            isbn,
            published_year: self.published_year,
            genre: self.genre,
            pages: self.pages,
            author_id,
        })
    }
}

/// Update book request.
///
/// Fields left out are kept. Nullable fields sent as `null` are cleared.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, message = "isbn must not be empty"))]
    pub isbn: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub published_year: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub genre: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub pages: Option<Option<i32>>,
    pub author_id: Option<Uuid>,
}

impl UpdateBook {
    /// Check the request before it reaches the store
    pub fn checked(self) -> AppResult<Self> {
        self.validate()?;
        if let Some(Some(pages)) = self.pages {
            if pages < 0 {
                return Err(AppError::Validation("pages must not be negative".to_string()));
            }
        }
        Ok(self)
    }

    /// True when the request would not touch any column
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
