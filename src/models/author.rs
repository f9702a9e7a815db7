//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::book::Book;
use crate::error::{AppError, AppResult};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    /// Unique across all authors
    pub email: String,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author with all of their books
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

/// Create author request.
///
/// Also used as the body of `PUT /authors/{id}`, which replaces every field:
/// optional fields left out are cleared.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub bio: Option<String>,
}

/// Update author request (full replacement)
pub type UpdateAuthor = CreateAuthor;

/// Validated author fields, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub bio: Option<String>,
}

impl CreateAuthor {
    /// Check the request and turn it into store input
    pub fn into_new_author(self) -> AppResult<NewAuthor> {
        self.validate()?;

        let (Some(name), Some(email)) = (self.name, self.email) else {
            return Err(AppError::Validation("name and email are required".to_string()));
        };

        Ok(NewAuthor {
            name,
            email,
            nationality: self.nationality,
            birth_year: self.birth_year,
            bio: self.bio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>) -> CreateAuthor {
        CreateAuthor {
            name: name.map(String::from),
            email: email.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_name_and_email() {
        assert!(matches!(
            request(None, Some("a@b.org")).into_new_author(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request(Some("Ursula"), None).into_new_author(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_name_and_bad_email() {
        assert!(matches!(
            request(Some(""), Some("a@b.org")).into_new_author(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request(Some("Ursula"), Some("not-an-email")).into_new_author(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_valid_request() {
        let new = request(Some("Ursula K. Le Guin"), Some("ursula@example.org"))
            .into_new_author()
            .unwrap();
        assert_eq!(new.name, "Ursula K. Le Guin");
        assert_eq!(new.nationality, None);
    }

    #[test]
    fn test_camel_case_body() {
        let req: CreateAuthor = serde_json::from_str(
            r#"{"name":"Borges","email":"jlb@example.org","birthYear":1899}"#,
        )
        .unwrap();
        assert_eq!(req.birth_year, Some(1899));
    }
}
