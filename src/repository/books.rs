//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{StoreError, StoreResult},
    models::{
        search::contains_pattern, Author, Book, BookSearch, BookWithAuthor, NewBook, UpdateBook,
    },
};

/// Book columns plus the owning author's, prefixed with `author_`
const BOOK_WITH_AUTHOR_SELECT: &str = r#"
    SELECT b.id, b.title, b.description, b.isbn, b.published_year, b.genre, b.pages,
           b.author_id, b.created_at, b.updated_at,
           a.name AS author_name, a.email AS author_email,
           a.nationality AS author_nationality, a.birth_year AS author_birth_year,
           a.bio AS author_bio, a.created_at AS author_created_at,
           a.updated_at AS author_updated_at
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

fn book_with_author(row: &PgRow) -> Result<BookWithAuthor, sqlx::Error> {
    let book = Book::from_row(row)?;
    let author = Author {
        id: book.author_id,
        name: row.try_get("author_name")?,
        email: row.try_get("author_email")?,
        nationality: row.try_get("author_nationality")?,
        birth_year: row.try_get("author_birth_year")?,
        bio: row.try_get("author_bio")?,
        created_at: row.try_get("author_created_at")?,
        updated_at: row.try_get("author_updated_at")?,
    };
    Ok(BookWithAuthor { book, author })
}

fn not_found(id: Uuid) -> StoreError {
    StoreError::not_found(format!("Book {} not found", id))
}

/// Append the search filters as a `WHERE` clause.
///
/// Shared by the count and the page query so both always see the same rows.
fn push_search_filters(qb: &mut QueryBuilder<'_, Postgres>, search: &BookSearch) {
    qb.push(" WHERE TRUE");
    if let Some(title) = &search.title_contains {
        qb.push(" AND b.title ILIKE ").push_bind(contains_pattern(title));
    }
    if let Some(genre) = &search.genre {
        qb.push(" AND b.genre = ").push_bind(genre.clone());
    }
    if let Some(name) = &search.author_name_contains {
        qb.push(" AND a.name ILIKE ").push_bind(contains_pattern(name));
    }
}

pub(crate) fn count_query(search: &BookSearch) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT COUNT(*) FROM books b JOIN authors a ON a.id = b.author_id",
    );
    push_search_filters(&mut qb, search);
    qb
}

pub(crate) fn page_query(search: &BookSearch) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(BOOK_WITH_AUTHOR_SELECT);
    push_search_filters(&mut qb, search);
    // id breaks ties so pages never overlap
    let dir = search.order.as_sql();
    qb.push(format!(" ORDER BY {} {}, b.id {}", search.sort_by.column(), dir, dir));
    qb.push(" LIMIT ").push_bind(search.limit);
    qb.push(" OFFSET ").push_bind(search.offset());
    qb
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, genre: Option<String>) -> StoreResult<Vec<BookWithAuthor>> {
        let mut qb = QueryBuilder::<Postgres>::new(BOOK_WITH_AUTHOR_SELECT);
        if let Some(genre) = genre {
            qb.push(" WHERE b.genre = ").push_bind(genre);
        }
        qb.push(" ORDER BY b.created_at DESC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        let books = rows
            .iter()
            .map(book_with_author)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    async fn list_by_author(&self, author_id: Uuid) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = $1 ORDER BY created_at DESC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> StoreResult<BookWithAuthor> {
        let query = format!("{} WHERE b.id = $1", BOOK_WITH_AUTHOR_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(book_with_author(&row)?)
    }

    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, isbn, published_year, genre, pages, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.isbn)
        .bind(book.published_year)
        .bind(&book.genre)
        .bind(book.pages)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: UpdateBook) -> StoreResult<Book> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE books SET updated_at = NOW()");

        macro_rules! set_field {
            ($column:literal, $value:expr) => {
                if let Some(value) = $value {
                    qb.push(concat!(", ", $column, " = ")).push_bind(value);
                }
            };
        }

        set_field!("title", changes.title);
        set_field!("description", changes.description);
        set_field!("isbn", changes.isbn);
        set_field!("published_year", changes.published_year);
        set_field!("genre", changes.genre);
        set_field!("pages", changes.pages);
        set_field!("author_id", changes.author_id);

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Book>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn count(&self, search: &BookSearch) -> StoreResult<i64> {
        let total = count_query(search)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn search(&self, search: &BookSearch) -> StoreResult<Vec<BookWithAuthor>> {
        let rows = page_query(search).build().fetch_all(&self.pool).await?;
        let books = rows
            .iter()
            .map(book_with_author)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }
}
