//! Book search parameters and paginated envelopes.
//!
//! Raw query strings arrive as [`BookSearchParams`], every field optional and
//! untyped. [`BookSearchParams::normalize`] defaults and clamps each field on
//! its own, so one bad value never spoils another. The resulting
//! [`BookSearch`] is what the store sees.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::book::BookWithAuthor;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

/// Raw query parameters of `GET /books/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookSearchParams {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Exact genre
    pub genre: Option<String>,
    /// Case-insensitive substring of the author's name
    pub author_name: Option<String>,
    /// Page number, from 1 (default: 1)
    pub page: Option<String>,
    /// Page size, 1 to 50 (default: 10)
    pub limit: Option<String>,
    /// title, publishedYear or createdAt (default: createdAt)
    pub sort_by: Option<String>,
    /// asc or desc (default: desc)
    pub order: Option<String>,
}

/// Column books can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Title,
    PublishedYear,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Parse the wire name, falling back to `CreatedAt`
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("title") => SortField::Title,
            Some("publishedYear") => SortField::PublishedYear,
            _ => SortField::CreatedAt,
        }
    }

    /// Qualified column in the `books b` relation
    pub fn column(self) -> &'static str {
        match self {
            SortField::Title => "b.title",
            SortField::PublishedYear => "b.published_year",
            SortField::CreatedAt => "b.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only the exact string `asc` selects ascending order
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated search, the same filters drive both the count and the page query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    pub title_contains: Option<String>,
    pub genre: Option<String>,
    pub author_name_contains: Option<String>,
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for BookSearch {
    fn default() -> Self {
        BookSearchParams::default().normalize()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn parse_int(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
}

impl BookSearchParams {
    /// Collect raw query pairs. A repeated key keeps its first value and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut params.search,
                "genre" => &mut params.genre,
                "authorName" => &mut params.author_name,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "sortBy" => &mut params.sort_by,
                "order" => &mut params.order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Default and clamp every field. Never fails.
    pub fn normalize(&self) -> BookSearch {
        let page = parse_int(&self.page)
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = parse_int(&self.limit)
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        BookSearch {
            title_contains: non_empty(&self.search),
            genre: non_empty(&self.genre),
            author_name_contains: non_empty(&self.author_name),
            page,
            limit,
            sort_by: SortField::from_param(self.sort_by.as_deref()),
            order: SortOrder::from_param(self.order.as_deref()),
        }
    }
}

impl BookSearch {
    /// Rows to skip before the current page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Build a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `\`
/// in the needle taken literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Pagination metadata, derived only from `total`, `page` and `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Requires `total >= 0` and `limit >= 1`.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        debug_assert!(total >= 0 && limit >= 1);
        let total_pages = (total / limit + i64::from(total % limit != 0)).max(1);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of results plus its pagination metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(BookPage = PageEnvelope<BookWithAuthor>)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PageEnvelope<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            pagination: Pagination::new(total, page, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BookSearchParams {
        BookSearchParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let q = params(&[("limit", "5"), ("limit", "6"), ("order", "asc"), ("order", "desc")])
            .normalize();
        assert_eq!(q.limit, 5);
        assert_eq!(q.order, SortOrder::Asc);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let p = params(&[("bogus", "1"), ("sort_by", "title"), ("genre", "Drama")]);
        assert_eq!(p.genre.as_deref(), Some("Drama"));
        assert_eq!(p.sort_by, None);
    }

    #[test]
    fn test_defaults() {
        let q = BookSearchParams::default().normalize();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert_eq!(q.sort_by, SortField::CreatedAt);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.title_contains, None);
        assert_eq!(q.genre, None);
        assert_eq!(q.author_name_contains, None);
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(params(&[("limit", "999")]).normalize().limit, 50);
        assert_eq!(params(&[("limit", "0")]).normalize().limit, 1);
        assert_eq!(params(&[("limit", "-4")]).normalize().limit, 1);
        assert_eq!(params(&[("limit", "abc")]).normalize().limit, 10);
        assert_eq!(params(&[("limit", "25")]).normalize().limit, 25);
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(params(&[("page", "-5")]).normalize().page, 1);
        assert_eq!(params(&[("page", "0")]).normalize().page, 1);
        assert_eq!(params(&[("page", "two")]).normalize().page, 1);
        assert_eq!(params(&[("page", "3")]).normalize().page, 3);
    }

    #[test]
    fn test_sort_and_order_fallbacks() {
        let q = params(&[("sortBy", "bogus"), ("order", "UP")]).normalize();
        assert_eq!(q.sort_by, SortField::CreatedAt);
        assert_eq!(q.order, SortOrder::Desc);

        let q = params(&[("sortBy", "publishedYear"), ("order", "asc")]).normalize();
        assert_eq!(q.sort_by, SortField::PublishedYear);
        assert_eq!(q.order, SortOrder::Asc);

        assert_eq!(params(&[("sortBy", "title")]).normalize().sort_by, SortField::Title);
        assert_eq!(params(&[("order", "ASC")]).normalize().order, SortOrder::Desc);
    }

    #[test]
    fn test_fields_are_independent() {
        let q = params(&[
            ("page", "x"),
            ("limit", "20"),
            ("sortBy", "nope"),
            ("order", "asc"),
            ("genre", "Drama"),
        ])
        .normalize();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 20);
        assert_eq!(q.sort_by, SortField::CreatedAt);
        assert_eq!(q.order, SortOrder::Asc);
        assert_eq!(q.genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_text_filters_pass_through() {
        let q = params(&[("search", "Dune"), ("authorName", "herbert"), ("genre", "")]).normalize();
        assert_eq!(q.title_contains.as_deref(), Some("Dune"));
        assert_eq!(q.author_name_contains.as_deref(), Some("herbert"));
        assert_eq!(q.genre, None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let p = params(&[("page", "4"), ("limit", "70"), ("search", "war")]);
        assert_eq!(p.normalize(), p.normalize());
    }

    #[test]
    fn test_offset() {
        let q = params(&[("page", "3"), ("limit", "20")]).normalize();
        assert_eq!(q.offset(), 40);
        assert_eq!(BookSearch::default().offset(), 0);
        let huge = params(&[("page", &i64::MAX.to_string())]).normalize();
        assert_eq!(huge.offset(), i64::MAX);
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("dune"), "%dune%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_envelope_middle_page() {
        let p = Pagination::new(23, 2, 10);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn test_envelope_empty() {
        let p = Pagination::new(0, 1, 10);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_envelope_formulas_hold() {
        for total in 0..=60 {
            for limit in 1..=12 {
                for page in 1..=8 {
                    let p = Pagination::new(total, page, limit);
                    let expected = std::cmp::max(1, (total as f64 / limit as f64).ceil() as i64);
                    assert_eq!(p.total_pages, expected);
                    assert_eq!(p.has_next, page < expected);
                    assert_eq!(p.has_prev, page > 1);
                    assert_eq!((p.total, p.page, p.limit), (total, page, limit));
                }
            }
        }
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let env = PageEnvelope::new(vec![1, 2], 12, 1, 2);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["pagination"]["totalPages"], 6);
        assert_eq!(json["pagination"]["hasNext"], true);
        assert_eq!(json["pagination"]["hasPrev"], false);
    }
}
