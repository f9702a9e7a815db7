//! API integration tests
//!
//! Require a running server with a migrated database:
//! `cargo test --test integration -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create an author with a unique email and return its id
async fn create_author(client: &Client, name: &str) -> String {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}@example.org", Uuid::new_v4()),
            "nationality": "Argentine",
            "birthYear": 1899
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No author ID").to_string()
}

/// Create a book with a unique ISBN and return its id
async fn create_book(client: &Client, author_id: &str, title: &str, year: i32, pages: i32, genre: &str) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "isbn": Uuid::new_v4().to_string(),
            "publishedYear": year,
            "pages": pages,
            "genre": genre,
            "authorId": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No book ID").to_string()
}

async fn delete(client: &Client, path: &str) -> u16 {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
        .as_u16()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_author_requires_name_and_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": "Nameless" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflicts() {
    let client = Client::new();
    let email = format!("{}@example.org", Uuid::new_v4());

    let first = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": "First", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);
    let body: Value = first.json().await.expect("Failed to parse response");
    let id = body["id"].as_str().expect("No author ID").to_string();

    let second = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": "Second", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);

    assert_eq!(delete(&client, &format!("/authors/{}", id)).await, 200);
}

#[tokio::test]
#[ignore]
async fn test_book_with_unknown_author_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan",
            "isbn": Uuid::new_v4().to_string(),
            "authorId": Uuid::new_v4()
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_author_stats_and_delete_guard() {
    let client = Client::new();
    let author_id = create_author(&client, "Jorge Luis Borges").await;
    let a = create_book(&client, &author_id, "El Aleph", 1949, 146, "Short stories").await;
    let b = create_book(&client, &author_id, "Ficciones", 1944, 174, "Short stories").await;
    let c = create_book(&client, &author_id, "El hacedor", 1960, 120, "Poetry").await;

    let response = client
        .get(format!("{}/authors/{}/stats", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let stats: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(stats["totalBooks"], 3);
    assert_eq!(stats["firstBook"]["title"], "Ficciones");
    assert_eq!(stats["latestBook"]["year"], 1960);
    assert_eq!(stats["averagePages"], 147);
    assert_eq!(stats["longestBook"]["pages"], 174);
    assert_eq!(stats["shortestBook"]["title"], "El hacedor");
    assert_eq!(stats["genres"].as_array().map(Vec::len), Some(2));

    // Books still reference the author
    assert_eq!(delete(&client, &format!("/authors/{}", author_id)).await, 409);

    for id in [a, b, c] {
        assert_eq!(delete(&client, &format!("/books/{}", id)).await, 200);
    }
    assert_eq!(delete(&client, &format!("/authors/{}", author_id)).await, 200);
    assert_eq!(delete(&client, &format!("/authors/{}", author_id)).await, 404);
}

#[tokio::test]
#[ignore]
async fn test_search_pagination() {
    let client = Client::new();
    let author_id = create_author(&client, &format!("Searchable {}", Uuid::new_v4())).await;
    let genre = format!("genre-{}", Uuid::new_v4());
    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(create_book(&client, &author_id, &format!("Volume {}", i), 2000 + i, 100, &genre).await);
    }

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[
            ("genre", genre.as_str()),
            ("limit", "2"),
            ("page", "2"),
            ("sortBy", "publishedYear"),
            ("order", "asc"),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["title"], "Volume 2");
    assert_eq!(body["data"][0]["author"]["id"], author_id.as_str());
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("genre", genre.as_str()), ("limit", "999"), ("page", "-5")])
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pagination"]["limit"], 50);
    assert_eq!(body["pagination"]["page"], 1);

    for id in ids {
        delete(&client, &format!("/books/{}", id)).await;
    }
    delete(&client, &format!("/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_update_book_keeps_missing_fields() {
    let client = Client::new();
    let author_id = create_author(&client, "Clarice Lispector").await;
    let book_id = create_book(&client, &author_id, "A hora da estrela", 1977, 96, "Novel").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "genre": null, "pages": 104 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "A hora da estrela");
    assert_eq!(body["pages"], 104);
    assert!(body["genre"].is_null());
    assert_eq!(body["publishedYear"], 1977);

    delete(&client, &format!("/books/{}", book_id)).await;
    delete(&client, &format!("/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_missing_book() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/{}", BASE_URL, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
