//! Catalog pages driven through the router

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use shelfmark_server::models::BookInstanceStatus;

use crate::memory_store::{app, MemoryStore};

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap().to_string()
}

fn id_from(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

async fn create_author(app: &Router) -> String {
    let response = post_form(
        app,
        "/catalog/author/create",
        "first_name=Ursula&family_name=LeGuin&date_of_birth=1929-10-21&date_of_death=2018-01-22",
    )
    .await;
    id_from(&location(&response))
}

async fn create_genre(app: &Router, name: &str) -> String {
    let response = post_form(app, "/catalog/genre/create", &format!("name={}", name)).await;
    id_from(&location(&response))
}

async fn create_book(app: &Router, author: &str, genres: &[&str]) -> String {
    let mut body = format!(
        "title=Earthsea&author={}&summary=A+wizard+grows+up&isbn=9780547773742",
        author
    );
    for genre in genres {
        body.push_str(&format!("&genre={}", genre));
    }
    let response = post_form(app, "/catalog/book/create", &body).await;
    id_from(&location(&response))
}

#[tokio::test]
async fn root_redirects_to_catalog() {
    let app = app(MemoryStore::new());
    let response = get(&app, "/").await;
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
async fn health_and_readiness() {
    let app = app(MemoryStore::new());

    let body = json(get(&app, "/health").await).await;
    assert_eq!(body["status"], "healthy");

    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "ready");
}

#[tokio::test]
async fn home_reports_counts() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;
    let genre = create_genre(&app, "Fantasy").await;
    let book = create_book(&app, &author, &[&genre]).await;
    post_form(&app, "/catalog/bookinstance/create", &format!("book={}&imprint=Parnassus", book)).await;
    post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Puffin&status=Available", book),
    )
    .await;

    let body = json(get(&app, "/catalog").await).await;
    assert_eq!(body["template"], "index");
    assert_eq!(body["title"], "Local Library Home");
    assert!(body["error"].is_null());
    assert_eq!(body["data"]["book_count"], 1);
    assert_eq!(body["data"]["book_instance_count"], 2);
    assert_eq!(body["data"]["book_instance_available_count"], 1);
    assert_eq!(body["data"]["author_count"], 1);
    assert_eq!(body["data"]["genre_count"], 1);
}

#[tokio::test]
async fn home_shows_count_failure_instead_of_erroring() {
    let app = app(MemoryStore::with_failing_counts());
    let response = get(&app, "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().unwrap().contains("store offline"));
}

#[tokio::test]
async fn author_detail_derives_name_and_lifespan() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;

    let body = json(get(&app, &format!("/catalog/author/{}", author)).await).await;
    assert_eq!(body["template"], "author_detail");
    assert_eq!(body["author"]["name"], "LeGuin, Ursula");
    assert_eq!(body["author"]["lifespan"], "1929 - 2018");
    assert_eq!(body["author"]["url"], format!("/catalog/author/{}", author));
    assert_eq!(body["author_books"], Value::Array(vec![]));
}

#[tokio::test]
async fn book_create_escapes_and_links_genres() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let fantasy = create_genre(&app, "Fantasy").await;
    let classic = create_genre(&app, "Classic").await;

    let body = format!(
        "title=Tom+%26+Jerry+%3C3%3E&author={}&summary=Cat&isbn=1&genre={}&genre={}",
        author, fantasy, classic
    );
    let response = post_form(&app, "/catalog/book/create", &body).await;
    let url = location(&response);

    let detail = json(get(&app, &url).await).await;
    assert_eq!(detail["template"], "book_detail");
    assert_eq!(detail["title"], "Tom &amp; Jerry &lt;3&gt;");
    assert_eq!(detail["book"]["author"]["name"], "LeGuin, Ursula");
    let genres: Vec<&str> = detail["book"]["genre"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(genres, vec!["Classic", "Fantasy"]);
}

#[tokio::test]
async fn book_genre_accepts_single_and_absent_values() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let fantasy = create_genre(&app, "Fantasy").await;

    let single = create_book(&app, &author, &[&fantasy]).await;
    let detail = json(get(&app, &format!("/catalog/book/{}", single)).await).await;
    assert_eq!(detail["book"]["genre"].as_array().unwrap().len(), 1);

    let none = create_book(&app, &author, &[]).await;
    let detail = json(get(&app, &format!("/catalog/book/{}", none)).await).await;
    assert_eq!(detail["book"]["genre"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn book_create_with_empty_title_rerenders_form() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;

    let response = post_form(
        &app,
        "/catalog/book/create",
        &format!("title=+++&author={}&summary=s&isbn=1", author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["template"], "book_form");
    assert_eq!(body["title"], "Create Book");
    assert_eq!(body["errors"][0]["param"], "title");
    assert_eq!(body["errors"][0]["msg"], "Title must not be empty.");
    assert_eq!(body["book"]["title"], "");
    assert_eq!(body["authors"].as_array().unwrap().len(), 1);
    assert_eq!(store.book_count(), 0);
}

#[tokio::test]
async fn book_create_with_unknown_author_rerenders_form() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    create_author(&app).await;

    let response = post_form(
        &app,
        "/catalog/book/create",
        &format!("title=Earthsea&author={}&summary=s&isbn=1", Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["template"], "book_form");
    assert_eq!(body["errors"][0]["param"], "author");
    assert_eq!(body["errors"][0]["msg"], "Author must be a valid selection.");
    assert_eq!(body["book"]["title"], "Earthsea");
    assert_eq!(store.book_count(), 0);
}

#[tokio::test]
async fn book_create_with_unknown_genre_rerenders_form() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;
    let fantasy = create_genre(&app, "Fantasy").await;

    let response = post_form(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Earthsea&author={}&summary=s&isbn=1&genre={}&genre={}",
            author,
            fantasy,
            Uuid::new_v4()
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["errors"][0]["param"], "genre");
    assert_eq!(body["errors"][0]["msg"], "Genre selection is invalid.");
    assert_eq!(store.book_count(), 0);
}

#[tokio::test]
async fn book_update_form_ticks_selected_genres() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let fantasy = create_genre(&app, "Fantasy").await;
    let classic = create_genre(&app, "Classic").await;
    let book = create_book(&app, &author, &[&fantasy]).await;

    let body = json(get(&app, &format!("/catalog/book/{}/update", book)).await).await;
    assert_eq!(body["title"], "Update Book");
    assert_eq!(body["selected_author"], author);
    for choice in body["genres"].as_array().unwrap() {
        let id = choice["id"].as_str().unwrap();
        assert_eq!(choice["checked"], id == fantasy, "genre {}", id);
    }
    assert!(body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"] == classic.as_str()));
}

#[tokio::test]
async fn book_update_keeps_id() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;

    let response = post_form(
        &app,
        &format!("/catalog/book/{}/update", book),
        &format!("title=Tehanu&author={}&summary=Later&isbn=2", author),
    )
    .await;
    assert_eq!(location(&response), format!("/catalog/book/{}", book));

    let detail = json(get(&app, &format!("/catalog/book/{}", book)).await).await;
    assert_eq!(detail["title"], "Tehanu");
}

#[tokio::test]
async fn invalid_book_update_rerenders_and_keeps_record() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;

    let response = post_form(
        &app,
        &format!("/catalog/book/{}/update", book),
        &format!("title=+++&author={}&summary=s&isbn=1", author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["template"], "book_form");
    assert_eq!(body["title"], "Update Book");
    assert_eq!(body["errors"][0]["param"], "title");

    let detail = json(get(&app, &format!("/catalog/book/{}", book)).await).await;
    assert_eq!(detail["title"], "Earthsea");
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let app = app(MemoryStore::new());

    let response = get(&app, &format!("/catalog/book/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json(response).await;
    assert_eq!(body["template"], "error");
    assert_eq!(body["status"], 404);

    let response = get(&app, "/catalog/author/not-an-id").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, &format!("/catalog/genre/{}/update", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn genre_create_reuses_existing_name() {
    let app = app(MemoryStore::new());
    let first = create_genre(&app, "Fantasy").await;
    let again = create_genre(&app, "fantasy").await;
    assert_eq!(first, again);

    let body = json(get(&app, "/catalog/genres").await).await;
    assert_eq!(body["genre_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn genre_name_too_short_is_rejected() {
    let app = app(MemoryStore::new());
    let response = post_form(&app, "/catalog/genre/create", "name=SF").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["template"], "genre_form");
    assert_eq!(body["errors"][0]["msg"], "Genre name must contain at least 3 characters");
}

#[tokio::test]
async fn deleting_book_leaves_its_copies() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;
    post_form(&app, "/catalog/bookinstance/create", &format!("book={}&imprint=Ace", book)).await;

    let confirm = json(get(&app, &format!("/catalog/book/{}/delete", book)).await).await;
    assert_eq!(confirm["template"], "book_delete");
    assert_eq!(confirm["book_instances"].as_array().unwrap().len(), 1);

    let response = post_form(&app, &format!("/catalog/book/{}/delete", book), "").await;
    assert_eq!(location(&response), "/catalog/books");
    assert_eq!(store.book_count(), 0);
    assert_eq!(store.book_instances().len(), 1);

    let list = json(get(&app, "/catalog/bookinstances").await).await;
    assert!(list["bookinstance_list"][0]["book"].is_null());
}

#[tokio::test]
async fn deleting_author_leaves_books_without_author() {
    let app = app(MemoryStore::new());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;

    let response = post_form(&app, &format!("/catalog/author/{}/delete", author), "").await;
    assert_eq!(location(&response), "/catalog/authors");

    let list = json(get(&app, "/catalog/books").await).await;
    assert!(list["book_list"][0]["author"].is_null());

    let response = get(&app, &format!("/catalog/book/{}", book)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_page_for_missing_record_redirects_to_list() {
    let app = app(MemoryStore::new());
    let response = get(&app, &format!("/catalog/author/{}/delete", Uuid::new_v4())).await;
    assert_eq!(location(&response), "/catalog/authors");
}

#[tokio::test]
async fn book_instance_defaults_to_maintenance() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;

    let response = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=First+edition", book),
    )
    .await;
    let url = location(&response);

    let instances = store.book_instances();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].status, BookInstanceStatus::Maintenance);
    assert_eq!(url, format!("/catalog/bookinstance/{}", instances[0].id));

    let detail = json(get(&app, &url).await).await;
    assert_eq!(detail["title"], "Copy: Earthsea");
    assert_eq!(detail["bookinstance"]["status"], "Maintenance");
}

#[tokio::test]
async fn book_instance_with_unknown_status_is_rejected() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let author = create_author(&app).await;
    let book = create_book(&app, &author, &[]).await;

    let response = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Ace&status=Lost", book),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["errors"][0]["param"], "status");
    assert_eq!(body["errors"][0]["msg"], "Invalid status");
    assert_eq!(body["selected_book"], book);
    assert!(store.book_instances().is_empty());
}

#[tokio::test]
async fn book_instance_for_unknown_book_is_rejected() {
    let store = MemoryStore::new();
    let app = app(store.clone());

    let response = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Ace", Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["errors"][0]["param"], "book");
    assert_eq!(body["errors"][0]["msg"], "Book must be a valid selection.");
    assert!(store.book_instances().is_empty());
}

#[tokio::test]
async fn book_instance_update_is_not_implemented() {
    let app = app(MemoryStore::new());
    let id = Uuid::new_v4();

    let response = get(&app, &format!("/catalog/bookinstance/{}/update", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let response = post_form(&app, &format!("/catalog/bookinstance/{}/update", id), "").await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}
