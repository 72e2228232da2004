//! In-process tests of the catalog pages against the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{self, header, Method, StatusCode},
    Router,
};
use catalog_server::{
    config::AppConfig,
    create_router,
    models::{AuthorData, BookData, BookInstanceData, BookInstanceStatus, GenreData, RecordId},
    repository::{CatalogStore, MemoryStore, Repository},
    services::Services,
    AppState,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use tower::ServiceExt;

/// Maximum body size for testing purposes.
const MAX_BODY_SIZE: usize = 1024 * 1024;

struct TestContext {
    store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    fn setup() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(Repository::new(store.clone()))),
        };
        Self { store, app: create_router(state) }
    }

    fn get<U: AsRef<str>>(&self, uri: U) -> OneShotBuilder {
        OneShotBuilder::new(self.app.clone(), (Method::GET, uri))
    }

    fn post<U: AsRef<str>>(&self, uri: U) -> OneShotBuilder {
        OneShotBuilder::new(self.app.clone(), (Method::POST, uri))
    }

    async fn author(&self, first: &str, family: &str) -> catalog_server::models::Author {
        self.store
            .insert_author(AuthorData {
                first_name: first.to_string(),
                family_name: family.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    async fn book(&self, title: &str, author: RecordId) -> catalog_server::models::Book {
        self.store
            .insert_book(BookData {
                title: title.to_string(),
                author,
                summary: None,
                isbn: "9780000000000".to_string(),
                genre: vec![],
            })
            .await
            .unwrap()
    }
}

/// Builder for a single request to the app.
#[must_use]
struct OneShotBuilder {
    app: Router,
    builder: http::request::Builder,
}

impl OneShotBuilder {
    fn new<U: AsRef<str>>(app: Router, (method, uri): (Method, U)) -> Self {
        let builder = http::Request::builder().method(method).uri(uri.as_ref());
        Self { app, builder }
    }

    async fn send_empty(self) -> ResponseChecker {
        let request = self.builder.body(Body::empty()).unwrap();
        ResponseChecker::from(self.app.oneshot(request).await.unwrap())
    }

    /// Sends `form` url-encoded; sequences of pairs may repeat a name
    async fn send_form<T: Serialize>(self, form: T) -> ResponseChecker {
        let request = self
            .builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(&form).unwrap()))
            .unwrap();
        ResponseChecker::from(self.app.oneshot(request).await.unwrap())
    }
}

/// Validator for the outcome of a request sent by a `OneShotBuilder`.
#[must_use]
struct ResponseChecker {
    response: http::Response<Body>,
    exp_status: StatusCode,
}

impl From<http::Response<Body>> for ResponseChecker {
    fn from(response: http::Response<Body>) -> Self {
        Self { response, exp_status: StatusCode::OK }
    }
}

impl ResponseChecker {
    fn expect_status(mut self, status: StatusCode) -> Self {
        self.exp_status = status;
        self
    }

    fn verify(&self) {
        assert_eq!(self.exp_status, self.response.status());
    }

    /// Expects a `302 Found` and returns its location
    fn expect_redirect(self) -> String {
        let checker = self.expect_status(StatusCode::FOUND);
        checker.verify();
        checker.response.headers()[header::LOCATION].to_str().unwrap().to_string()
    }

    async fn take_body_as_text(self) -> String {
        self.verify();
        let body = axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn expect_text(self, needle: &str) -> String {
        let body = self.take_body_as_text().await;
        assert!(body.contains(needle), "Body does not contain '{}': {}", needle, body);
        body
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let context = TestContext::setup();
    assert_eq!("/catalog", context.get("/").send_empty().await.expect_redirect());
}

#[tokio::test]
async fn test_catalog_index_counts() {
    let context = TestContext::setup();
    let author = context.author("Ann", "Leckie").await;
    let book = context.book("Ancillary Justice", author.id).await;
    for status in [BookInstanceStatus::Available, BookInstanceStatus::Loaned] {
        context
            .store
            .insert_book_instance(catalog_server::models::BookInstanceData {
                book: book.id,
                imprint: "Orbit".to_string(),
                status,
                due_back: chrono::Utc::now(),
            })
            .await
            .unwrap();
    }

    let body = context.get("/catalog").send_empty().await.take_body_as_text().await;
    assert!(body.contains("<strong>Books:</strong> 1"));
    assert!(body.contains("<strong>Copies:</strong> 2"));
    assert!(body.contains("<strong>Copies available:</strong> 1"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
    assert!(body.contains("<strong>Genres:</strong> 0"));
}

#[tokio::test]
async fn test_health() {
    let context = TestContext::setup();
    context.get("/health").send_empty().await.expect_text("\"status\":\"healthy\"").await;
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let context = TestContext::setup();
    context
        .get("/catalog/shelves")
        .send_empty()
        .await
        .expect_status(StatusCode::NOT_FOUND)
        .expect_text("Not Found")
        .await;
}

// ---------------------------------------------------------------------------
// Detail lookups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_detail_missing_is_404_for_every_resource() {
    let context = TestContext::setup();
    let id = RecordId::generate();
    for (resource, message) in [
        ("author", "Author not found"),
        ("book", "Book not found"),
        ("genre", "Genre not found"),
        ("bookinstance", "Book copy not found"),
    ] {
        context
            .get(format!("/catalog/{}/{}", resource, id))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_text(message)
            .await;
    }
}

#[tokio::test]
async fn test_detail_malformed_id_is_store_failure() {
    let context = TestContext::setup();
    context
        .get("/catalog/book/not-an-id")
        .send_empty()
        .await
        .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
        .expect_text("Internal Server Error")
        .await;
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_missing_field_rerenders_form() {
    let context = TestContext::setup();
    for (uri, field) in [
        ("/catalog/author/create", "first_name"),
        ("/catalog/genre/create", "name"),
        ("/catalog/book/create", "title"),
        ("/catalog/bookinstance/create", "imprint"),
    ] {
        context
            .post(uri)
            .send_form([("unrelated", "value")])
            .await
            .expect_text(&format!(r#"data-field="{}""#, field))
            .await;
    }

    assert_eq!(0, context.store.count_authors().await.unwrap());
    assert_eq!(0, context.store.count_genres().await.unwrap());
    assert_eq!(0, context.store.count_books().await.unwrap());
    assert_eq!(0, context.store.count_book_instances(None).await.unwrap());
}

#[tokio::test]
async fn test_create_author_sanitizes_and_redirects() {
    let context = TestContext::setup();
    let location = context
        .post("/catalog/author/create")
        .send_form([
            ("first_name", "  Octavia "),
            ("family_name", "Butler"),
            ("date_of_birth", "1947-06-22"),
            ("date_of_death", ""),
        ])
        .await
        .expect_redirect();

    let authors = context.store.list_authors().await.unwrap();
    assert_eq!(1, authors.len());
    assert_eq!(authors[0].url(), location);
    assert_eq!("Octavia", authors[0].first_name);
    assert_eq!("1947-06-22", authors[0].birthday_str());
    assert_eq!(None, authors[0].date_of_death);

    context.get(&location).send_empty().await.expect_text("Octavia, Butler").await;
}

#[tokio::test]
async fn test_create_book_with_genres() {
    let context = TestContext::setup();
    let author = context.author("Iain", "Banks").await;
    let sf = context.store.insert_genre(GenreData { name: "Science Fiction".into() }).await.unwrap();
    let space = context.store.insert_genre(GenreData { name: "Space Opera".into() }).await.unwrap();

    let author_id = author.id.to_string();
    let sf_id = sf.id.to_string();
    let space_id = space.id.to_string();
    let location = context
        .post("/catalog/book/create")
        .send_form(vec![
            ("title", "Consider Phlebas"),
            ("author", author_id.as_str()),
            ("summary", "The Culture"),
            ("isbn", "9780316005388"),
            ("genre", sf_id.as_str()),
            ("genre", space_id.as_str()),
        ])
        .await
        .expect_redirect();

    let books = context.store.list_books().await.unwrap();
    assert_eq!(1, books.len());
    assert_eq!(books[0].url(), location);
    assert_eq!(vec![sf.id, space.id], books[0].genre);

    let body = context.get(&location).send_empty().await.take_body_as_text().await;
    assert!(body.contains("Iain, Banks"));
    assert!(body.contains("Science Fiction"));
    assert!(body.contains("Space Opera"));
}

#[tokio::test]
async fn test_create_book_rejected_keeps_genre_checked() {
    let context = TestContext::setup();
    let genre = context.store.insert_genre(GenreData { name: "Horror".into() }).await.unwrap();
    let genre_id = genre.id.to_string();

    let body = context
        .post("/catalog/book/create")
        .send_form([("title", "It"), ("genre", genre_id.as_str())])
        .await
        .expect_text(r#"data-field="author""#)
        .await;
    assert!(body.contains(&format!(r#"value="{}" checked>"#, genre_id)));
    assert!(body.contains(r#"value="It""#));
}

#[tokio::test]
async fn test_create_book_malformed_author_is_500() {
    let context = TestContext::setup();
    context
        .post("/catalog/book/create")
        .send_form([("title", "T"), ("author", "12345"), ("isbn", "1")])
        .await
        .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
        .take_body_as_text()
        .await;
    assert_eq!(0, context.store.count_books().await.unwrap());
}

#[tokio::test]
async fn test_create_genre_is_idempotent_by_name() {
    let context = TestContext::setup();
    let first =
        context.post("/catalog/genre/create").send_form([("name", "Fantasy")]).await.expect_redirect();
    let second =
        context.post("/catalog/genre/create").send_form([("name", "Fantasy")]).await.expect_redirect();

    assert_eq!(first, second);
    assert_eq!(1, context.store.count_genres().await.unwrap());
}

#[tokio::test]
async fn test_create_book_instance_due_back_round_trip() {
    let context = TestContext::setup();
    let author = context.author("Robin", "Hobb").await;
    let book = context.book("Assassin's Apprentice", author.id).await;
    let book_id = book.id.to_string();

    let location = context
        .post("/catalog/bookinstance/create")
        .send_form([
            ("book", book_id.as_str()),
            ("imprint", "Voyager, 1996"),
            ("status", "Loaned"),
            ("due_back", "2024-11-05"),
        ])
        .await
        .expect_redirect();

    let instances = context.store.list_book_instances().await.unwrap();
    assert_eq!(1, instances.len());
    assert_eq!(instances[0].url(), location);
    assert_eq!("2024-11-05", instances[0].due_back_formatted());

    let body = context.get(&location).send_empty().await.take_body_as_text().await;
    assert!(body.contains("Copy: Assassin&#39;s Apprentice"));
    assert!(body.contains("2024-11-05"));
}

#[tokio::test]
async fn test_create_book_instance_defaults() {
    let context = TestContext::setup();
    let book = context.book("Dune", RecordId::generate()).await;
    let book_id = book.id.to_string();

    context
        .post("/catalog/bookinstance/create")
        .send_form([("book", book_id.as_str()), ("imprint", "Ace"), ("status", ""), ("due_back", "")])
        .await
        .expect_redirect();

    let instances = context.store.list_book_instances().await.unwrap();
    assert_eq!(BookInstanceStatus::Maintenance, instances[0].status);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_missing_record_redirects_to_list() {
    let context = TestContext::setup();
    let id = RecordId::generate();
    for (resource, list) in [
        ("author", "/catalog/authors"),
        ("book", "/catalog/books"),
        ("genre", "/catalog/genres"),
        ("bookinstance", "/catalog/bookinstances"),
    ] {
        let location = context
            .get(format!("/catalog/{}/{}/update", resource, id))
            .send_empty()
            .await
            .expect_redirect();
        assert_eq!(list, location);
    }
}

#[tokio::test]
async fn test_update_book_preserves_id() {
    let context = TestContext::setup();
    let author = context.author("Ted", "Chiang").await;
    let book = context.book("Stories of Your Life", author.id).await;
    let author_id = author.id.to_string();

    context
        .get(format!("{}/update", book.url()))
        .send_empty()
        .await
        .expect_text(r#"value="Stories of Your Life""#)
        .await;

    let location = context
        .post(format!("{}/update", book.url()))
        .send_form([
            ("title", "Exhalation"),
            ("author", author_id.as_str()),
            ("isbn", "9781101947883"),
        ])
        .await
        .expect_redirect();
    assert_eq!(book.url(), location);

    let books = context.store.list_books().await.unwrap();
    assert_eq!(1, books.len());
    assert_eq!(book.id, books[0].id);
    assert_eq!("Exhalation", books[0].title);
}

#[tokio::test]
async fn test_update_author_rejected_rerenders() {
    let context = TestContext::setup();
    let author = context.author("Mary", "Shelley").await;

    context
        .post(format!("{}/update", author.url()))
        .send_form([("first_name", "Mary"), ("family_name", "Wollstonecraft Shelley")])
        .await
        .expect_text("Family name has non-alphanumeric characters.")
        .await;

    let stored = context.store.find_author(author.id).await.unwrap().unwrap();
    assert_eq!("Shelley", stored.family_name);
}

#[tokio::test]
async fn test_update_author_rewrites_record() {
    let context = TestContext::setup();
    let author = context.author("Ursula", "Leguin").await;

    context
        .get(format!("{}/update", author.url()))
        .send_empty()
        .await
        .expect_text(r#"value="Leguin""#)
        .await;

    let location = context
        .post(format!("{}/update", author.url()))
        .send_form([
            ("first_name", " Ursula "),
            ("family_name", "LeGuin"),
            ("date_of_birth", "1929-10-21"),
            ("date_of_death", "2018-01-22"),
        ])
        .await
        .expect_redirect();
    assert_eq!(author.url(), location);

    let authors = context.store.list_authors().await.unwrap();
    assert_eq!(1, authors.len());
    assert_eq!(author.id, authors[0].id);
    assert_eq!("Ursula", authors[0].first_name);
    assert_eq!("LeGuin", authors[0].family_name);
    assert_eq!("1929-10-21 ~ 2018-01-22", authors[0].lifespan());

    context.get(&location).send_empty().await.expect_text("Ursula, LeGuin").await;
}

#[tokio::test]
async fn test_update_genre_rewrites_record() {
    let context = TestContext::setup();
    let genre = context.store.insert_genre(GenreData { name: "Scifi".to_string() }).await.unwrap();

    context
        .get(format!("{}/update", genre.url()))
        .send_empty()
        .await
        .expect_text(r#"value="Scifi""#)
        .await;

    let location = context
        .post(format!("{}/update", genre.url()))
        .send_form([("name", "Science Fiction")])
        .await
        .expect_redirect();
    assert_eq!(genre.url(), location);

    let genres = context.store.list_genres().await.unwrap();
    assert_eq!(1, genres.len());
    assert_eq!(genre.id, genres[0].id);
    assert_eq!("Science Fiction", genres[0].name);
}

#[tokio::test]
async fn test_update_book_without_genre_clears_genres() {
    let context = TestContext::setup();
    let author = context.author("Susanna", "Clarke").await;
    let genre = context.store.insert_genre(GenreData { name: "Fantasy".to_string() }).await.unwrap();
    let book = context
        .store
        .insert_book(BookData {
            title: "Piranesi".to_string(),
            author: author.id,
            summary: None,
            isbn: "9781635575637".to_string(),
            genre: vec![genre.id],
        })
        .await
        .unwrap();
    let author_id = author.id.to_string();

    let location = context
        .post(format!("{}/update", book.url()))
        .send_form([("title", "Piranesi"), ("author", author_id.as_str()), ("isbn", "9781635575637")])
        .await
        .expect_redirect();
    assert_eq!(book.url(), location);

    let stored = context.store.find_book(book.id).await.unwrap().unwrap();
    assert!(stored.genre.is_empty());
}

#[tokio::test]
async fn test_update_book_instance_prefills_form() {
    let context = TestContext::setup();
    let author = context.author("Iain", "Banks").await;
    let other = context.book("Excession", author.id).await;
    let book = context.book("Use of Weapons", author.id).await;
    let instance = context
        .store
        .insert_book_instance(BookInstanceData {
            book: book.id,
            imprint: "Orbit, 1990".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        })
        .await
        .unwrap();

    let body = context
        .get(format!("{}/update", instance.url()))
        .send_empty()
        .await
        .take_body_as_text()
        .await;
    assert!(body.contains(&format!(r#"<option value="{}" selected>Use of Weapons</option>"#, book.id)));
    assert!(body.contains(&format!(r#"<option value="{}">Excession</option>"#, other.id)));
    assert!(body.contains(r#"<option value="Loaned" selected>Loaned</option>"#));
    assert!(body.contains(r#"value="Orbit, 1990""#));
    assert!(body.contains(r#"value="2024-03-09""#));
}

#[tokio::test]
async fn test_update_book_instance_rewrites_record() {
    let context = TestContext::setup();
    let author = context.author("Iain", "Banks").await;
    let book = context.book("Use of Weapons", author.id).await;
    let instance = context
        .store
        .insert_book_instance(BookInstanceData {
            book: book.id,
            imprint: "Orbit, 1990".to_string(),
            status: BookInstanceStatus::Available,
            due_back: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
        .await
        .unwrap();
    let book_id = book.id.to_string();

    let location = context
        .post(format!("{}/update", instance.url()))
        .send_form([
            ("book", book_id.as_str()),
            ("imprint", "Orbit, 2005"),
            ("status", "Reserved"),
            ("due_back", "2024-02-03"),
        ])
        .await
        .expect_redirect();
    assert_eq!(instance.url(), location);

    let instances = context.store.list_book_instances().await.unwrap();
    assert_eq!(1, instances.len());
    assert_eq!(instance.id, instances[0].id);
    assert_eq!(BookInstanceStatus::Reserved, instances[0].status);
    assert_eq!("Orbit, 2005", instances[0].imprint);
    assert_eq!("2024-02-03", instances[0].due_back_formatted());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_author_blocked_then_allowed() {
    let context = TestContext::setup();
    let author = context.author("Terry", "Pratchett").await;
    let book = context.book("Mort", author.id).await;
    let delete_url = format!("{}/delete", author.url());

    context
        .post(&delete_url)
        .send_form::<[(&str, &str); 0]>([])
        .await
        .expect_text("Delete the following books")
        .await;
    assert!(context.store.find_author(author.id).await.unwrap().is_some());

    context.store.delete_book(book.id).await.unwrap();
    let location = context.post(&delete_url).send_form::<[(&str, &str); 0]>([]).await.expect_redirect();
    assert_eq!("/catalog/authors", location);
    assert!(context.store.find_author(author.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_genre_discloses_books_and_does_not_cascade() {
    let context = TestContext::setup();
    let genre = context.store.insert_genre(GenreData { name: "Satire".into() }).await.unwrap();
    let book = context
        .store
        .insert_book(BookData {
            title: "Catch-22".into(),
            author: RecordId::generate(),
            summary: None,
            isbn: "1".into(),
            genre: vec![genre.id],
        })
        .await
        .unwrap();
    let delete_url = format!("{}/delete", genre.url());

    context.get(&delete_url).send_empty().await.expect_text("Catch-22").await;

    let location = context.post(&delete_url).send_form::<[(&str, &str); 0]>([]).await.expect_redirect();
    assert_eq!("/catalog/genres", location);
    assert_eq!(0, context.store.count_genres().await.unwrap());
    let kept = context.store.find_book(book.id).await.unwrap().unwrap();
    assert_eq!(vec![genre.id], kept.genre);
}

#[tokio::test]
async fn test_delete_form_missing_record_redirects_to_list() {
    let context = TestContext::setup();
    let location = context
        .get(format!("/catalog/book/{}/delete", RecordId::generate()))
        .send_empty()
        .await
        .expect_redirect();
    assert_eq!("/catalog/books", location);
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_book_list_sorted_by_title() {
    let context = TestContext::setup();
    let author = context.author("Anne", "McCaffrey").await;
    context.book("Dragonquest", author.id).await;
    context.book("Dragonflight", author.id).await;

    let body = context.get("/catalog/books").send_empty().await.take_body_as_text().await;
    let flight = body.find("Dragonflight").unwrap();
    let quest = body.find("Dragonquest").unwrap();
    assert!(flight < quest);
    assert!(body.contains("(Anne, McCaffrey)"));
}
