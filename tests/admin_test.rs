//! Integration tests for the admin HTTP surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use eventbot::admin::{AdminState, router};
use eventbot::catalog::Catalog;
use eventbot::model::{Event, NewEvent};
use eventbot::storage::{EventStore, InMemoryStore};
use tower::ServiceExt;

fn app_with(events: Vec<Event>) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new(events));
    let catalog = Arc::new(Catalog::new(store.clone()));
    (router(AdminState { catalog }), store)
}

fn spring() -> Event {
    NewEvent::new("Spring Fest", "2024-03-01", "2024-03-31")
        .alias("spring")
        .build()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_lists_events() {
    let (app, _) = app_with(vec![spring()]);
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Spring Fest"));
    assert!(html.contains("action=\"/add\""));
}

#[tokio::test]
async fn events_endpoint_returns_json() {
    let (app, _) = app_with(vec![spring()]);
    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<Event> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(events, vec![spring()]);
}

#[tokio::test]
async fn add_appends_and_redirects() {
    let (app, store) = app_with(vec![spring()]);
    let response = app
        .oneshot(form(
            "/add",
            "name=Summer+Cup&aliases=summer%2C+%E5%A4%8F%2C&start=2024-07-01&end=2024-08-31&content=race&reward=skin",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let events = store.load_events().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].name, "Summer Cup");
    assert_eq!(events[1].aliases, vec!["summer", "夏"]);
    assert_eq!(events[1].reward, "skin");
}

#[tokio::test]
async fn add_rejects_bad_dates() {
    let (app, store) = app_with(vec![]);
    let response = app
        .oneshot(form("/add", "name=X&aliases=x&start=tomorrow&end=2024-08-31"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.load_events().unwrap().is_empty());
}

#[tokio::test]
async fn edit_can_rename() {
    let (app, store) = app_with(vec![spring()]);
    let response = app
        .oneshot(form(
            "/edit",
            "original_name=Spring+Fest&name=Spring+Festival&aliases=spring&start=2024-03-01&end=2024-04-07",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let events = store.load_events().unwrap();
    assert_eq!(events[0].name, "Spring Festival");
    assert_eq!(events[0].end, "2024-04-07");
}

#[tokio::test]
async fn delete_unknown_is_not_found() {
    let (app, store) = app_with(vec![spring()]);
    let response = app.oneshot(form("/delete", "name=Nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.load_events().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_event() {
    let (app, store) = app_with(vec![spring()]);
    let response = app
        .oneshot(form("/delete", "name=Spring+Fest"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(store.load_events().unwrap().is_empty());
}

/// A store whose reads block the calling thread, and which records whether
/// `ticked` was set while it was blocked.
struct SlowStore {
    inner: InMemoryStore,
    ticked: Arc<AtomicBool>,
    saw_tick: AtomicBool,
}

impl SlowStore {
    fn new(events: Vec<Event>, ticked: Arc<AtomicBool>) -> Self {
        Self {
            inner: InMemoryStore::new(events),
            ticked,
            saw_tick: AtomicBool::new(false),
        }
    }
}

impl EventStore for SlowStore {
    fn load_events(&self) -> eventbot::error::Result<Vec<Event>> {
        std::thread::sleep(Duration::from_millis(200));
        self.saw_tick
            .store(self.ticked.load(Ordering::SeqCst), Ordering::SeqCst);
        self.inner.load_events()
    }

    fn save_events(&self, events: &[Event]) -> eventbot::error::Result<()> {
        self.inner.save_events(events)
    }
}

fn spawn_ticker(ticked: Arc<AtomicBool>) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        ticked.store(true, Ordering::SeqCst);
    });
}

#[tokio::test]
async fn handlers_do_not_block_the_runtime_on_store_reads() {
    let ticked = Arc::new(AtomicBool::new(false));
    let store = Arc::new(SlowStore::new(vec![spring()], Arc::clone(&ticked)));
    let catalog = Arc::new(Catalog::new(store.clone()));
    let app = router(AdminState { catalog });
    spawn_ticker(ticked);

    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.saw_tick.load(Ordering::SeqCst));
}
