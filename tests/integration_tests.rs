//! Integration tests using a mock HTTP server
//!
//! Exercises the full flow: remote source → pagination engine →
//! presentation reducer, against wiremock-served pages.

use pagefeed::connectivity::{AlwaysOnline, ConnectivityGate};
use pagefeed::engine::PaginationEngine;
use pagefeed::presenter::{
    Action, Presenter, ViewEvent, ViewState, MSG_NETWORK_UNAVAILABLE, MSG_NO_MORE_ITEMS,
};
use pagefeed::source::RemoteSource;
use pagefeed::{Error, Feed};
use serde_json::json;
use std::sync::{Arc, Once};
use tokio::sync::mpsc::error::TryRecvError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Once = Once::new();

/// Route engine/source logs through the test harness, honoring
/// `RUST_LOG` for selective verbosity.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn item_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "status": "Alive",
        "species": "Human",
        "gender": "Male",
        "image": format!("https://cdn.example.com/{id}.jpeg")
    })
}

fn body(results: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    json!({
        "info": {
            "count": results.len(),
            "pages": 2,
            "next": next,
            "prev": null
        },
        "results": results
    })
}

async fn mount_page(
    server: &MockServer,
    page: u32,
    results: Vec<serde_json::Value>,
    next: Option<&str>,
) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(results, next)))
        .mount(server)
        .await;
}

fn engine_for(server: &MockServer) -> Arc<PaginationEngine> {
    init_tracing();
    let source = RemoteSource::for_base_url(server.uri()).unwrap();
    Arc::new(PaginationEngine::new(
        Arc::new(source),
        Arc::new(AlwaysOnline),
    ))
}

struct Offline;

impl ConnectivityGate for Offline {
    fn is_available(&self) -> bool {
        false
    }
}

fn success_items(state: &ViewState) -> &Feed {
    match state {
        ViewState::Success(feed) => feed,
        other => panic!("expected Success, got {other:?}"),
    }
}

// ============================================================================
// Scenario A: fresh engine, first page succeeds
// ============================================================================

#[tokio::test]
async fn fresh_engine_loads_first_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        vec![item_json(1, "Rick"), item_json(2, "Morty")],
        Some("page=2"),
    )
    .await;
    mount_page(&server, 2, vec![item_json(3, "Summer")], None).await;

    let engine = engine_for(&server);

    let feed = engine.load_next().await.unwrap().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed.items[0].name, "Rick");
    assert!(feed.has_more);

    // The cursor advanced to 2: the next load hits the page-2 mock.
    let feed = engine.load_next().await.unwrap().unwrap();
    assert_eq!(feed.len(), 3);
    assert_eq!(feed.items[2].name, "Summer");
    assert!(!feed.has_more);
}

// ============================================================================
// Scenario B: first load while offline
// ============================================================================

#[tokio::test]
async fn offline_first_load_is_blocking_error() {
    init_tracing();
    let server = MockServer::start().await;
    // No mock mounted on purpose: the request must never be attempted.
    let source = RemoteSource::for_base_url(server.uri()).unwrap();
    let engine = Arc::new(PaginationEngine::new(Arc::new(source), Arc::new(Offline)));
    let presenter = Presenter::new(engine);
    let mut events = presenter.events().unwrap();

    presenter.start().await;

    assert_eq!(
        presenter.current_state(),
        ViewState::Error(MSG_NETWORK_UNAVAILABLE.to_string())
    );
    assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Scenario C: empty page over visible data
// ============================================================================

#[tokio::test]
async fn empty_page_degrades_to_transient_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        vec![item_json(1, "Rick"), item_json(2, "Morty")],
        Some("page=2"),
    )
    .await;
    // Page 2 is empty but still claims a next pointer; emptiness wins.
    mount_page(&server, 2, vec![], Some("page=3")).await;

    let presenter = Presenter::new(engine_for(&server));
    let mut events = presenter.events().unwrap();

    presenter.start().await;
    presenter.dispatch(Action::LoadMore).await;

    let feed = success_items(&presenter.current_state()).clone();
    assert_eq!(feed.len(), 2);
    assert_eq!(
        events.try_recv().unwrap(),
        ViewEvent::ShowTransientError(MSG_NO_MORE_ITEMS.to_string())
    );
    assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);

    // Exhaustion is sticky: another LoadMore never reaches the server.
    let before = server.received_requests().await.unwrap().len();
    presenter.dispatch(Action::LoadMore).await;
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

// ============================================================================
// Scenario D: retry after a blocking error
// ============================================================================

#[tokio::test]
async fn retry_after_server_error_recovers() {
    let server = MockServer::start().await;

    // First request fails, then the endpoint recovers.
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        1,
        vec![item_json(1, "Rick"), item_json(2, "Morty")],
        Some("page=2"),
    )
    .await;

    let presenter = Presenter::new(engine_for(&server));
    let mut state = presenter.state();

    presenter.start().await;
    assert!(presenter.current_state().is_error());

    presenter.dispatch(Action::Retry).await;

    let feed = success_items(&presenter.current_state()).clone();
    assert_eq!(feed.len(), 2);

    // The watch channel saw the transition; late reads get the latest.
    assert!(state.borrow_and_update().is_success());
}

// ============================================================================
// Scenario E: hard stop after the final page
// ============================================================================

#[tokio::test]
async fn exhausted_feed_never_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(
            vec![item_json(1, "Rick")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);

    let feed = engine.load_next().await.unwrap().unwrap();
    assert_eq!(feed.len(), 1);
    assert!(!feed.has_more);

    let err = engine.load_next().await.unwrap().unwrap_err();
    assert_eq!(err, Error::NoMorePages);
    let err = engine.load_next().await.unwrap().unwrap_err();
    assert_eq!(err, Error::NoMorePages);

    // expect(1) on the mock verifies no second request on drop.
}

// ============================================================================
// Properties end-to-end
// ============================================================================

#[tokio::test]
async fn accumulation_preserves_prefix_across_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        vec![item_json(1, "a"), item_json(2, "b")],
        Some("page=2"),
    )
    .await;
    mount_page(
        &server,
        2,
        vec![item_json(3, "c"), item_json(4, "d")],
        None,
    )
    .await;

    let engine = engine_for(&server);
    let first = engine.load_next().await.unwrap().unwrap();
    let second = engine.load_next().await.unwrap().unwrap();

    assert_eq!(&second.items[..first.len()], &first.items[..]);
    let ids: Vec<i64> = second.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn transport_failure_preserves_visible_data() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![item_json(1, "Rick")], Some("page=2")).await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let presenter = Presenter::new(engine_for(&server));
    let mut events = presenter.events().unwrap();

    presenter.start().await;
    presenter.dispatch(Action::LoadMore).await;

    // State keeps the one visible item; the failure became a toast.
    let feed = success_items(&presenter.current_state()).clone();
    assert_eq!(feed.len(), 1);
    assert!(matches!(
        events.try_recv().unwrap(),
        ViewEvent::ShowTransientError(_)
    ));
    assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
}

#[tokio::test]
async fn reset_supports_a_second_session() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![item_json(1, "Rick")], None).await;

    let engine = engine_for(&server);
    engine.load_next().await.unwrap().unwrap();
    assert_eq!(
        engine.load_next().await.unwrap().unwrap_err(),
        Error::NoMorePages
    );

    engine.reset();

    let feed = engine.load_next().await.unwrap().unwrap();
    assert_eq!(feed.len(), 1);
}
