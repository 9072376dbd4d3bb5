//! Integration tests for paginated collection sweeps.
//!
//! These tests run the collection engine against a wiremock server and
//! verify request counts, query windows, batch order and failure handling.

use std::time::Duration;

use mashery_v3::rest::{ErrorKind, FetchSpec, Pagination, V3Error, V3Transport};
use mashery_v3::{AccessToken, Endpoint, V3Config};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> V3Transport {
    transport_with(server, 1)
}

fn transport_with(server: &MockServer, concurrency: usize) -> V3Transport {
    let config = V3Config::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .endpoint(Endpoint::new(format!("{}/v3/rest", server.uri())).unwrap())
        .tries(1)
        .per_item_concurrency(concurrency)
        .build()
        .unwrap();
    V3Transport::new(config)
}

fn items(range: std::ops::Range<usize>) -> Value {
    Value::Array(range.map(|i| json!({ "id": format!("p{i}") })).collect())
}

async fn mount_page(server: &MockServer, offset: usize, size: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("limit", size.to_string()))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn packages_spec(page_size: u32) -> FetchSpec<Vec<Value>> {
    FetchSpec::new("/packages", "all packages").paginate(Pagination::per_page_of(page_size))
}

fn ids(batches: &[Vec<Value>]) -> Vec<String> {
    batches
        .iter()
        .flatten()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Per-page sweeps
// ============================================================================

#[tokio::test]
async fn test_empty_collection_issues_one_request_and_no_batches() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 50, json!([])).await;

    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &packages_spec(50))
        .await
        .unwrap();

    assert!(batches.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_short_last_page_ends_sweep() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 50, items(0..50)).await;
    mount_page(&server, 50, 50, items(50..100)).await;
    mount_page(&server, 100, 50, items(100..120)).await;

    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &packages_spec(50))
        .await
        .unwrap();

    let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![50, 50, 20]);

    let expected: Vec<String> = (0..120).map(|i| format!("p{i}")).collect();
    assert_eq!(ids(&batches), expected);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_exact_multiple_needs_trailing_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 50, items(0..50)).await;
    mount_page(&server, 50, 50, items(50..100)).await;
    mount_page(&server, 100, 50, json!([])).await;

    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &packages_spec(50))
        .await
        .unwrap();

    assert_eq!(batches.len(), 2);
    assert_eq!(ids(&batches).len(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_descriptor_query_sent_with_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("fields", "id,name"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(0..2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("fields", "id,name"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(2..3)))
        .expect(1)
        .mount(&server)
        .await;

    let spec = packages_spec(2).query_param("fields", "id,name");
    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &spec)
        .await
        .unwrap();

    assert_eq!(ids(&batches), vec!["p0", "p1", "p2"]);
}

#[tokio::test]
async fn test_configured_page_size_is_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(0..7)))
        .expect(1)
        .mount(&server)
        .await;

    let spec: FetchSpec<Vec<Value>> =
        FetchSpec::new("/packages", "all packages").paginate(Pagination::per_page());
    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &spec)
        .await
        .unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 7);
}

#[tokio::test]
async fn test_failure_mid_sweep_reports_progress_and_discards_batches() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 10, items(0..10)).await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("offset", "10"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"errorMessage": "bad window"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server)
        .fetch_all(&CancellationToken::new(), &packages_spec(10))
        .await
        .unwrap_err();

    match &err {
        V3Error::Pagination {
            context,
            completed_batches,
            source,
        } => {
            assert_eq!(context, "all packages");
            assert_eq!(*completed_batches, 1);
            assert_eq!(source.status(), Some(400));
        }
        other => panic!("expected pagination error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::RemoteFault);
}

#[tokio::test]
async fn test_undecodable_page_is_decode_fault() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 10, json!({"not": "an array"})).await;

    let err = transport(&server)
        .fetch_all(&CancellationToken::new(), &packages_spec(10))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFault);
    assert_eq!(err.context(), "all packages");
}

#[tokio::test]
async fn test_cancellation_stops_sweep_between_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items(0..10))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = CancellationToken::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = transport(&server)
        .fetch_all(&ctx, &packages_spec(10))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_repeated_sweep_is_stable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(0..3)))
        .mount(&server)
        .await;

    let transport = transport(&server);
    let spec = packages_spec(5);
    let ctx = CancellationToken::new();

    let first = transport.fetch_all(&ctx, &spec).await.unwrap();
    let second = transport.fetch_all(&ctx, &spec).await.unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Per-item sweeps
// ============================================================================

#[tokio::test]
async fn test_per_item_issues_one_request_per_unit_in_order() {
    let server = MockServer::start().await;
    for (package, delay_ms, count) in [("a", 150, 2), ("b", 0, 0), ("c", 50, 1)] {
        let body = Value::Array(
            (0..count)
                .map(|i| json!({ "id": format!("{package}{i}") }))
                .collect(),
        );
        Mock::given(method("GET"))
            .and(path(format!("/v3/rest/packages/{package}/plans")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let spec: FetchSpec<Vec<Value>> = FetchSpec::new("/packages", "plans").paginate(
        Pagination::per_item(["/packages/a/plans", "/packages/b/plans", "/packages/c/plans"]),
    );
    let batches = transport_with(&server, 3)
        .fetch_all(&CancellationToken::new(), &spec)
        .await
        .unwrap();

    assert_eq!(batches.len(), 3);
    assert!(batches[1].is_empty());
    assert_eq!(ids(&batches), vec!["a0", "a1", "c0"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_per_item_with_no_units_sends_nothing() {
    let server = MockServer::start().await;

    let spec: FetchSpec<Vec<Value>> =
        FetchSpec::new("/packages", "plans").paginate(Pagination::per_item(Vec::<String>::new()));
    let batches = transport(&server)
        .fetch_all(&CancellationToken::new(), &spec)
        .await
        .unwrap();

    assert!(batches.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_per_item_unit_failure_reports_completed_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/a/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(0..1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/b/plans"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let spec: FetchSpec<Vec<Value>> = FetchSpec::new("/packages", "plans")
        .paginate(Pagination::per_item(["/packages/a/plans", "/packages/b/plans"]));
    let err = transport(&server)
        .fetch_all(&CancellationToken::new(), &spec)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        V3Error::Pagination {
            completed_batches: 1,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
