//! Integration tests for single-object access.
//!
//! These tests verify fetch, create, update, delete, count and existence
//! checks against a wiremock server, including error classification and
//! the retry behavior of the HTTP layer.

use std::time::Duration;

use mashery_v3::rest::{ErrorKind, FetchSpec, QueryParams, V3Error, V3Transport};
use mashery_v3::types::Package;
use mashery_v3::{AccessToken, Endpoint, V3Config};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, tries: u32) -> V3Transport {
    let config = V3Config::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .endpoint(Endpoint::new(format!("{}/v3/rest", server.uri())).unwrap())
        .tries(tries)
        .retry_wait(Duration::from_millis(10))
        .build()
        .unwrap();
    V3Transport::new(config)
}

fn package_spec(id: &str) -> FetchSpec<Package> {
    FetchSpec::new(format!("/packages/{id}"), "package")
}

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_get_object_decodes_and_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("fields", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "Gold",
            "created": "2021-03-04T05:06:07.000+0000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = package_spec("p1").query_param("fields", "id,name");
    let package = transport(&server, 1)
        .get_object(&CancellationToken::new(), &spec)
        .await
        .unwrap();

    assert_eq!(package.id.unwrap().as_str(), "p1");
    assert_eq!(package.name.as_deref(), Some("Gold"));
    assert!(package.created.is_some());
}

#[tokio::test]
async fn test_get_object_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "Gold"})))
        .expect(2)
        .mount(&server)
        .await;

    let transport = transport(&server, 1);
    let ctx = CancellationToken::new();
    let spec = package_spec("p1");

    let first = transport.get_object(&ctx, &spec).await.unwrap();
    let second = transport.get_object(&ctx, &spec).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_object_is_not_found_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": 404,
            "errorMessage": "Not Found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server, 3)
        .get_object(&CancellationToken::new(), &package_spec("missing"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.is_not_found());
    assert_eq!(err.context(), "package");
    assert!(err.to_string().contains("package"));
}

#[tokio::test]
async fn test_server_error_is_remote_fault_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("X-Mashery-Error-Code", "ERR_400_BAD_REQUEST")
                .set_body_json(json!({"errorMessage": "Invalid fields"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server, 3)
        .get_object(&CancellationToken::new(), &package_spec("p1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteFault);
    assert_eq!(err.status(), Some(400));
    match err {
        V3Error::Remote {
            message,
            error_code,
            ..
        } => {
            assert_eq!(message, "Invalid fields");
            assert_eq!(error_code.as_deref(), Some("ERR_400_BAD_REQUEST"));
        }
        other => panic!("expected remote fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mismatched_body_is_decode_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 17})))
        .mount(&server)
        .await;

    let err = transport(&server, 1)
        .get_object(&CancellationToken::new(), &package_spec("p1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFault);
    assert_eq!(err.context(), "package");
}

#[tokio::test]
async fn test_over_qps_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-Mashery-Error-Code", "ERR_403_DEVELOPER_OVER_QPS")
                .insert_header("Retry-After", "0"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    let package = transport(&server, 3)
        .get_object(&CancellationToken::new(), &package_spec("p1"))
        .await
        .unwrap();
    assert_eq!(package.id.unwrap().as_str(), "p1");
}

#[tokio::test]
async fn test_retries_exhausted_is_remote_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = transport(&server, 2)
        .get_object(&CancellationToken::new(), &package_spec("p1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteFault);
    assert_eq!(err.status(), Some(503));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_object_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/rest/packages"))
        .and(body_json(json!({"name": "Gold"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "new", "name": "Gold"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let package = Package {
        name: Some("Gold".to_string()),
        ..Package::default()
    };
    let spec: FetchSpec<Package> = FetchSpec::new("/packages", "package");
    let created = transport(&server, 1)
        .create_object(&CancellationToken::new(), &spec, &package)
        .await
        .unwrap();

    assert_eq!(created.id.unwrap().as_str(), "new");
}

#[tokio::test]
async fn test_update_object_puts_to_identified_resource() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "Silver"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = transport(&server, 1)
        .update_object(
            &CancellationToken::new(),
            &package_spec("p1"),
            &json!({"name": "Silver"}),
        )
        .await
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Silver"));
}

#[tokio::test]
async fn test_update_without_identifier_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let spec: FetchSpec<Package> = FetchSpec::new("/packages", "package");
    let err = transport(&server, 1)
        .update_object(&CancellationToken::new(), &spec, &json!({"name": "x"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UsageFault);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_object_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let spec: FetchSpec<()> = FetchSpec::without_parser("/packages/p1", "package");
    transport(&server, 1)
        .delete_object(&CancellationToken::new(), &spec)
        .await
        .unwrap();
}

// ============================================================================
// Count and existence
// ============================================================================

#[tokio::test]
async fn test_count_reads_total_count_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/services"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "42")
                .set_body_json(json!([{"id": "s1"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let spec: FetchSpec<()> = FetchSpec::without_parser("/services", "all services");
    let count = transport(&server, 1)
        .count(&CancellationToken::new(), &spec)
        .await
        .unwrap();
    assert_eq!(count, 42);
}

#[tokio::test]
async fn test_count_without_header_is_decode_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let spec: FetchSpec<()> = FetchSpec::without_parser("/services", "all services");
    let err = transport(&server, 1)
        .count(&CancellationToken::new(), &spec)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFault);
}

#[tokio::test]
async fn test_exists_maps_not_found_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let transport = transport(&server, 1);
    let ctx = CancellationToken::new();
    assert!(transport.exists(&ctx, &package_spec("p1")).await.unwrap());
    assert!(!transport.exists(&ctx, &package_spec("p2")).await.unwrap());
}

// ============================================================================
// Untyped access and cancellation
// ============================================================================

#[tokio::test]
async fn test_fetch_any_returns_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/organizations"))
        .and(query_param("fields", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "o1"}])))
        .mount(&server)
        .await;

    let response = transport(&server, 1)
        .fetch_any(
            &CancellationToken::new(),
            "/organizations",
            &QueryParams::new().with("fields", "id"),
        )
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body[0]["id"], "o1");
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/rest/packages/p1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "p1"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let ctx = CancellationToken::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let started = std::time::Instant::now();
    let err = transport(&server, 1)
        .get_object(&ctx, &package_spec("p1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(4));
}
