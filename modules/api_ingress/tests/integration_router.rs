use std::time::Duration;

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use api_ingress::request_id::XRequestId;
use api_ingress::{ApiIngress, ApiIngressConfig};

fn app(config: ApiIngressConfig) -> Router {
    let routes = Router::new()
        .route("/echo-id", get(|Extension(rid): Extension<XRequestId>| async move { rid.0 }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        )
        .route(
            "/panic",
            get(|| async {
                if true {
                    panic!("handler blew up");
                }
                "unreachable"
            }),
        )
        .route("/upload", post(|body: String| async move { body.len().to_string() }));

    ApiIngress::new(config).build_router(routes)
}

async fn call(router: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes.to_vec())
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, _, body) = call(app(ApiIngressConfig::default()), get_req("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["status"], "healthy");
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn generates_request_id_when_missing() {
    let (status, headers, body) = call(app(ApiIngressConfig::default()), get_req("/echo-id")).await;
    assert_eq!(status, StatusCode::OK);

    let rid = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(!rid.is_empty());
    assert_eq!(String::from_utf8(body).unwrap(), rid);
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let req = Request::builder()
        .uri("/echo-id")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let (_, headers, body) = call(app(ApiIngressConfig::default()), req).await;

    assert_eq!(headers.get("x-request-id").unwrap(), "abc-123");
    assert_eq!(body, b"abc-123");
}

#[tokio::test]
async fn unknown_route_is_an_error_envelope() {
    let (status, headers, body) = call(app(ApiIngressConfig::default()), get_req("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert!(headers.get("x-request-id").is_some());

    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["status"], 404);
    assert_eq!(v["error"], "Not Found");
    assert_eq!(v["path"], "/nope");
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn wrong_method_is_an_error_envelope() {
    let req = Request::builder()
        .method("DELETE")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = call(app(ApiIngressConfig::default()), req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"], "Method Not Allowed");
}

#[tokio::test]
async fn panic_becomes_internal_error_envelope() {
    let (status, _, body) = call(app(ApiIngressConfig::default()), get_req("/panic")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["message"], "Internal Server Error");
    assert_eq!(v["path"], "/panic");
}

#[tokio::test]
async fn slow_handler_times_out() {
    let config = ApiIngressConfig {
        request_timeout_sec: 1,
        ..Default::default()
    };
    let (status, _, body) = call(app(config), get_req("/slow")).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["status"], 408);
    assert_eq!(v["path"], "/slow");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ApiIngressConfig {
        body_limit_bytes: 8,
        ..Default::default()
    };
    let payload = "x".repeat(64);
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let (status, _, body) = call(app(config), req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["status"], 413);
}
