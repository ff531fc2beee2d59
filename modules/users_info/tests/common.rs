#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};
use modkit_db::{ConnectOpts, DbHandle};
use users_info::UsersInfo;

/// Fresh in-memory database with the users schema applied.
pub async fn fresh_db() -> DatabaseConnection {
    let handle = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("in-memory sqlite");
    let db = handle.sea();
    UsersInfo::migrate(&db).await.expect("migrations");
    db
}

pub async fn module() -> UsersInfo {
    UsersInfo::new(fresh_db().await)
}

/// The full HTTP stack as the server builds it.
pub async fn app() -> Router {
    let module = module().await;
    ApiIngress::new(ApiIngressConfig::default()).build_router(module.register_rest(Router::new()))
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = router
        .clone()
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(router: &Router, method: &str, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_owned()))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
