//! End-to-end tests for the REST bridge over a live listener.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

mod common;

use common::{spawn_gateway, MockFunnel};

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn missing_controller_is_a_400() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api"))
        .json(&json!({"action": "create", "collection": "foobar"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!(400));
    assert_eq!(
        body["error"]["message"],
        json!("The \"controller\" argument is missing")
    );
    assert_eq!(body["result"], Value::Null);
}

#[tokio::test]
async fn wrong_content_type_is_a_400() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("resolve=true")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!(400));
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request content-type"));
    assert_eq!(body["result"], Value::Null);
}

#[tokio::test]
async fn parameterized_json_content_type_is_a_400() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .header("content-type", "application/json; charset=utf-8")
        .body(r#"{"resolve": true}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request content-type"));
}

#[tokio::test]
async fn success_returns_200_with_the_resolved_metadata() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .json(&json!({"resolve": true}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!(200));
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["result"]["action"], json!("create"));
    assert_eq!(body["result"]["controller"], json!("write"));
    assert_eq!(body["result"]["collection"], json!("foobar"));
    assert_eq!(body["result"]["_source"], json!({"resolve": true}));
}

#[tokio::test]
async fn empty_engine_reply_writes_no_response() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let error = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .json(&json!({"resolve": true, "empty": true}))
        .timeout(Duration::from_millis(300))
        .send()
        .await
        .unwrap_err();

    // The suppressed path writes zero bytes; the client times out.
    assert!(error.is_timeout());
}

#[tokio::test]
async fn engine_rejection_is_a_500_with_the_verbatim_message() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .json(&json!({"resolve": false}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!(500));
    assert_eq!(body["error"]["message"], json!("rejected"));
    assert_eq!(body["result"], Value::Null);
}

#[tokio::test]
async fn body_content_completes_missing_route_metadata() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api?controller=write"))
        .json(&json!({"resolve": true, "collection": "foobar", "action": "create"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["result"]["action"], json!("create"));
    assert_eq!(body["result"]["controller"], json!("write"));
    assert_eq!(body["result"]["collection"], json!("foobar"));
}

#[tokio::test]
async fn document_id_in_the_body_reaches_the_result() {
    let (addr, _shutdown) = spawn_gateway(Arc::new(MockFunnel)).await;

    let res = client()
        .post(format!("http://{addr}/api/write/foobar/create"))
        .json(&json!({"resolve": true, "id": "fakeid"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["result"]["_id"], json!("fakeid"));
}
