use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, EchoReply};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// --- hello ---

#[tokio::test]
async fn hello_greets_the_client() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/hello").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Hello, client");
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_query_and_body() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo?b=2&a=1")
                .body("payload".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: EchoReply = body_json(resp).await;
    assert_eq!(reply.method, "POST");
    assert_eq!(reply.path, "/echo");
    assert_eq!(reply.raw_query, "b=2&a=1");
    assert_eq!(reply.body, "payload");
}

#[tokio::test]
async fn echo_reports_duplicate_headers() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/echo")
                .header("X-Tag", "one")
                .header("X-Tag", "two")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: EchoReply = body_json(resp).await;
    let tags: Vec<&str> = reply
        .headers
        .iter()
        .filter(|(name, _)| name == "x-tag")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(tags, vec!["one", "two"]);
}

#[tokio::test]
async fn echo_accepts_any_method() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/echo")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: EchoReply = body_json(resp).await;
    assert_eq!(reply.method, "DELETE");
    assert_eq!(reply.raw_query, "");
    assert_eq!(reply.body, "");
}

// --- missing ---

#[tokio::test]
async fn missing_returns_404() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/missing").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"no such thing");
}
