use axum::{
    body::to_bytes,
    extract::Request,
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Reflection of an incoming request, as `/echo` reports it.
///
/// Header names arrive lowercased by the HTTP layer; the body is
/// interpreted lossily as UTF-8.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoReply {
    pub method: String,
    pub path: String,
    pub raw_query: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

const ECHO_BODY_LIMIT: usize = 1024 * 1024;

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/echo", any(echo))
        .route("/missing", get(missing))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> &'static str {
    "Hello, client"
}

async fn echo(request: Request) -> Result<Json<EchoReply>, StatusCode> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, ECHO_BODY_LIMIT)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(Json(EchoReply {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        raw_query: parts.uri.query().unwrap_or_default().to_string(),
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }))
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "no such thing")
}
