//! Local stand-in for the vehicle feed provider.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::stream;
use parking_lot::Mutex;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Script {
    status: StatusCode,
    chunks: Vec<String>,
    keys: Arc<Mutex<Vec<String>>>,
}

/// A running feed server. Dropping it leaves the task running until the
/// test runtime stops.
pub struct FeedServer {
    pub addr: SocketAddr,
    keys: Arc<Mutex<Vec<String>>>,
}

impl FeedServer {
    /// Serve `chunks` as one chunked `200 OK` body on `/vehicle.json`.
    pub async fn start(chunks: Vec<String>) -> Self {
        Self::start_with_status(StatusCode::OK, chunks).await
    }

    pub async fn start_with_status(status: StatusCode, chunks: Vec<String>) -> Self {
        let keys = Arc::new(Mutex::new(Vec::new()));
        let script = Script {
            status,
            chunks,
            keys: keys.clone(),
        };
        let app = Router::new()
            .route("/vehicle.json", get(vehicles))
            .with_state(script);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind feed server");
        let addr = listener.local_addr().expect("feed server addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("feed server");
        });

        Self { addr, keys }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every `key` query value received so far.
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().clone()
    }
}

async fn vehicles(
    State(script): State<Script>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(key) = params.get("key") {
        script.keys.lock().push(key.clone());
    }
    let chunks = script.chunks.into_iter().map(Ok::<_, Infallible>);
    (script.status, Body::from_stream(stream::iter(chunks))).into_response()
}

/// `[a,b,c]` split so every element boundary falls inside a chunk.
pub fn array_chunks(elements: &[String]) -> Vec<String> {
    let body = format!("[{}]", elements.join(","));
    let mut chunks = Vec::new();
    let mut rest = body.as_str();
    while !rest.is_empty() {
        let mut cut = rest.len().min(17);
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (head, tail) = rest.split_at(cut);
        chunks.push(head.to_string());
        rest = tail;
    }
    chunks
}
