// Stub ERP backend shared by the integration tests. It speaks the
// `{success, data, error}` envelope over real HTTP.
use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use erp_client::domain::{ApiErrorPayload, ResponseEnvelope};
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

fn app() -> Router {
    Router::new()
        .route("/api/item", get(search_items).post(add_item))
        .route("/api/item/{item_id}", get(item_detail))
        .route("/api/echo", post(echo))
        .route("/broken", get(broken))
}

type Reply = (StatusCode, Json<ResponseEnvelope<Value>>);

fn ok(status: StatusCode, data: Value) -> Reply {
    (status, Json(ResponseEnvelope::ok(data)))
}

fn fail(status: StatusCode, code: &str, message: &str, details: Option<Value>) -> Reply {
    let error = ApiErrorPayload {
        code: code.to_string(),
        message: Some(message.to_string()),
        details,
    };
    (status, Json(ResponseEnvelope::fail(error)))
}

async fn item_detail(Path(item_id): Path<u64>) -> Reply {
    if item_id == 1 {
        return ok(StatusCode::OK, json!({ "id": 1, "name": "Widget" }));
    }
    fail(StatusCode::NOT_FOUND, "NOT_FOUND", "item not found", None)
}

async fn search_items() -> Reply {
    ok(
        StatusCode::OK,
        json!({
            "content": [
                { "id": 1, "name": "Widget" },
                { "id": 2, "name": "Gadget" }
            ],
            "pageInfo": {
                "page": 1,
                "size": 10,
                "totalElements": 2,
                "totalPages": 1,
                "first": true,
                "last": true
            }
        }),
    )
}

async fn add_item(body: String) -> Reply {
    let Ok(payload) = serde_json::from_str::<Value>(&body) else {
        return fail(
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST",
            "request body could not be read",
            None,
        );
    };

    // Mirrors the backend's bean validation output for a blank name.
    let name = payload["name"].as_str().unwrap_or_default();
    if name.trim().is_empty() {
        return fail(
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST",
            "must not be blank",
            Some(json!({ "fields": { "name": "must not be blank" } })),
        );
    }

    ok(StatusCode::CREATED, Value::Null)
}

// Reports what actually arrived on the wire.
async fn echo(headers: HeaderMap, body: String) -> Reply {
    let content_types: Vec<_> = headers
        .get_all(header::CONTENT_TYPE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    ok(
        StatusCode::OK,
        json!({ "content_types": content_types, "body": body }),
    )
}

async fn broken() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>Bad Gateway</body></html>",
    )
}

// Ensure the stub server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    // Run initialization exactly once even if multiple tests call this function.
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        // Clone so the spawned thread can write into the same shared slot.
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            // The stub backend owns its own Tokio runtime.
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with a local ERP backend.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                // Capture the exact address that was assigned by the OS.
                let addr = listener.local_addr().expect("get local addr");
                // Publish the base URL the clients under test should join paths onto.
                let _ = published_url_thread.set(format!("http://{}", addr));
                // Serve envelope replies until the test process exits.
                axum::serve(listener, app()).await.expect("stub server failed");
            });
        });
        // Block until the URL is published and the port accepts connections.
        wait_for_server_url_and_readiness(published_url);
    });

    // Every test in this binary talks to the same stub backend.
    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Address that nothing listens on, for connection-refused paths.
pub fn refused_url() -> String {
    // Let the OS pick a free port, then release it so connects are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{}", addr)
}

// Wait for URL publication and then for the stub socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    // Poll until the server thread publishes the base URL.
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        // Avoid a tight loop while waiting for the background thread.
        std::thread::sleep(Duration::from_millis(10));
    };

    // Persist the URL globally so later callers skip the bootstrap.
    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        // A successful connect means the stub is accepting requests.
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    // Fail fast if startup never reached an accepting state.
    panic!("stub server did not become ready in time");
}
