//! Throw-away backend for adapter tests, served by axum on a background
//! thread with its own runtime so the blocking client can call it.

use axum::http::Uri;
use axum::response::Json;
use axum::Router;
use serde_json::{json, Value};

/// Serve `router` on an ephemeral port and return its base URL.
pub fn spawn(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{addr}")
}

/// A URL nothing listens on.
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn health_body() -> Value {
    json!({
        "status": "healthy",
        "timestamp": "2024-01-01T10:00:00Z",
        "configuration": { "gemini": true, "maps": false },
    })
}

/// Answers every path: health with [`health_body`], everything else with a
/// success body that echoes the path and the request JSON.
pub fn echo_router() -> Router {
    Router::new().fallback(echo)
}

async fn echo(uri: Uri, body: String) -> Json<Value> {
    if uri.path() == "/api/health" {
        return Json(health_body());
    }
    let echo: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    Json(json!({
        "success": true,
        "endpoint": uri.path(),
        "echo": echo,
        "nested": { "Mixed_Case": [1, 2.5, "x", null] },
        "ratio": 0.67,
    }))
}
