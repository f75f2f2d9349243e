use axum::{
    debug_handler,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// The user-agent and accept headers `/headers` insists on.
pub const EXPECTED_USER_AGENT: &str = "Bench 0.0.1 Alpha";
pub const EXPECTED_ACCEPT: &str = "*/*";

pub fn router() -> Router {
    Router::new()
        .route("/", get(ok))
        .route("/status/:code", get(status))
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/headers", get(headers))
        .route("/fail-after/:count/:key", get(fail_after))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Bind an ephemeral port on localhost and serve in the background.
pub async fn spawn() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = run(listener).await {
            tracing::error!("Mock service stopped: {err}");
        }
    });
    Ok(addr)
}

#[debug_handler]
pub async fn ok() -> &'static str {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
    "ok"
}

#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

#[debug_handler]
pub async fn headers(headers: HeaderMap) -> StatusCode {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
    let user_agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    debug!("user-agent={user_agent:?} accept={accept:?}");

    if user_agent == Some(EXPECTED_USER_AGENT) && accept == Some(EXPECTED_ACCEPT) {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Succeeds for the first `count` requests under `key`, then returns 500s.
#[debug_handler]
pub async fn fail_after(Path((count, key)): Path<(u64, String)>) -> StatusCode {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
    let seen = {
        let mut map = FAIL_AFTER
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let seen = map.entry(key).or_insert(0);
        *seen += 1;
        *seen
    };

    if seen <= count {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

static FAIL_AFTER: std::sync::Mutex<std::collections::BTreeMap<String, u64>> =
    std::sync::Mutex::new(std::collections::BTreeMap::new());

/** Request Printer **/

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);

pub async fn request_count_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let requests = REQUEST_COUNT.swap(0, Ordering::Relaxed);
        println!("{requests} requests/s");
    }
}
