//! Liveness endpoint for external uptime monitors.
//!
//! Answers every `GET` with `200 Bot is alive`; it never looks at bot state.

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub const ALIVE_BODY: &str = "Bot is alive";

async fn alive() -> &'static str {
    ALIVE_BODY
}

pub fn router() -> Router {
    Router::new().route("/", get(alive)).fallback(get(alive))
}

/// Serve the ping router on `0.0.0.0:port` until `shutdown` is cancelled.
pub async fn serve(port: u16, shutdown: CancellationToken) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!(%addr, error = %e, "failed to bind ping listener");
        e
    })?;
    info!(port, "ping server listening");

    axum::serve(listener, router())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn call(method: Method, uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn get_root_is_alive() {
        assert_eq!(
            call(Method::GET, "/").await,
            (StatusCode::OK, ALIVE_BODY.to_string())
        );
    }

    #[tokio::test]
    async fn get_any_path_is_alive() {
        assert_eq!(
            call(Method::GET, "/health/deep?x=1").await,
            (StatusCode::OK, ALIVE_BODY.to_string())
        );
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let shutdown = CancellationToken::new();
        // Port 0: let the OS pick.
        let task = tokio::spawn(serve(0, shutdown.clone()));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        shutdown.cancel();
        task.await.unwrap().unwrap();
    }
}
