//! Liveness endpoint so the hosting platform keeps the process up.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

pub const ALIVE: &str = "Sugar Rush Training Academy is Active! 🍩";

async fn alive() -> &'static str {
    ALIVE
}

/// Every method on every path answers with [`ALIVE`].
pub fn router() -> Router {
    Router::new().fallback(alive)
}

pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind keep-alive listener on {addr}"))
}

pub async fn serve(listener: TcpListener) -> Result<()> {
    info!(addr = %listener.local_addr()?, "keep-alive listener started");
    axum::serve(listener, router())
        .await
        .context("keep-alive server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_any_request() {
        let listener = bind(0).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(serve(listener));

        let client = reqwest::Client::new();
        for path in ["/", "/health", "/anything/at/all"] {
            let resp = client
                .get(format!("http://127.0.0.1:{port}{path}"))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            assert!(
                resp.headers()["content-type"]
                    .to_str()
                    .unwrap()
                    .starts_with("text/plain")
            );
            assert_eq!(resp.text().await.unwrap(), ALIVE);
        }

        let resp = client
            .post(format!("http://127.0.0.1:{port}/"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
}
