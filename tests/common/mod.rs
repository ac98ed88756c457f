//! Shared helpers: run a router on an ephemeral local port
#![allow(dead_code)]

use axum::Router;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use storefront::api::{create_router, AppState};
use storefront::{Catalog, ClientConfig, ProductFetcher};
use tokio::net::TcpListener;

pub const TEST_ORIGIN: &str = "http://localhost:8000";

/// Serve `router` on 127.0.0.1 with an OS-assigned port
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start the catalog API over `catalog`
pub async fn spawn_catalog(catalog: impl Into<Catalog>) -> SocketAddr {
    let state = Arc::new(AppState::new(catalog));
    serve(create_router(state, TEST_ORIGIN)).await
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

pub fn fetcher_for(addr: SocketAddr) -> ProductFetcher {
    ProductFetcher::new(ClientConfig::new(base_url(addr)))
}

/// An address nothing listens on
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Route this thread's events into the buffer until the guard drops.
    /// `#[tokio::test]` runs on one thread, so spawned tasks are captured too.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(" ERROR "))
            .collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
