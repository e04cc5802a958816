//! Shared utilities for integration testing.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use file_router::http::HttpServer;
use file_router::lifecycle::Shutdown;
use file_router::RouteTable;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Create a routes directory containing empty files at the given paths.
pub fn routes_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        touch(dir.path(), file);
    }
    dir
}

/// Create an empty file, along with its parent directories.
pub fn touch(root: &Path, file: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

/// A router server running in the background.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<RouteTable>,
    shutdown: Shutdown,
}

impl TestServer {
    /// Serve `table` on an ephemeral port.
    pub async fn start(table: RouteTable) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        let (updates, table_updates) = mpsc::unbounded_channel();

        let server = HttpServer::new(table);
        tokio::spawn(async move {
            let _ = server.run(listener, table_updates, server_shutdown).await;
        });

        Self {
            addr,
            updates,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// HTTP client that never reuses connections or consults proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
