//! Background server lifecycle.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::db::Db;
use crate::error::{StubError, StubResult};
use crate::handlers::router;

/// A running stub service.
///
/// The server stops when [`StubServer::shutdown`] is awaited or when the
/// handle is dropped.
#[derive(Debug)]
pub struct StubServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Binds `addr` (port 0 picks a free port) and serves `db` in the background.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Bind`] if the address cannot be bound.
    pub async fn spawn(db: Db, addr: SocketAddr) -> StubResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StubError::Bind { addr, source })?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();

        let app = router(db);
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = serve.await {
                warn!(error = %e, "stub server stopped with error");
            }
        });

        info!(%addr, "stub server listening");
        Ok(Self {
            addr,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    /// Address the server is bound to.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:40123`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stops the server and waits for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!(addr = %self.addr, "stub server stopped");
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
