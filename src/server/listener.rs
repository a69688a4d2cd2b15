use std::path::Path;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}, serving {}", cfg.listen_addr, cfg.root.display());

    serve(listener, &cfg.root).await
}

/// Accepts connections and handles each to completion before the next accept.
///
/// Only returns when `accept` fails.
pub async fn serve(listener: TcpListener, root: &Path) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await.map_err(|e| {
            tracing::error!("Failed to accept connection: {}", e);
            e
        })?;
        info!("Accepted connection from {}", peer);

        let status = Connection::new(socket, root).run().await;
        tracing::debug!(%peer, status = status.map(|s| s.as_u16()), "connection closed");
    }
}
