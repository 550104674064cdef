//! 行分隔 JSON 的 TCP 伺服器
//!
//! 每條連線一個 task；每讀到一行就交給 `SessionRegistry` 處理並回寫一行。

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

use crate::config::ServerConfig;
use crate::service::{FileStore, MemoryStore, SessionRegistry, Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 依設定建立儲存與 session 管理
pub fn build_registry(config: &ServerConfig) -> Result<SessionRegistry, ServerError> {
    let store: Arc<dyn Store> = match &config.save_dir {
        Some(dir) => {
            log::info!("saving games under {}", dir.display());
            Arc::new(FileStore::open(dir)?)
        }
        None => {
            log::info!("saving games in memory");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(SessionRegistry::new(store, config.rent_schedule.clone()))
}

/// 接受連線直到 listener 出錯
pub async fn serve(listener: TcpListener, registry: Arc<SessionRegistry>) -> Result<(), ServerError> {
    loop {
        let (socket, peer) = listener.accept().await?;
        log::debug!("connection from {}", peer);

        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(socket, registry).await {
                log::warn!("connection {} closed with error: {}", peer, err);
            }
        });
    }
}

async fn handle_connection(
    socket: TcpStream,
    registry: Arc<SessionRegistry>,
) -> Result<(), ServerError> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = LinesStream::new(BufReader::new(reader).lines());

    while let Some(line) = lines.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        // 存檔可能碰到磁碟，移到 blocking 執行緒處理
        let handler = Arc::clone(&registry);
        let mut reply = tokio::task::spawn_blocking(move || handler.handle_line(&line)).await?;
        reply.push('\n');
        writer.write_all(reply.as_bytes()).await?;
    }

    writer.shutdown().await?;
    Ok(())
}
