//! ログ永続化
//!
//! 認可済みエントリを受け取る下流シンク。既定実装はJSON配列ファイル
//! への追記（読み込み→追加→書き戻し）。

use async_trait::async_trait;
use rofl_logger_common::error::{LoggerError, LoggerResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// ログエントリの保存先
///
/// `authorized:true`になったリクエストのエントリのみがここへ渡される
/// （公開エンドポイント経由は例外で、認証を経ずに渡される）。
#[async_trait]
pub trait LogStore: Send + Sync {
    /// エントリを1件追記する
    async fn append(&self, entry: Value) -> LoggerResult<()>;
}

/// JSON配列ファイルへのログストア
///
/// ファイル全体を読み込み、エントリを追加して書き戻す。書き込みは
/// Mutexで直列化する（リクエスト処理自体はロックフリーで並行）。
pub struct FileLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogStore {
    /// 新しいFileLogStoreを作成し、親ディレクトリを用意する
    pub async fn new(path: impl AsRef<Path>) -> LoggerResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    LoggerError::Store(format!("Failed to create log directory: {}", e))
                })?;
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// 現在のログ配列を読み込む（ファイルが無ければ空）
    async fn read_entries(&self) -> LoggerResult<Vec<Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                // 壊れたファイルを黙って上書きしない
                LoggerError::Store(format!("Log file is not a valid JSON array: {}", e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(LoggerError::Store(format!("Failed to read log file: {}", e))),
        }
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    async fn append(&self, entry: Value) -> LoggerResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.push(entry);

        let serialized = serde_json::to_vec_pretty(&entries)
            .map_err(|e| LoggerError::Store(format!("Failed to serialize log entries: {}", e)))?;

        if let Err(e) = tokio::fs::write(&self.path, serialized).await {
            warn!("Log write error: {}", e);
            return Err(LoggerError::Store(format!("Failed to write log file: {}", e)));
        }

        debug!("Appended log entry ({} total)", entries.len());
        Ok(())
    }
}
