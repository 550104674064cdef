//! 存檔儲存
//!
//! 狀態層只認得 `Store` 這個字串 key/value 介面，
//! 測試用 `MemoryStore`，伺服器用 `FileStore`（每個 key 一個 JSON 檔）。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use super::snapshot::{self, SnapshotError};
use super::state::GameState;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// 字串 key/value 儲存
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: Store + ?Sized> Store for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

// ============================================================================
// 記憶體儲存
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// 檔案儲存
// ============================================================================

/// 目錄下每個 key 存成 `<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 開啟（必要時建立）存檔目錄
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // 先寫暫存檔再 rename，避免半寫入的存檔
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// key 轉成安全檔名：去掉路徑分隔與 `..`
fn sanitize_key(key: &str) -> String {
    let replaced: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    let trimmed = replaced
        .replace("..", "")
        .trim_matches(|c| c == '.' || c == ' ')
        .to_string();

    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed
    }
}

// ============================================================================
// 存檔槽
// ============================================================================

/// 單一存檔 key 上的讀寫
#[derive(Debug, Clone)]
pub struct SaveSlot<S: Store> {
    store: S,
    key: String,
}

impl<S: Store> SaveSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 讀取存檔；沒有存檔、讀取失敗或快照不合法都回傳 None
    pub fn load(&self) -> Option<GameState> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("failed to read save {}: {}", self.key, err);
                return None;
            }
        };

        match snapshot::deserialize(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("discarding save {}: {}", self.key, err);
                None
            }
        }
    }

    pub fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let raw = snapshot::serialize(state)?;
        self.store.set(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}
