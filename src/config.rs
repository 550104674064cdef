//! 伺服器設定
//!
//! 全部來自環境變數：
//! - `LANDLORD_ADDR`：監聽位址，預設 `127.0.0.1:50051`
//! - `LANDLORD_SAVE_DIR`：存檔目錄；未設定時存在記憶體
//! - `LANDLORD_RENT_SCHEDULE`：房租表 JSON 檔路徑，覆寫預設房租表

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::game::{RentEntry, RentSchedule};

pub const ENV_ADDR: &str = "LANDLORD_ADDR";
pub const ENV_SAVE_DIR: &str = "LANDLORD_SAVE_DIR";
pub const ENV_RENT_SCHEDULE: &str = "LANDLORD_RENT_SCHEDULE";
pub const DEFAULT_ADDR: &str = "127.0.0.1:50051";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid LANDLORD_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to read rent schedule {path:?}: {source}")]
    ReadSchedule {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid rent schedule {path:?}: {source}")]
    ParseSchedule {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("rent schedule {0:?} is empty or has negative rent")]
    BadSchedule(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub save_dir: Option<PathBuf>,
    pub rent_schedule: RentSchedule,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意查詢函式讀設定（測試不必動到行程環境）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let save_dir = lookup(ENV_SAVE_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let rent_schedule = match lookup(ENV_RENT_SCHEDULE).filter(|p| !p.trim().is_empty()) {
            Some(path) => load_schedule(PathBuf::from(path))?,
            None => RentSchedule::default(),
        };

        Ok(Self {
            addr,
            save_dir,
            rent_schedule,
        })
    }
}

/// 讀房租表檔案：`[{"rent":25,"turns":4}, ...]`
pub fn load_schedule(path: PathBuf) -> Result<RentSchedule, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ReadSchedule {
        path: path.clone(),
        source,
    })?;
    let entries: Vec<RentEntry> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ParseSchedule {
            path: path.clone(),
            source,
        })?;

    if entries.is_empty() || entries.iter().any(|entry| entry.rent < 0) {
        return Err(ConfigError::BadSchedule(path));
    }
    Ok(RentSchedule::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert!(config.save_dir.is_none());
        assert_eq!(config.rent_schedule, RentSchedule::default());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let schedule_path = dir.path().join("rent.json");
        fs::write(&schedule_path, r#"[{"rent":10,"turns":2},{"rent":20,"turns":3}]"#).unwrap();
        let schedule_str = schedule_path.to_string_lossy().to_string();

        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_ADDR, "0.0.0.0:9000"),
            (ENV_SAVE_DIR, "/tmp/landlord"),
            (ENV_RENT_SCHEDULE, schedule_str.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.save_dir, Some(PathBuf::from("/tmp/landlord")));
        assert_eq!(config.rent_schedule.len(), 2);
        assert_eq!(config.rent_schedule.get(1), Some(&RentEntry::new(20, 3)));
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_ADDR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));

        let err = ServerConfig::from_lookup(lookup(&[(ENV_RENT_SCHEDULE, "/no/such/file.json")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadSchedule { .. }));

        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(matches!(load_schedule(empty), Err(ConfigError::BadSchedule(_))));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{").unwrap();
        assert!(matches!(load_schedule(garbage), Err(ConfigError::ParseSchedule { .. })));
    }
}
