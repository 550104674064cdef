//! 服務層模組
//!
//! 提供狀態容器、存檔、顯示視圖、動作遮罩、模擬與線上協定

#![allow(unused_imports)]

pub mod action;
pub mod action_mask;
pub mod env;
pub mod observation;
pub mod protocol;
pub mod simulate;
pub mod snapshot;
pub mod state;
pub mod store;

pub use action::Action;
pub use action_mask::{action_mask_from_state, allowed_actions};
pub use env::GameEnv;
pub use observation::{status_from_state, Phase, StatusView, SymbolCount};
pub use protocol::{save_key, Request, Response, SessionRegistry, DEFAULT_SESSION};
pub use simulate::{play_game, simulate, GameSummary, SimulationReport};
pub use snapshot::SnapshotError;
pub use state::{begin_spin, end_spin, GameError, GameState};
pub use store::{FileStore, MemoryStore, SaveSlot, Store, StoreError};
