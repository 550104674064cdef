//! 遊戲核心模組
//!
//! 包含房東轉盤經濟的核心定義：
//! - `constants`: 遊戲常量
//! - `symbols`: 符號目錄
//! - `effects`: 符號效果（tagged variant）
//! - `grid`: 5×5 盤面與隨機放置
//! - `spin`: 轉動計分引擎
//! - `rent`: 房租表與樓層進度
//! - `shop`: 商店系統

#![allow(unused_imports)]

pub mod constants;
pub mod effects;
pub mod grid;
pub mod rent;
pub mod shop;
pub mod spin;
pub mod symbols;

pub use constants::*;
pub use effects::{EffectError, EffectKind};
pub use grid::{adjacent_indices, is_corner, place_grid, Grid, SymbolInstance};
pub use rent::{format_number, pay_rent, Progress, RentEntry, RentOutcome, RentSchedule};
pub use shop::Shop;
pub use spin::{evaluate_grid, evaluate_grid_with, resolve_spin, SpinResult};
pub use symbols::{starting_symbols, Rarity, SymbolDef, SymbolId, SYMBOL_COUNT};
