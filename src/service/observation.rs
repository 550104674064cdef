//! 狀態顯示視圖
//!
//! 從 `GameState` 整理出呈現層需要的資訊：
//! - 進度（樓層、剩餘轉動、目前房租與下一層房租）
//! - 經濟（金幣）
//! - 符號收藏統計
//! - 本次盤面觸發效果的格數
//! - 目前可用的 action

use std::collections::BTreeMap;

use serde::Serialize;

use super::action_mask::allowed_actions;
use super::state::GameState;
use crate::game::{Progress, SymbolId};

/// 遊戲階段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Playing,
    Lost,
    Won,
}

impl From<Progress> for Phase {
    fn from(progress: Progress) -> Self {
        match progress {
            Progress::Playing { .. } => Phase::Playing,
            Progress::Lost => Phase::Lost,
            Progress::Won => Phase::Won,
        }
    }
}

/// 收藏中單一符號的數量
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymbolCount {
    pub id: SymbolId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub phase: Phase,
    /// 從 1 開始的樓層編號（勝利後停在總樓層數）
    pub floor_number: usize,
    pub total_floors: usize,
    pub coins: i64,
    pub rent: Option<i64>,
    pub turns_remaining: u32,
    pub next_rent: Option<i64>,
    pub owned_symbols: usize,
    pub symbol_counts: Vec<SymbolCount>,
    pub triggered_cells: usize,
    pub is_spinning: bool,
    pub shop_open: bool,
    pub sound_enabled: bool,
    pub allowed_actions: Vec<&'static str>,
}

/// 從遊戲狀態構建顯示視圖
pub fn status_from_state(state: &GameState) -> StatusView {
    let schedule = &state.rent_schedule;
    let total_floors = schedule.len();

    let mut counts: BTreeMap<SymbolId, usize> = BTreeMap::new();
    for id in &state.symbols {
        *counts.entry(*id).or_insert(0) += 1;
    }
    let symbol_counts = counts
        .into_iter()
        .map(|(id, count)| {
            let def = id.def();
            SymbolCount {
                id,
                name: def.name,
                emoji: def.emoji,
                count,
            }
        })
        .collect();

    StatusView {
        phase: state.progress().into(),
        floor_number: (state.floor + 1).min(total_floors),
        total_floors,
        coins: state.coins,
        rent: state.current_rent().map(|entry| entry.rent),
        turns_remaining: state.turns_remaining(),
        next_rent: schedule.get(state.floor + 1).map(|entry| entry.rent),
        owned_symbols: state.symbols.len(),
        symbol_counts,
        triggered_cells: state.grid.triggered_cells(),
        is_spinning: state.is_spinning,
        shop_open: state.shop_open,
        sound_enabled: state.sound_enabled,
        allowed_actions: allowed_actions(state),
    }
}
