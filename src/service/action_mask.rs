//! Action Mask 構建
//!
//! 索引順序與 `ACTION_TAGS` 相同。

use super::state::GameState;
use crate::game::{ACTION_TAGS, ACTION_TYPE_COUNT};

/// 從遊戲狀態構建 action mask
pub fn action_mask_from_state(state: &GameState) -> [bool; ACTION_TYPE_COUNT] {
    let mut data = [false; ACTION_TYPE_COUNT];

    let playing = !state.is_terminal();
    let spinning = state.is_spinning;
    let can_afford_rent = state
        .current_rent()
        .map(|entry| state.coins >= entry.rent)
        .unwrap_or(false);

    data[0] = playing; // ADD_COINS
    data[1] = playing && !spinning; // START_SPIN
    data[2] = spinning; // STOP_SPIN
    data[3] = playing && spinning; // UPDATE_GRID
    data[4] = playing && state.shop_open; // ADD_SYMBOL
    data[5] = playing && !spinning; // DECREASE_TURNS
    data[6] = playing && !spinning && can_afford_rent; // PAY_RENT（提前付清）
    data[7] = true; // TOGGLE_SOUND
    data[8] = !spinning; // TOGGLE_SHOP
    data[9] = state.shop_open; // CLOSE_SHOP
    data[10] = true; // RESET_GAME
    data[11] = !spinning; // LOAD_GAME

    data
}

/// 目前可用的 action 標籤
pub fn allowed_actions(state: &GameState) -> Vec<&'static str> {
    action_mask_from_state(state)
        .iter()
        .zip(ACTION_TAGS.iter())
        .filter(|(allowed, _)| **allowed)
        .map(|(_, tag)| *tag)
        .collect()
}
