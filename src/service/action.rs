//! Action 定義
//!
//! 呈現層只透過這組封閉的具名 action 改變狀態。
//! JSON 形狀：`{"type": "ADD_COINS", "payload": 12}`；未知的 type（不論帶不帶 payload）
//! 還原成 `Unknown`，套用時不做任何事。已知 type 的 payload 錯誤仍然是解析錯誤。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::state::GameState;
use crate::game::{
    Grid, SymbolId, ACTION_ADD_COINS, ACTION_ADD_SYMBOL, ACTION_CLOSE_SHOP,
    ACTION_DECREASE_TURNS, ACTION_LOAD_GAME, ACTION_PAY_RENT, ACTION_RESET_GAME,
    ACTION_START_SPIN, ACTION_STOP_SPIN, ACTION_TAGS, ACTION_TOGGLE_SHOP, ACTION_TOGGLE_SOUND,
    ACTION_UPDATE_GRID,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddCoins(i64),
    StartSpin,
    StopSpin,
    UpdateGrid(Grid),
    AddSymbol(SymbolId),
    DecreaseTurns,
    PayRent,
    ToggleSound,
    ToggleShop,
    CloseShop,
    ResetGame,
    LoadGame(Box<GameState>),
    Unknown,
}

/// 反序列化前的原始形狀
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    payload: Value,
}

fn payload<T: DeserializeOwned, E: serde::de::Error>(tag: &str, value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(|err| E::custom(format!("invalid {} payload: {}", tag, err)))
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawAction { tag, payload: value } = RawAction::deserialize(deserializer)?;

        let action = match tag.as_str() {
            ACTION_ADD_COINS => Action::AddCoins(payload(&tag, value)?),
            ACTION_START_SPIN => Action::StartSpin,
            ACTION_STOP_SPIN => Action::StopSpin,
            ACTION_UPDATE_GRID => Action::UpdateGrid(payload(&tag, value)?),
            ACTION_ADD_SYMBOL => Action::AddSymbol(payload(&tag, value)?),
            ACTION_DECREASE_TURNS => Action::DecreaseTurns,
            ACTION_PAY_RENT => Action::PayRent,
            ACTION_TOGGLE_SOUND => Action::ToggleSound,
            ACTION_TOGGLE_SHOP => Action::ToggleShop,
            ACTION_CLOSE_SHOP => Action::CloseShop,
            ACTION_RESET_GAME => Action::ResetGame,
            ACTION_LOAD_GAME => Action::LoadGame(payload(&tag, value)?),
            _ => {
                log::debug!("unknown action type {:?}", tag);
                Action::Unknown
            }
        };
        Ok(action)
    }
}

impl Action {
    /// action 標籤；`Unknown` 回傳 None
    pub fn tag(&self) -> Option<&'static str> {
        let tag = match self {
            Action::AddCoins(_) => ACTION_ADD_COINS,
            Action::StartSpin => ACTION_START_SPIN,
            Action::StopSpin => ACTION_STOP_SPIN,
            Action::UpdateGrid(_) => ACTION_UPDATE_GRID,
            Action::AddSymbol(_) => ACTION_ADD_SYMBOL,
            Action::DecreaseTurns => ACTION_DECREASE_TURNS,
            Action::PayRent => ACTION_PAY_RENT,
            Action::ToggleSound => ACTION_TOGGLE_SOUND,
            Action::ToggleShop => ACTION_TOGGLE_SHOP,
            Action::CloseShop => ACTION_CLOSE_SHOP,
            Action::ResetGame => ACTION_RESET_GAME,
            Action::LoadGame(_) => ACTION_LOAD_GAME,
            Action::Unknown => return None,
        };
        Some(tag)
    }

    /// 在 `ACTION_TAGS` 中的索引（action mask 用）
    pub fn type_index(&self) -> Option<usize> {
        let tag = self.tag()?;
        ACTION_TAGS.iter().position(|t| *t == tag)
    }

    /// 會推進回合或改變經濟的 action（終局後一律忽略）
    pub fn is_economic(&self) -> bool {
        matches!(
            self,
            Action::AddCoins(_)
                | Action::StartSpin
                | Action::UpdateGrid(_)
                | Action::AddSymbol(_)
                | Action::DecreaseTurns
                | Action::PayRent
        )
    }
}
