//! 存檔快照
//!
//! 快照是 `GameState` 的 camelCase JSON。讀回時會驗證：
//! 格式錯或數值不合法的快照一律拒絕，不會部分套用。

use super::state::GameState;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rent schedule is empty")]
    EmptySchedule,

    #[error("floor {floor} is beyond a schedule of {len} floors")]
    FloorOutOfRange { floor: usize, len: usize },

    #[error("floor {floor} has negative rent {rent}")]
    NegativeRent { floor: usize, rent: i64 },

    #[error("turn {turn} exceeds {turns} turns on floor {floor}")]
    TurnOutOfRange { floor: usize, turn: u32, turns: u32 },

    #[error("lost state on cleared floor {0}")]
    LostAfterVictory(usize),
}

/// 序列化成存檔字串
pub fn serialize(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// 解析並驗證存檔字串
pub fn deserialize(raw: &str) -> Result<GameState, SnapshotError> {
    let mut state: GameState = serde_json::from_str(raw)?;
    validate(&state)?;
    state.is_spinning = false;
    Ok(state)
}

/// 檢查快照數值是否構成合法進度
///
/// 盤面是每次轉動重算的衍生資料（`UPDATE_GRID` 原樣寫入），不在檢查範圍內。
pub fn validate(state: &GameState) -> Result<(), SnapshotError> {
    let schedule = &state.rent_schedule;
    if schedule.is_empty() {
        return Err(SnapshotError::EmptySchedule);
    }

    if state.floor > schedule.len() {
        return Err(SnapshotError::FloorOutOfRange {
            floor: state.floor,
            len: schedule.len(),
        });
    }

    for (floor, entry) in schedule.entries().iter().enumerate() {
        if entry.rent < 0 {
            return Err(SnapshotError::NegativeRent {
                floor,
                rent: entry.rent,
            });
        }
    }

    if let Some(entry) = schedule.get(state.floor) {
        if state.turn > entry.turns {
            return Err(SnapshotError::TurnOutOfRange {
                floor: state.floor,
                turn: state.turn,
                turns: entry.turns,
            });
        }
    } else if state.lost {
        return Err(SnapshotError::LostAfterVictory(state.floor));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Progress, RentEntry, RentSchedule, SymbolId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        GameState::new(&mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_snapshot_restores_equal_state() {
        let mut original = state();
        original.coins = 321;
        original.floor = 4;
        original.turn = 2;
        original.symbols.push(SymbolId::Miner);
        original.shop_open = true;

        let raw = serialize(&original).unwrap();
        let restored = deserialize(&raw).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let raw = serialize(&state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("rentSchedule").is_some());
        assert!(value.get("soundEnabled").is_some());
        assert!(value.get("isSpinning").is_some());
        assert_eq!(value["grid"].as_array().map(|cells| cells.len()), Some(25));
    }

    #[test]
    fn test_spinning_flag_never_restored() {
        let mut spinning = state();
        spinning.is_spinning = true;
        let raw = serialize(&spinning).unwrap();
        assert!(!deserialize(&raw).unwrap().is_spinning);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let mut value = serde_json::to_value(state()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("rentSchedule");
        object.remove("soundEnabled");
        object.remove("shopOpen");
        object.remove("lost");

        let restored = deserialize(&value.to_string()).unwrap();
        assert_eq!(restored.rent_schedule, RentSchedule::default());
        assert!(restored.sound_enabled);
        assert!(!restored.shop_open);
        assert!(!restored.lost);
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(matches!(deserialize("{not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(deserialize(r#"{"coins":1}"#), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_invalid_progress_rejected() {
        let mut bad = state();
        bad.floor = 15;
        assert!(matches!(
            validate(&bad),
            Err(SnapshotError::FloorOutOfRange { floor: 15, len: 14 })
        ));

        let mut bad = state();
        bad.turn = 5;
        assert!(matches!(validate(&bad), Err(SnapshotError::TurnOutOfRange { .. })));

        let mut bad = state();
        bad.rent_schedule = RentSchedule::new(vec![]);
        assert!(matches!(validate(&bad), Err(SnapshotError::EmptySchedule)));

        let mut bad = state();
        bad.rent_schedule = RentSchedule::new(vec![RentEntry::new(-1, 3)]);
        assert!(matches!(validate(&bad), Err(SnapshotError::NegativeRent { .. })));

        let mut bad = state();
        bad.floor = 14;
        bad.lost = true;
        assert!(matches!(validate(&bad), Err(SnapshotError::LostAfterVictory(14))));
    }

    #[test]
    fn test_full_grid_snapshot_restores() {
        let mut full = state();
        full.coins = 300;
        for index in 0..25 {
            full.grid.set(index, SymbolId::Coin);
        }
        let restored = deserialize(&serialize(&full).unwrap()).unwrap();
        assert_eq!(restored, full);
        assert_eq!(restored.grid.occupied_count(), 25);
    }

    #[test]
    fn test_won_snapshot_is_valid() {
        let mut won = state();
        won.floor = 14;
        assert!(validate(&won).is_ok());
        assert_eq!(won.progress(), Progress::Won);
    }
}
