//! 遊戲狀態管理
//!
//! `GameState` 是存檔的完整內容。所有變化都經過 `apply`：
//! 讀入舊狀態與 action，回傳新狀態，舊值不會被修改。

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::snapshot::{validate, SnapshotError};
use super::store::StoreError;
use crate::game::{
    pay_rent, place_grid, resolve_spin, starting_symbols, Grid, Progress, RentEntry, RentOutcome,
    RentSchedule, SpinResult, SymbolId, SPIN_COST, STARTING_COINS,
};

/// 狀態層錯誤
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

fn default_true() -> bool {
    true
}

/// 遊戲狀態
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    // 經濟
    pub coins: i64,

    // 進度
    pub turn: u32,
    pub floor: usize,
    #[serde(default)]
    pub lost: bool,
    #[serde(default)]
    pub rent_schedule: RentSchedule,

    // 符號
    pub symbols: Vec<SymbolId>,
    pub grid: Grid,

    // UI 旗標（不影響經濟）；轉動中旗標讀檔時一律歸零
    #[serde(default, skip_deserializing)]
    pub is_spinning: bool,
    #[serde(default)]
    pub shop_open: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

impl GameState {
    /// 用預設房租表開新局
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_schedule(RentSchedule::default(), rng)
    }

    /// 用指定房租表開新局：起始符號放上初始盤面
    pub fn with_schedule<R: Rng + ?Sized>(rent_schedule: RentSchedule, rng: &mut R) -> Self {
        let symbols = starting_symbols();
        let grid = place_grid(&symbols, rng);

        Self {
            coins: STARTING_COINS,
            turn: 0,
            floor: 0,
            lost: false,
            rent_schedule,
            symbols,
            grid,
            is_spinning: false,
            shop_open: false,
            sound_enabled: true,
        }
    }

    pub fn progress(&self) -> Progress {
        if self.lost {
            Progress::Lost
        } else if self.rent_schedule.is_cleared(self.floor) {
            Progress::Won
        } else {
            Progress::Playing {
                floor: self.floor,
                turn: self.turn,
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.progress().is_terminal()
    }

    pub fn is_won(&self) -> bool {
        self.progress() == Progress::Won
    }

    /// 目前樓層的房租（終局勝利時為 None）
    pub fn current_rent(&self) -> Option<&RentEntry> {
        self.rent_schedule.get(self.floor)
    }

    /// 距離結算還剩幾次轉動
    pub fn turns_remaining(&self) -> u32 {
        self.current_rent()
            .map(|entry| entry.turns.saturating_sub(self.turn))
            .unwrap_or(0)
    }

    /// 套用 action，回傳新狀態
    pub fn apply<R: Rng + ?Sized>(&self, action: &Action, rng: &mut R) -> Result<GameState, GameError> {
        self.apply_with_outcome(action, rng).map(|(next, _)| next)
    }

    /// 套用 action；若觸發房租結算，一併回傳結算結果
    ///
    /// `LOAD_GAME` 的快照不合法時回傳錯誤，呼叫端保留原狀態。
    pub fn apply_with_outcome<R: Rng + ?Sized>(
        &self,
        action: &Action,
        rng: &mut R,
    ) -> Result<(GameState, Option<RentOutcome>), GameError> {
        if self.is_terminal() && action.is_economic() {
            log::debug!("ignored {:?} after game end", action.tag());
            return Ok((self.clone(), None));
        }

        let mut next = self.clone();
        let mut outcome = None;

        match action {
            Action::AddCoins(amount) => {
                next.coins = next.coins.saturating_add(*amount);
            }
            Action::StartSpin => {
                // 0 金幣也能轉，只是不扣費
                if next.coins >= SPIN_COST {
                    next.coins -= SPIN_COST;
                }
                next.is_spinning = true;
            }
            Action::StopSpin => {
                next.is_spinning = false;
            }
            Action::UpdateGrid(grid) => {
                next.grid = grid.clone();
            }
            Action::AddSymbol(id) => {
                next.symbols.push(*id);
            }
            Action::DecreaseTurns => {
                outcome = next.advance_turn();
            }
            Action::PayRent => {
                outcome = Some(next.settle_rent());
            }
            Action::ToggleSound => {
                next.sound_enabled = !next.sound_enabled;
            }
            Action::ToggleShop => {
                next.shop_open = !next.shop_open;
            }
            Action::CloseShop => {
                next.shop_open = false;
            }
            Action::ResetGame => {
                next = GameState::with_schedule(self.rent_schedule.clone(), rng);
                log::info!("game reset");
            }
            Action::LoadGame(snapshot) => {
                validate(snapshot)?;
                next = (**snapshot).clone();
                next.is_spinning = false;
                log::info!("game loaded at floor {} with {} coins", next.floor, next.coins);
            }
            Action::Unknown => {}
        }

        Ok((next, outcome))
    }

    /// 推進一個回合；到達本層 turns 時結算房租
    fn advance_turn(&mut self) -> Option<RentOutcome> {
        let entry = *self.current_rent()?;
        let next_turn = self.turn.saturating_add(1);

        if next_turn >= entry.turns {
            self.turn = entry.turns;
            Some(self.settle_rent())
        } else {
            self.turn = next_turn;
            self.shop_open = true;
            None
        }
    }

    /// 結算目前樓層的房租
    fn settle_rent(&mut self) -> RentOutcome {
        let outcome = pay_rent(self.coins, self.floor, &self.rent_schedule);

        if outcome.success {
            self.coins = outcome.remaining_coins;
            self.floor = outcome.new_floor;
            self.turn = 0;
            if !outcome.victory {
                self.shop_open = true;
            }
            log::info!("{}", outcome.message);
        } else {
            self.lost = true;
            log::info!("{}", outcome.message);
        }

        outcome
    }
}

// ============================================================================
// 轉動流程
// ============================================================================

/// 開始一次轉動：START_SPIN → 放置計分 → UPDATE_GRID → ADD_COINS
///
/// 終局時不轉動，回傳原狀態與 None。
pub fn begin_spin<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
) -> Result<(GameState, Option<SpinResult>), GameError> {
    if state.is_terminal() {
        return Ok((state.clone(), None));
    }

    let started = state.apply(&Action::StartSpin, rng)?;
    let result = resolve_spin(&started.symbols, rng);
    let placed = started.apply(&Action::UpdateGrid(result.grid.clone()), rng)?;
    let paid = placed.apply(&Action::AddCoins(result.total()), rng)?;

    log::debug!(
        "spin yielded {} (+{} bonus), balance {}",
        result.base_coins,
        result.bonus_coins,
        paid.coins
    );
    Ok((paid, Some(result)))
}

/// 結束一次轉動：STOP_SPIN → DECREASE_TURNS
pub fn end_spin<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
) -> Result<(GameState, Option<RentOutcome>), GameError> {
    let stopped = state.apply(&Action::StopSpin, rng)?;
    stopped.apply_with_outcome(&Action::DecreaseTurns, rng)
}

// ============================================================================
// 單元測試
// ============================================================================
