//! 遊戲環境
//!
//! 一個 `GameEnv` 持有目前狀態、自己的 RNG、存檔槽與商店。
//! 每次狀態轉移後都會存檔；存檔失敗只記 log，不回滾。

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::action::Action;
use super::state::{begin_spin, end_spin, GameError, GameState};
use super::store::{SaveSlot, Store};
use crate::game::{RentOutcome, RentSchedule, Shop, SpinResult, SymbolId, SHOP_OFFER_COUNT};

pub struct GameEnv<S: Store> {
    state: GameState,
    rng: StdRng,
    slot: SaveSlot<S>,
    shop: Shop,
}

impl<S: Store> GameEnv<S> {
    /// 開啟存檔槽；沒有可用存檔時開新局
    pub fn open(slot: SaveSlot<S>, schedule: RentSchedule, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let state = match slot.load() {
            Some(state) => {
                log::info!(
                    "restored save {} at floor {} with {} coins",
                    slot.key(),
                    state.floor,
                    state.coins
                );
                state
            }
            None => {
                log::info!("starting fresh game for {}", slot.key());
                GameState::with_schedule(schedule, &mut rng)
            }
        };

        Self {
            state,
            rng,
            slot,
            shop: Shop::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 目前商店提供的符號
    pub fn offer(&self) -> &[SymbolId] {
        &self.shop.items
    }

    /// 套用單一 action
    pub fn dispatch(&mut self, action: &Action) -> Result<Option<RentOutcome>, GameError> {
        let (next, outcome) = self.state.apply_with_outcome(action, &mut self.rng)?;
        if matches!(action, Action::ResetGame | Action::LoadGame(_)) {
            self.shop = Shop::new();
        }
        self.commit(next);
        Ok(outcome)
    }

    /// 轉動：扣費、放置計分、入帳
    pub fn spin(&mut self) -> Result<Option<SpinResult>, GameError> {
        let (next, result) = begin_spin(&self.state, &mut self.rng)?;
        self.commit(next);
        Ok(result)
    }

    /// 轉動結束：停止並推進回合，可能觸發房租結算
    pub fn finish_spin(&mut self) -> Result<Option<RentOutcome>, GameError> {
        let (next, outcome) = end_spin(&self.state, &mut self.rng)?;
        self.commit(next);
        Ok(outcome)
    }

    /// 刷新商店；商店未開或已終局時回傳空清單
    pub fn shop_offer(&mut self) -> &[SymbolId] {
        if self.state.shop_open && !self.state.is_terminal() {
            self.shop.refresh(&mut self.rng, SHOP_OFFER_COUNT);
        } else {
            self.shop = Shop::new();
        }
        &self.shop.items
    }

    /// 從目前商店挑一個符號加入收藏並關閉商店
    pub fn buy(&mut self, index: usize) -> Result<Option<SymbolId>, GameError> {
        let Some(id) = self.shop.take(index) else {
            return Ok(None);
        };
        self.dispatch(&Action::AddSymbol(id))?;
        self.dispatch(&Action::CloseShop)?;
        self.shop = Shop::new();
        Ok(Some(id))
    }

    fn commit(&mut self, next: GameState) {
        if let Err(err) = self.slot.save(&next) {
            log::warn!("failed to save {}: {}", self.slot.key(), err);
        }
        self.state = next;
    }
}
