//! 批次經濟模擬
//!
//! 以固定策略平行跑多局，統計房租表的難度：
//! 每回合都轉動，商店開啟時挑目錄數值最高的符號。

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use super::action::Action;
use super::state::{begin_spin, end_spin, GameError, GameState};
use crate::game::{RentSchedule, Shop, MAX_SIMULATION_SPINS, SHOP_OFFER_COUNT};

/// 單局結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub seed: u64,
    pub won: bool,
    pub floor: usize,
    pub coins: i64,
    pub spins: u32,
    pub symbols: usize,
}

/// 多局統計
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub average_floor: f64,
    /// 索引為結束時的樓層
    pub floor_histogram: Vec<usize>,
    pub average_coins: f64,
}

impl SimulationReport {
    fn from_summaries(summaries: &[GameSummary], floors: usize) -> Self {
        let games = summaries.len();
        let wins = summaries.iter().filter(|s| s.won).count();

        let mut floor_histogram = vec![0; floors + 1];
        for summary in summaries {
            let bucket = summary.floor.min(floors);
            floor_histogram[bucket] += 1;
        }

        let (average_floor, average_coins) = if games == 0 {
            (0.0, 0.0)
        } else {
            let floor_sum: usize = summaries.iter().map(|s| s.floor).sum();
            let coin_sum: i64 = summaries.iter().map(|s| s.coins).sum();
            (
                floor_sum as f64 / games as f64,
                coin_sum as f64 / games as f64,
            )
        };

        Self {
            games,
            wins,
            losses: games - wins,
            average_floor,
            floor_histogram,
            average_coins,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// 跑一局到終局（或達到轉動上限）
pub fn play_game(seed: u64, schedule: &RentSchedule) -> Result<GameSummary, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::with_schedule(schedule.clone(), &mut rng);
    let mut shop = Shop::new();
    let mut spins = 0;

    while !state.is_terminal() && spins < MAX_SIMULATION_SPINS {
        let (spun, _) = begin_spin(&state, &mut rng)?;
        let (ended, _) = end_spin(&spun, &mut rng)?;
        state = ended;
        spins += 1;

        if state.shop_open && !state.is_terminal() {
            shop.refresh(&mut rng, SHOP_OFFER_COUNT);
            if let Some((_, id)) = shop.best_value() {
                state = state.apply(&Action::AddSymbol(id), &mut rng)?;
            }
            state = state.apply(&Action::CloseShop, &mut rng)?;
        }
    }

    log::debug!(
        "game {} ended at floor {} after {} spins ({:?})",
        seed,
        state.floor,
        spins,
        state.progress()
    );

    Ok(GameSummary {
        seed,
        won: state.is_won(),
        floor: state.floor,
        coins: state.coins,
        spins,
        symbols: state.symbols.len(),
    })
}

/// 平行跑 `games` 局，第 i 局的種子為 `base_seed + i`
pub fn simulate(
    games: usize,
    base_seed: u64,
    schedule: &RentSchedule,
) -> Result<SimulationReport, GameError> {
    let summaries: Vec<GameSummary> = (0..games)
        .into_par_iter()
        .map(|i| play_game(base_seed.wrapping_add(i as u64), schedule))
        .collect::<Result<_, _>>()?;

    let report = SimulationReport::from_summaries(&summaries, schedule.len());
    log::info!(
        "simulated {} games: {} wins, average floor {:.2}",
        report.games,
        report.wins,
        report.average_floor
    );
    Ok(report)
}
