//! 轉動計分引擎
//!
//! 總收益 = 基礎數值總和 + 效果加成總和。
//! 每個效果都讀同一份靜態盤面快照，因此評估順序不影響結果。

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::grid::{place_grid, Grid};
use super::symbols::{SymbolDef, SymbolId};

/// 單次轉動結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub grid: Grid,
    pub base_coins: i64,
    pub bonus_coins: i64,
}

impl SpinResult {
    pub fn total(&self) -> i64 {
        self.base_coins + self.bonus_coins
    }
}

/// 重新放置盤面並計算收益
pub fn resolve_spin<R: Rng + ?Sized>(owned: &[SymbolId], rng: &mut R) -> SpinResult {
    let mut grid = place_grid(owned, rng);
    let (base_coins, bonus_coins) = evaluate_grid(&mut grid);
    SpinResult {
        grid,
        base_coins,
        bonus_coins,
    }
}

/// 計算固定盤面的 (base, bonus)，並寫回每個實例的 `bonus_value`
///
/// 效果失敗時記 0，不會中斷整次轉動。
pub fn evaluate_grid(grid: &mut Grid) -> (i64, i64) {
    evaluate_grid_with(grid, |id| SymbolDef::lookup(id).and_then(|def| def.effect))
}

/// 同 `evaluate_grid`，但效果由 `effect_of` 依 id 查詢
pub fn evaluate_grid_with<F>(grid: &mut Grid, effect_of: F) -> (i64, i64)
where
    F: Fn(SymbolId) -> Option<EffectKind>,
{
    grid.reset_bonuses();

    let base_coins: i64 = grid.occupied().map(|(_, s)| s.value()).sum();

    // 先對快照算完所有效果，再寫回實例
    let snapshot = grid.clone();
    let mut bonuses = Vec::new();
    for (index, symbol) in snapshot.occupied() {
        let Some(effect) = effect_of(symbol.id) else {
            continue;
        };
        let bonus = match effect.evaluate(&snapshot, index) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("effect of {:?} at cell {} ignored: {}", symbol.id, index, err);
                0
            }
        };
        bonuses.push((index, bonus));
    }

    let mut bonus_coins: i64 = 0;
    for (index, bonus) in bonuses {
        if let Some(symbol) = grid.get_mut(index) {
            symbol.bonus_value = bonus;
        }
        bonus_coins = bonus_coins.saturating_add(bonus);
    }

    (base_coins, bonus_coins)
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::GRID_CELLS;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(cells: &[(usize, SymbolId)]) -> Grid {
        let mut grid = Grid::empty();
        for &(i, id) in cells {
            grid.set(i, id);
        }
        grid
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        let mut grid = Grid::empty();
        assert_eq!(evaluate_grid(&mut grid), (0, 0));
    }

    #[test]
    fn test_base_sum_without_effects() {
        let mut grid = grid_with(&[
            (0, SymbolId::Coin),
            (6, SymbolId::Cherry),
            (24, SymbolId::Diamond),
        ]);
        // Diamond 只有自己一個，加成 0
        assert_eq!(evaluate_grid(&mut grid), (7, 0));
    }

    #[test]
    fn test_bonus_recorded_on_instances() {
        let mut grid = grid_with(&[
            (12, SymbolId::Cat),
            (7, SymbolId::Milk),
            (11, SymbolId::Milk),
        ]);
        let (base, bonus) = evaluate_grid(&mut grid);
        assert_eq!(base, 3);
        assert_eq!(bonus, 6);
        assert_eq!(grid.get(12).map(|s| s.bonus_value), Some(6));
        assert_eq!(grid.get(7).map(|s| s.bonus_value), Some(0));
        assert_eq!(grid.triggered_cells(), 1);
    }

    #[test]
    fn test_stale_bonus_is_reset() {
        let mut grid = grid_with(&[(0, SymbolId::Coin)]);
        if let Some(coin) = grid.get_mut(0) {
            coin.bonus_value = 99;
        }
        assert_eq!(evaluate_grid(&mut grid), (1, 0));
        assert_eq!(grid.get(0).map(|s| s.bonus_value), Some(0));
    }

    #[test]
    fn test_effects_see_same_snapshot() {
        // 兩個 Sun 互相相鄰：各自 +1，不受先後順序影響
        let mut grid = grid_with(&[(0, SymbolId::Sun), (1, SymbolId::Sun)]);
        let (base, bonus) = evaluate_grid(&mut grid);
        assert_eq!(base, 6);
        assert_eq!(bonus, 2);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let owned: Vec<SymbolId> = SymbolId::all().iter().cycle().take(18).copied().collect();
        let result = resolve_spin(&owned, &mut rng);

        let mut again = result.grid.clone();
        assert_eq!(evaluate_grid(&mut again), (result.base_coins, result.bonus_coins));
        assert_eq!(again, result.grid);
    }

    #[test]
    fn test_total() {
        let result = SpinResult {
            grid: Grid::empty(),
            base_coins: 12,
            bonus_coins: 5,
        };
        assert_eq!(result.total(), 17);
    }

    #[test]
    fn test_failing_effect_counts_zero() {
        // Sun 有兩個鄰居，per = i64::MAX 會溢位；Cat 照常計分
        let mut grid = grid_with(&[
            (12, SymbolId::Sun),
            (7, SymbolId::Coin),
            (13, SymbolId::Coin),
            (0, SymbolId::Cat),
            (1, SymbolId::Milk),
        ]);
        let (base, bonus) = evaluate_grid_with(&mut grid, |id| match id {
            SymbolId::Sun => Some(EffectKind::AdjacentAny { per: i64::MAX }),
            other => other.effect(),
        });

        assert_eq!(base, 3 + 1 + 1 + 1 + 1);
        assert_eq!(bonus, 3);
        assert_eq!(grid.get(12).map(|s| s.bonus_value), Some(0));
        assert_eq!(grid.get(0).map(|s| s.bonus_value), Some(3));
    }

    #[test]
    fn test_catalog_lookup_matches_default_evaluation() {
        let cells = [(6, SymbolId::Bee), (7, SymbolId::Flower), (11, SymbolId::Flower)];
        let mut by_catalog = grid_with(&cells);
        let mut by_id = grid_with(&cells);
        assert_eq!(
            evaluate_grid(&mut by_catalog),
            evaluate_grid_with(&mut by_id, |id| id.effect())
        );
        assert_eq!(by_catalog, by_id);
    }

    proptest! {
        #[test]
        fn prop_base_is_sum_of_values(n in 0usize..40, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let owned: Vec<SymbolId> = SymbolId::all().iter().cycle().take(n).copied().collect();
            let result = resolve_spin(&owned, &mut rng);

            let expected: i64 = (0..GRID_CELLS)
                .filter_map(|i| result.grid.get(i))
                .map(|s| s.id.value())
                .sum();
            prop_assert_eq!(result.base_coins, expected);
            prop_assert!(result.bonus_coins >= 0);

            let recorded: i64 = result.grid.occupied().map(|(_, s)| s.bonus_value).sum();
            prop_assert_eq!(recorded, result.bonus_coins);
        }
    }
}
