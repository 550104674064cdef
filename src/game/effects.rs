//! 效果系統 - Tagged Variant Registry
//!
//! 每種符號效果是一個 `EffectKind` 變體，由目錄依 id 取得，
//! 不會跟著實例序列化。效果只讀取盤面快照，不修改任何狀態。

use super::constants::GRID_CELLS;
use super::grid::{adjacent_indices, is_corner, Grid};
use super::symbols::SymbolId;

/// 效果計算錯誤（由 spin 引擎吞掉並記為 0）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("cell index {0} is outside the grid")]
    IndexOutOfRange(usize),

    #[error("cell {0} is empty")]
    EmptyCell(usize),

    #[error("bonus overflowed at cell {0}")]
    Overflow(usize),
}

/// 效果種類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// 每個相鄰的指定符號 +per
    AdjacentSymbol { target: SymbolId, per: i64 },
    /// 每個相鄰的非空格 +per
    AdjacentAny { per: i64 },
    /// 每個相鄰的空格 +per
    AdjacentEmpty { per: i64 },
    /// 位於四個角落之一時 +bonus
    Corner { bonus: i64 },
    /// 盤面上每個其他同種符號 +per
    SameKindAnywhere { per: i64 },
}

impl EffectKind {
    /// 計算位於 `index` 的實例的加成
    ///
    /// 結果永遠 >= 0。
    pub fn evaluate(&self, grid: &Grid, index: usize) -> Result<i64, EffectError> {
        if index >= GRID_CELLS {
            return Err(EffectError::IndexOutOfRange(index));
        }
        let own = grid.get(index).ok_or(EffectError::EmptyCell(index))?;

        let (count, per) = match *self {
            EffectKind::AdjacentSymbol { target, per } => {
                let n = adjacent_indices(index)
                    .into_iter()
                    .filter(|&i| grid.get(i).map(|s| s.id) == Some(target))
                    .count();
                (n, per)
            }
            EffectKind::AdjacentAny { per } => {
                let n = adjacent_indices(index)
                    .into_iter()
                    .filter(|&i| grid.get(i).is_some())
                    .count();
                (n, per)
            }
            EffectKind::AdjacentEmpty { per } => {
                let n = adjacent_indices(index)
                    .into_iter()
                    .filter(|&i| grid.get(i).is_none())
                    .count();
                (n, per)
            }
            EffectKind::Corner { bonus } => (usize::from(is_corner(index)), bonus),
            EffectKind::SameKindAnywhere { per } => {
                let n = grid
                    .occupied()
                    .filter(|&(i, s)| i != index && s.id == own.id)
                    .count();
                (n, per)
            }
        };

        let bonus = i64::try_from(count)
            .ok()
            .and_then(|n| n.checked_mul(per))
            .ok_or(EffectError::Overflow(index))?;
        Ok(bonus.max(0))
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, SymbolId)]) -> Grid {
        let mut grid = Grid::empty();
        for &(i, id) in cells {
            grid.set(i, id);
        }
        grid
    }

    #[test]
    fn test_cat_counts_adjacent_milk() {
        // 12 是正中央；7/11/13/17 為上下左右
        let grid = grid_with(&[
            (12, SymbolId::Cat),
            (7, SymbolId::Milk),
            (13, SymbolId::Milk),
            (18, SymbolId::Milk), // 斜角不算
        ]);
        let effect = SymbolId::Cat.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 12), Ok(6));
    }

    #[test]
    fn test_adjacency_does_not_wrap() {
        // 4 在第一列最右邊，5 在第二列最左邊，不相鄰
        let grid = grid_with(&[(4, SymbolId::Cat), (5, SymbolId::Milk)]);
        let effect = SymbolId::Cat.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 4), Ok(0));
    }

    #[test]
    fn test_sun_counts_occupied_neighbours() {
        let grid = grid_with(&[
            (0, SymbolId::Sun),
            (1, SymbolId::Coin),
            (5, SymbolId::Pearl),
        ]);
        let effect = SymbolId::Sun.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 0), Ok(2));
    }

    #[test]
    fn test_void_stone_counts_empty_neighbours() {
        let grid = grid_with(&[(12, SymbolId::VoidStone), (7, SymbolId::Coin)]);
        let effect = SymbolId::VoidStone.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 12), Ok(3));
    }

    #[test]
    fn test_clover_corner() {
        let effect = SymbolId::Clover.effect().unwrap();
        for corner in [0, 4, 20, 24] {
            let grid = grid_with(&[(corner, SymbolId::Clover)]);
            assert_eq!(effect.evaluate(&grid, corner), Ok(3));
        }
        let grid = grid_with(&[(2, SymbolId::Clover)]);
        assert_eq!(effect.evaluate(&grid, 2), Ok(0));
    }

    #[test]
    fn test_diamond_counts_others_only() {
        let grid = grid_with(&[
            (0, SymbolId::Diamond),
            (24, SymbolId::Diamond),
            (13, SymbolId::Diamond),
        ]);
        let effect = SymbolId::Diamond.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 0), Ok(2));
    }

    #[test]
    fn test_invalid_cells_are_errors() {
        let grid = grid_with(&[(3, SymbolId::Cat)]);
        let effect = SymbolId::Cat.effect().unwrap();
        assert_eq!(effect.evaluate(&grid, 25), Err(EffectError::IndexOutOfRange(25)));
        assert_eq!(effect.evaluate(&grid, 2), Err(EffectError::EmptyCell(2)));
    }

    #[test]
    fn test_overflow_is_error() {
        let grid = grid_with(&[(12, SymbolId::Sun), (7, SymbolId::Coin), (13, SymbolId::Coin)]);
        let effect = EffectKind::AdjacentAny { per: i64::MAX };
        assert_eq!(effect.evaluate(&grid, 12), Err(EffectError::Overflow(12)));
    }

    #[test]
    fn test_negative_per_is_clamped() {
        let grid = grid_with(&[(12, SymbolId::Sun), (7, SymbolId::Coin)]);
        let effect = EffectKind::AdjacentAny { per: -5 };
        assert_eq!(effect.evaluate(&grid, 12), Ok(0));
    }
}
