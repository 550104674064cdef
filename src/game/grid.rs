//! 盤面與符號放置
//!
//! 5×5 row-major 盤面。每次轉動都重新放置：
//! 擁有的符號超過 20 個時先洗牌取 20 個，再洗牌 25 個格子索引，
//! 依序把符號放進前 N 個格子。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constants::{GRID_CELLS, GRID_SIZE, MAX_PLACED};
use super::symbols::{SymbolDef, SymbolId};

/// 盤面上的符號實例
///
/// 只記錄目錄 id 與本次轉動的加成；數值和效果都從目錄查。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInstance {
    pub id: SymbolId,
    #[serde(default)]
    pub bonus_value: i64,
}

impl SymbolInstance {
    pub fn new(id: SymbolId) -> Self {
        Self { id, bonus_value: 0 }
    }

    pub fn def(&self) -> Option<&'static SymbolDef> {
        SymbolDef::lookup(self.id)
    }

    /// 基礎數值（目錄查不到時為 0）
    pub fn value(&self) -> i64 {
        self.def().map(|d| d.value).unwrap_or(0)
    }
}

/// 5×5 盤面
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [Option<SymbolInstance>; GRID_CELLS],
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    pub fn get(&self, index: usize) -> Option<&SymbolInstance> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SymbolInstance> {
        self.cells.get_mut(index).and_then(|c| c.as_mut())
    }

    /// 放入符號，超出範圍時回傳 false
    pub fn set(&mut self, index: usize, id: SymbolId) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = Some(SymbolInstance::new(id));
                true
            }
            None => false,
        }
    }

    /// 依索引順序列出有符號的格子
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &SymbolInstance)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|s| (i, s)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        GRID_CELLS - self.occupied_count()
    }

    /// 把所有實例的加成歸零
    pub fn reset_bonuses(&mut self) {
        for symbol in self.cells.iter_mut().flatten() {
            symbol.bonus_value = 0;
        }
    }

    /// 本次轉動有觸發加成的格子數
    pub fn triggered_cells(&self) -> usize {
        self.occupied().filter(|(_, s)| s.bonus_value > 0).count()
    }

    /// 盤面上的符號 id（依索引順序）
    pub fn symbol_ids(&self) -> Vec<SymbolId> {
        self.occupied().map(|(_, s)| s.id).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// 鄰接計算
// ============================================================================

/// 上、右、下、左的相鄰格子（不環繞）
pub fn adjacent_indices(index: usize) -> Vec<usize> {
    let mut adjacent = Vec::with_capacity(4);
    if index >= GRID_CELLS {
        return adjacent;
    }
    let row = index / GRID_SIZE;
    let col = index % GRID_SIZE;

    if row > 0 {
        adjacent.push(index - GRID_SIZE);
    }
    if col < GRID_SIZE - 1 {
        adjacent.push(index + 1);
    }
    if row < GRID_SIZE - 1 {
        adjacent.push(index + GRID_SIZE);
    }
    if col > 0 {
        adjacent.push(index - 1);
    }
    adjacent
}

pub fn is_corner(index: usize) -> bool {
    if index >= GRID_CELLS {
        return false;
    }
    let last = GRID_SIZE - 1;
    let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
    (row == 0 || row == last) && (col == 0 || col == last)
}

// ============================================================================
// 放置
// ============================================================================

/// 將擁有的符號隨機放到盤面上
///
/// 最多放 `MAX_PLACED` 個；多出來的以無偏洗牌隨機淘汰。
pub fn place_grid<R: Rng + ?Sized>(owned: &[SymbolId], rng: &mut R) -> Grid {
    let mut selected = owned.to_vec();
    if selected.len() > MAX_PLACED {
        selected.shuffle(rng);
        selected.truncate(MAX_PLACED);
    }

    let mut positions: Vec<usize> = (0..GRID_CELLS).collect();
    positions.shuffle(rng);

    let mut grid = Grid::empty();
    for (&pos, &id) in positions.iter().zip(selected.iter()) {
        grid.cells[pos] = Some(SymbolInstance::new(id));
    }

    log::debug!(
        "placed {} of {} owned symbols",
        grid.occupied_count(),
        owned.len()
    );
    grid
}

// ============================================================================
// 單元測試
// ============================================================================
