//! 商店系統
//!
//! 每次轉完後提供幾個符號讓玩家挑一個（`ADD_SYMBOL`）。
//! 依稀有度加權抽選，可重複出現。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::symbols::SymbolId;

/// 商店
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub items: Vec<SymbolId>,
}

impl Shop {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 刷新商店物品
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R, item_count: usize) {
        self.items.clear();
        for _ in 0..item_count {
            match SymbolId::all().choose_weighted(rng, |id| id.def().rarity.shop_weight()) {
                Ok(&id) => self.items.push(id),
                Err(err) => {
                    log::warn!("shop refresh failed: {}", err);
                    break;
                }
            }
        }
    }

    /// 取走指定索引的物品
    pub fn take(&mut self, index: usize) -> Option<SymbolId> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// 目錄數值最高的物品（模擬器的貪婪策略）
    pub fn best_value(&self) -> Option<(usize, SymbolId)> {
        self.items
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|&(_, id)| id.value())
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::symbols::Rarity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shop_refresh() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut shop = Shop::new();
        shop.refresh(&mut rng, 3);
        assert_eq!(shop.items.len(), 3);

        shop.refresh(&mut rng, 2);
        assert_eq!(shop.items.len(), 2);
    }

    #[test]
    fn test_shop_take() {
        let mut shop = Shop {
            items: vec![SymbolId::Coin, SymbolId::Sun],
        };
        assert_eq!(shop.take(1), Some(SymbolId::Sun));
        assert_eq!(shop.take(1), None);
        assert_eq!(shop.items, vec![SymbolId::Coin]);
    }

    #[test]
    fn test_best_value() {
        let shop = Shop {
            items: vec![SymbolId::Coin, SymbolId::Diamond, SymbolId::Sun],
        };
        assert_eq!(shop.best_value(), Some((1, SymbolId::Diamond)));
        assert_eq!(Shop::new().best_value(), None);
    }

    #[test]
    fn test_commons_dominate() {
        let mut rng = StdRng::seed_from_u64(123);
        let mut shop = Shop::new();
        let mut common = 0;
        let mut rare = 0;
        for _ in 0..500 {
            shop.refresh(&mut rng, 3);
            for id in &shop.items {
                match id.def().rarity {
                    Rarity::Common => common += 1,
                    Rarity::Rare => rare += 1,
                    Rarity::Uncommon => {}
                }
            }
        }
        assert!(common > rare * 3, "common={} rare={}", common, rare);
    }
}
