//! 符號目錄
//!
//! 靜態的符號模板註冊表。盤面上的實例只保存 `SymbolId`，
//! 數值與效果一律在計算時透過 `SymbolDef::lookup` 查回來。

use serde::{Deserialize, Serialize};

use super::effects::EffectKind;

/// 符號總數
pub const SYMBOL_COUNT: usize = 13;

/// 符號唯一識別碼
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolId {
    Coin = 0,
    Cherry = 1,
    Pearl = 2,
    Flower = 3,
    Milk = 4,
    Ore = 5,
    Cat = 6,       // 相鄰 Milk 每個 +3
    Bee = 7,       // 相鄰 Flower 每個 +2
    Miner = 8,     // 相鄰 Ore 每個 +2
    Clover = 9,    // 放在角落 +3
    VoidStone = 10, // 相鄰空格每格 +1
    Sun = 11,      // 相鄰有符號的格子每格 +1
    Diamond = 12,  // 盤面上其他 Diamond 每個 +1
}

impl SymbolId {
    pub fn to_index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_SYMBOLS.get(index).copied()
    }

    /// 所有符號（依索引排序）
    pub fn all() -> &'static [SymbolId] {
        &ALL_SYMBOLS
    }

    /// 指定稀有度的所有符號
    pub fn by_rarity(rarity: Rarity) -> Vec<SymbolId> {
        ALL_SYMBOLS
            .iter()
            .copied()
            .filter(|id| id.def().rarity == rarity)
            .collect()
    }

    /// 取得模板（目錄以索引排列，O(1)）
    pub fn def(self) -> &'static SymbolDef {
        &SYMBOL_DEFINITIONS[self.to_index()]
    }

    pub fn value(self) -> i64 {
        self.def().value
    }

    pub fn effect(self) -> Option<EffectKind> {
        self.def().effect
    }
}

const ALL_SYMBOLS: [SymbolId; SYMBOL_COUNT] = [
    SymbolId::Coin,
    SymbolId::Cherry,
    SymbolId::Pearl,
    SymbolId::Flower,
    SymbolId::Milk,
    SymbolId::Ore,
    SymbolId::Cat,
    SymbolId::Bee,
    SymbolId::Miner,
    SymbolId::Clover,
    SymbolId::VoidStone,
    SymbolId::Sun,
    SymbolId::Diamond,
];

/// 稀有度（只影響商店權重）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// 商店抽選權重
    pub fn shop_weight(self) -> u32 {
        match self {
            Rarity::Common => 60,
            Rarity::Uncommon => 30,
            Rarity::Rare => 10,
        }
    }
}

/// 符號模板
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolDef {
    pub id: SymbolId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub value: i64,
    pub rarity: Rarity,
    pub effect: Option<EffectKind>,
    pub effect_description: Option<&'static str>,
}

impl SymbolDef {
    /// 依 id 掃描目錄；找不到時回傳 None，呼叫端視為無效果
    pub fn lookup(id: SymbolId) -> Option<&'static SymbolDef> {
        SYMBOL_DEFINITIONS.iter().find(|def| def.id == id)
    }
}

// ============================================================================
// 符號定義表
// ============================================================================

pub static SYMBOL_DEFINITIONS: [SymbolDef; SYMBOL_COUNT] = [
    SymbolDef {
        id: SymbolId::Coin,
        name: "Coin",
        emoji: "🪙",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Cherry,
        name: "Cherry",
        emoji: "🍒",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Pearl,
        name: "Pearl",
        emoji: "⚪",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Flower,
        name: "Flower",
        emoji: "🌸",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Milk,
        name: "Milk",
        emoji: "🥛",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Ore,
        name: "Ore",
        emoji: "🪨",
        value: 1,
        rarity: Rarity::Common,
        effect: None,
        effect_description: None,
    },
    SymbolDef {
        id: SymbolId::Cat,
        name: "Cat",
        emoji: "🐱",
        value: 1,
        rarity: Rarity::Common,
        effect: Some(EffectKind::AdjacentSymbol { target: SymbolId::Milk, per: 3 }),
        effect_description: Some("Gives 3 more coins for each adjacent Milk"),
    },
    SymbolDef {
        id: SymbolId::Bee,
        name: "Bee",
        emoji: "🐝",
        value: 1,
        rarity: Rarity::Uncommon,
        effect: Some(EffectKind::AdjacentSymbol { target: SymbolId::Flower, per: 2 }),
        effect_description: Some("Gives 2 more coins for each adjacent Flower"),
    },
    SymbolDef {
        id: SymbolId::Miner,
        name: "Miner",
        emoji: "⛏️",
        value: 1,
        rarity: Rarity::Uncommon,
        effect: Some(EffectKind::AdjacentSymbol { target: SymbolId::Ore, per: 2 }),
        effect_description: Some("Gives 2 more coins for each adjacent Ore"),
    },
    SymbolDef {
        id: SymbolId::Clover,
        name: "Clover",
        emoji: "🍀",
        value: 1,
        rarity: Rarity::Uncommon,
        effect: Some(EffectKind::Corner { bonus: 3 }),
        effect_description: Some("Gives 3 more coins when it lands in a corner"),
    },
    SymbolDef {
        id: SymbolId::VoidStone,
        name: "Void Stone",
        emoji: "🕳️",
        value: 0,
        rarity: Rarity::Uncommon,
        effect: Some(EffectKind::AdjacentEmpty { per: 1 }),
        effect_description: Some("Gives 1 coin for each adjacent empty cell"),
    },
    SymbolDef {
        id: SymbolId::Sun,
        name: "Sun",
        emoji: "☀️",
        value: 3,
        rarity: Rarity::Rare,
        effect: Some(EffectKind::AdjacentAny { per: 1 }),
        effect_description: Some("Gives 1 more coin for each adjacent symbol"),
    },
    SymbolDef {
        id: SymbolId::Diamond,
        name: "Diamond",
        emoji: "💎",
        value: 5,
        rarity: Rarity::Rare,
        effect: Some(EffectKind::SameKindAnywhere { per: 1 }),
        effect_description: Some("Gives 1 more coin for each other Diamond on the grid"),
    },
];

/// 起始符號組
pub fn starting_symbols() -> Vec<SymbolId> {
    vec![
        SymbolId::Coin,
        SymbolId::Cherry,
        SymbolId::Pearl,
        SymbolId::Flower,
        SymbolId::Cat,
    ]
}

// ============================================================================
// 單元測試
// ============================================================================
