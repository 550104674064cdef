//! 遊戲常量定義

// ============================================================================
// 盤面常量
// ============================================================================

pub const GRID_SIZE: usize = 5;                     // 盤面邊長
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE; // 25 格
pub const MAX_PLACED: usize = 20;                   // 每次最多放 20 個符號（至少留 5 格空位）

// ============================================================================
// 經濟常量
// ============================================================================

pub const SPIN_COST: i64 = 1;            // 每次轉動花費（買得起才扣）
pub const STARTING_COINS: i64 = 0;       // 起始金幣
pub const SHOP_OFFER_COUNT: usize = 3;   // 商店每次提供的符號數
pub const MAX_SIMULATION_SPINS: u32 = 500; // 模擬器單局最大轉動次數

/// 預設房租表：(rent, turns)，每層一項
pub const DEFAULT_RENT_SCHEDULE: [(i64, u32); 14] = [
    (25, 4),
    (50, 4),
    (100, 5),
    (150, 5),
    (225, 6),
    (300, 6),
    (350, 7),
    (425, 7),
    (575, 8),
    (625, 8),
    (675, 9),
    (777, 9),
    (1000, 9),
    (1000, 9),
];

// ============================================================================
// 存檔常量
// ============================================================================

pub const SAVE_KEY: &str = "landlordLuckSave";

// ============================================================================
// Action 常量
// ============================================================================

pub const ACTION_ADD_COINS: &str = "ADD_COINS";
pub const ACTION_START_SPIN: &str = "START_SPIN";
pub const ACTION_STOP_SPIN: &str = "STOP_SPIN";
pub const ACTION_UPDATE_GRID: &str = "UPDATE_GRID";
pub const ACTION_ADD_SYMBOL: &str = "ADD_SYMBOL";
pub const ACTION_DECREASE_TURNS: &str = "DECREASE_TURNS";
pub const ACTION_PAY_RENT: &str = "PAY_RENT";
pub const ACTION_TOGGLE_SOUND: &str = "TOGGLE_SOUND";
pub const ACTION_TOGGLE_SHOP: &str = "TOGGLE_SHOP";
pub const ACTION_CLOSE_SHOP: &str = "CLOSE_SHOP";
pub const ACTION_RESET_GAME: &str = "RESET_GAME";
pub const ACTION_LOAD_GAME: &str = "LOAD_GAME";

pub const ACTION_TYPE_COUNT: usize = 12;

/// 依序排列的 action 標籤（action mask 的索引順序）
pub const ACTION_TAGS: [&str; ACTION_TYPE_COUNT] = [
    ACTION_ADD_COINS,
    ACTION_START_SPIN,
    ACTION_STOP_SPIN,
    ACTION_UPDATE_GRID,
    ACTION_ADD_SYMBOL,
    ACTION_DECREASE_TURNS,
    ACTION_PAY_RENT,
    ACTION_TOGGLE_SOUND,
    ACTION_TOGGLE_SHOP,
    ACTION_CLOSE_SHOP,
    ACTION_RESET_GAME,
    ACTION_LOAD_GAME,
];
