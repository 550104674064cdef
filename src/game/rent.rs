//! 房租與樓層進度
//!
//! 每層樓有 `{rent, turns}`。轉滿 `turns` 次時結算房租：
//! 付不起就輸；付得起就扣款並上樓，超過最後一層即勝利。

use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_RENT_SCHEDULE;

/// 單層房租
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentEntry {
    pub rent: i64,
    pub turns: u32,
}

impl RentEntry {
    pub fn new(rent: i64, turns: u32) -> Self {
        Self { rent, turns }
    }
}

/// 房租表（一局遊戲內不變）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentSchedule(Vec<RentEntry>);

impl RentSchedule {
    pub fn new(entries: Vec<RentEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[RentEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, floor: usize) -> Option<&RentEntry> {
        self.0.get(floor)
    }

    /// floor 等於長度代表全部清完
    pub fn is_cleared(&self, floor: usize) -> bool {
        floor >= self.0.len()
    }
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self(
            DEFAULT_RENT_SCHEDULE
                .iter()
                .map(|&(rent, turns)| RentEntry::new(rent, turns))
                .collect(),
        )
    }
}

/// 進度狀態機
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Playing { floor: usize, turn: u32 },
    Lost,
    Won,
}

impl Progress {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Progress::Lost | Progress::Won)
    }
}

/// 房租結算結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentOutcome {
    pub success: bool,
    pub game_over: bool,
    pub victory: bool,
    pub message: String,
    pub new_floor: usize,
    pub new_rent: i64,
    pub new_turns: u32,
    pub remaining_coins: i64,
}

impl RentOutcome {
    pub fn progress(&self) -> Progress {
        match (self.success, self.victory) {
            (false, _) => Progress::Lost,
            (true, true) => Progress::Won,
            (true, false) => Progress::Playing {
                floor: self.new_floor,
                turn: 0,
            },
        }
    }
}

/// 結算 `floor` 層的房租
///
/// 以扣款前的金幣判斷，`coins == rent` 算付得起。
/// 先扣款再檢查是否超過最後一層。已經清完的 floor 重複結算只會再回報勝利。
pub fn pay_rent(coins: i64, floor: usize, schedule: &RentSchedule) -> RentOutcome {
    let Some(entry) = schedule.get(floor) else {
        return RentOutcome {
            success: true,
            game_over: true,
            victory: true,
            message: format!(
                "Congratulations! You've completed all {} floors and won the game!",
                schedule.len()
            ),
            new_floor: schedule.len(),
            new_rent: 0,
            new_turns: 0,
            remaining_coins: coins,
        };
    };

    if coins < entry.rent {
        return RentOutcome {
            success: false,
            game_over: true,
            victory: false,
            message: format!(
                "Game Over! You couldn't pay the rent of {} coins.",
                format_number(entry.rent)
            ),
            new_floor: floor,
            new_rent: entry.rent,
            new_turns: 0,
            remaining_coins: coins,
        };
    }

    let remaining_coins = coins - entry.rent;
    let new_floor = floor + 1;

    match schedule.get(new_floor) {
        None => RentOutcome {
            success: true,
            game_over: true,
            victory: true,
            message: format!(
                "Congratulations! You've completed all {} floors and won the game!",
                schedule.len()
            ),
            new_floor,
            new_rent: 0,
            new_turns: 0,
            remaining_coins,
        },
        Some(next) => RentOutcome {
            success: true,
            game_over: false,
            victory: false,
            message: format!(
                "You've advanced to floor {}! Next rent: {} coins in {} spins.",
                new_floor + 1,
                format_number(next.rent),
                next.turns
            ),
            new_floor,
            new_rent: next.rent,
            new_turns: next.turns,
            remaining_coins,
        },
    }
}

/// 千分位格式：1234567 -> "1,234,567"
pub fn format_number(num: i64) -> String {
    let digits = num.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if num < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn single_floor() -> RentSchedule {
        RentSchedule::new(vec![RentEntry::new(25, 4)])
    }

    #[test]
    fn test_default_schedule() {
        let schedule = RentSchedule::default();
        assert_eq!(schedule.len(), 14);
        assert_eq!(schedule.get(0), Some(&RentEntry::new(25, 4)));
        assert_eq!(schedule.get(13), Some(&RentEntry::new(1000, 9)));
        assert!(schedule.is_cleared(14));
        assert!(!schedule.is_cleared(13));
    }

    #[test]
    fn test_exact_rent_passes() {
        let schedule = RentSchedule::default();
        let outcome = pay_rent(25, 0, &schedule);
        assert!(outcome.success);
        assert!(!outcome.game_over);
        assert_eq!(outcome.new_floor, 1);
        assert_eq!(outcome.remaining_coins, 0);
        assert_eq!(outcome.new_rent, 50);
        assert_eq!(outcome.new_turns, 4);
        assert_eq!(outcome.progress(), Progress::Playing { floor: 1, turn: 0 });
    }

    #[test]
    fn test_one_short_loses() {
        let schedule = RentSchedule::default();
        let outcome = pay_rent(24, 0, &schedule);
        assert!(!outcome.success);
        assert!(outcome.game_over);
        assert_eq!(outcome.new_floor, 0);
        assert_eq!(outcome.remaining_coins, 24);
        assert_eq!(outcome.progress(), Progress::Lost);
    }

    #[test]
    fn test_last_floor_wins_after_deduction() {
        let outcome = pay_rent(30, 0, &single_floor());
        assert!(outcome.victory);
        assert_eq!(outcome.new_floor, 1);
        assert_eq!(outcome.remaining_coins, 5);
        assert_eq!(outcome.progress(), Progress::Won);
    }

    #[test]
    fn test_cleared_floor_is_idempotent() {
        let outcome = pay_rent(5, 1, &single_floor());
        assert!(outcome.victory);
        assert_eq!(outcome.new_floor, 1);
        assert_eq!(outcome.remaining_coins, 5);
    }

    #[test]
    fn test_messages() {
        let schedule = RentSchedule::default();
        assert_eq!(
            pay_rent(2000, 11, &schedule).message,
            "You've advanced to floor 13! Next rent: 1,000 coins in 9 spins."
        );
        assert_eq!(
            pay_rent(0, 12, &schedule).message,
            "Game Over! You couldn't pay the rent of 1,000 coins."
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(777), "777");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-25000), "-25,000");
    }

    #[test]
    fn test_schedule_serde_is_plain_list() {
        let json = serde_json::to_string(&single_floor()).unwrap();
        assert_eq!(json, r#"[{"rent":25,"turns":4}]"#);
    }
}
