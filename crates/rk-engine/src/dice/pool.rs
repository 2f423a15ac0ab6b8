//! Roll-and-keep dice pools and the Ten Dice Rule.

use serde::{Deserialize, Serialize};

use crate::config::ConfigProvider;

/// The most dice a normalized pool may roll or keep.
pub const MAX_DICE: u32 = 10;

/// A roll-and-keep pool: roll `roll` d10s, keep the `keep` highest, add `bonus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DicePool {
    /// Number of dice rolled.
    pub roll: u32,
    /// Number of highest dice kept.
    pub keep: u32,
    /// Flat bonus added to the kept dice. May be negative.
    pub bonus: i32,
}

impl DicePool {
    /// Create a pool without normalizing it.
    pub fn new(roll: u32, keep: u32, bonus: i32) -> Self {
        Self { roll, keep, bonus }
    }

    /// Build a pool from signed totals.
    ///
    /// Dice counts are floored at zero and, like the bonus, saturate at the
    /// limits of their types.
    pub fn from_totals(roll: i64, keep: i64, bonus: i64) -> Self {
        let count = |n: i64| u32::try_from(n.max(0)).unwrap_or(u32::MAX);
        Self {
            roll: count(roll),
            keep: count(keep),
            bonus: i32::try_from(bonus).unwrap_or(if bonus < 0 { i32::MIN } else { i32::MAX }),
        }
    }

    /// Apply the Ten Dice Rule, reading the house-rule flag from `config` now.
    pub fn normalize(self, config: &dyn ConfigProvider) -> Self {
        ten_dice_rule(self.roll, self.keep, self.bonus, config.house_rule())
    }

    /// Returns true if both dice counts are within the Ten Dice Rule caps.
    pub fn is_normalized(&self) -> bool {
        self.roll <= MAX_DICE && self.keep <= MAX_DICE
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}k{}", self.roll, self.keep)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// Cap a pool at ten rolled and ten kept dice.
///
/// Every three rolled dice beyond ten become two kept dice. Kept dice beyond
/// ten are removed two at a time as rises. With `house_rule` set, a pool that
/// lost kept dice to rises and ended below ten kept gains +2. Once the kept
/// dice are saturated, the leftover rolled dice are worth +2 each.
///
/// Total for every input; the bonus saturates at the `i32` limits. Normalizing
/// an already normalized pool returns it unchanged.
pub fn ten_dice_rule(roll: u32, keep: u32, bonus: i32, house_rule: bool) -> DicePool {
    let extras = roll.saturating_sub(MAX_DICE);
    let roll = roll.min(MAX_DICE);

    // 64 bits hold every conversion of a u32 pool exactly
    let mut keep = u64::from(keep) + u64::from(extras / 3) * 2;
    let extras = extras % 3;

    let limit = u64::from(MAX_DICE);
    let mut rises = 0;
    if keep > limit {
        rises = (keep - limit + 1) / 2;
        keep -= rises * 2;
    }

    let mut bonus = bonus;
    if house_rule && rises > 0 && keep < limit {
        bonus = bonus.saturating_add(2);
    }
    if keep == limit {
        bonus = bonus.saturating_add(extras as i32 * 2);
    }

    DicePool {
        roll,
        keep: u32::try_from(keep).unwrap_or(MAX_DICE),
        bonus,
    }
}
