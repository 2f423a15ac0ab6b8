//! Compiling dice pools into executable roll formulas.
//!
//! Every entry point (structured rolls and compact notation) goes through
//! [`compile`], so the formula text always means the same thing.

use serde::{Deserialize, Serialize};

use super::D10;
use super::pool::DicePool;

/// Options that change how individual dice behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollFlags {
    /// Reroll any die showing 1, exactly once.
    pub reroll_low_once: bool,
    /// Never explode, whatever the threshold.
    pub no_explode: bool,
    /// Dice at or above this face explode.
    pub explode_threshold: u32,
}

impl Default for RollFlags {
    fn default() -> Self {
        Self {
            reroll_low_once: false,
            no_explode: false,
            explode_threshold: D10,
        }
    }
}

impl RollFlags {
    /// Set the reroll-low-once flag.
    pub fn with_reroll_low_once(mut self, enabled: bool) -> Self {
        self.reroll_low_once = enabled;
        self
    }

    /// Set the no-explode flag.
    pub fn with_no_explode(mut self, enabled: bool) -> Self {
        self.no_explode = enabled;
        self
    }
}

/// An executable roll expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// The normalized pool.
    pub pool: DicePool,
    /// Reroll 1s once before anything else.
    pub reroll_low_once: bool,
    /// Explode at this face or higher, or never.
    pub explode_on: Option<u32>,
}

/// Compile a pool and its flags into a formula.
pub fn compile(pool: DicePool, flags: RollFlags) -> Formula {
    let explode_on = if flags.no_explode {
        None
    } else {
        Some(flags.explode_threshold.clamp(2, D10))
    };
    Formula {
        pool,
        reroll_low_once: flags.reroll_low_once,
        explode_on,
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{D10}", self.pool.roll)?;
        if self.reroll_low_once {
            write!(f, "r1")?;
        }
        write!(f, "k{}", self.pool.keep)?;
        if let Some(threshold) = self.explode_on {
            write!(f, "x{threshold}")?;
        }
        if self.pool.bonus < 0 {
            write!(f, "{}", self.pool.bonus)
        } else {
            write!(f, "+{}", self.pool.bonus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_explodes_on_ten() {
        let formula = compile(DicePool::new(5, 3, 0), RollFlags::default());
        assert_eq!(formula.explode_on, Some(10));
        assert_eq!(formula.to_string(), "5d10k3x10+0");
    }

    #[test]
    fn reroll_low_once_changes_only_reroll_clause() {
        let pool = DicePool::new(5, 3, 0);
        let plain = compile(pool, RollFlags::default());
        let emphasis = compile(pool, RollFlags::default().with_reroll_low_once(true));
        assert_eq!(emphasis.to_string(), "5d10r1k3x10+0");
        assert_eq!(plain.pool, emphasis.pool);
        assert_eq!(plain.explode_on, emphasis.explode_on);
    }

    #[test]
    fn no_explode_overrides_threshold() {
        let flags = RollFlags {
            explode_threshold: 9,
            ..RollFlags::default()
        }
        .with_no_explode(true)
        .with_reroll_low_once(true);
        let formula = compile(DicePool::new(4, 2, -1), flags);
        assert_eq!(formula.explode_on, None);
        assert_eq!(formula.to_string(), "4d10r1k2-1");
    }

    #[test]
    fn custom_threshold() {
        let flags = RollFlags {
            explode_threshold: 9,
            ..RollFlags::default()
        };
        assert_eq!(
            compile(DicePool::new(6, 3, 2), flags).to_string(),
            "6d10k3x9+2"
        );
    }
}
