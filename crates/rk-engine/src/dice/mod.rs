//! Dice pools, formulas, notation, and rolling.
//!
//! Every pool is made of d10s. A pool is normalized with the Ten Dice Rule,
//! compiled into a [`Formula`], and executed against a [`Roller`].

pub mod formula;
pub mod notation;
pub mod pool;
pub mod roll;

pub use formula::{Formula, RollFlags, compile};
pub use notation::{ParsedRoll, parse};
pub use pool::{DicePool, MAX_DICE, ten_dice_rule};
pub use roll::{DieResult, RolledDice, Roller, execute};

/// Faces on every die in a pool.
pub const D10: u32 = 10;
