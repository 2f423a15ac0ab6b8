//! Executing formulas and the dice they produce.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::D10;
use super::formula::Formula;

/// A source of d10 faces.
pub trait Roller {
    /// Roll one d10 (1 to 10).
    fn roll_d10(&mut self) -> u32;
}

impl Roller for StdRng {
    fn roll_d10(&mut self) -> u32 {
        self.random_range(1..=D10)
    }
}

/// One die of an executed roll, including every explosion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Faces that count toward this die, in the order rolled.
    pub faces: Vec<u32>,
    /// The face discarded by a reroll-low-once, if any.
    pub rerolled: Option<u32>,
    /// Whether this die is among the kept dice.
    pub kept: bool,
}

impl DieResult {
    /// Sum of all counted faces.
    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }

    /// Returns true if this die exploded at least once.
    pub fn exploded(&self) -> bool {
        self.faces.len() > 1
    }
}

impl std::fmt::Display for DieResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        let faces = faces.join("+");
        if self.kept {
            write!(f, "{faces}")
        } else {
            write!(f, "({faces})")
        }
    }
}

/// The outcome of executing a formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolledDice {
    /// The formula that was executed.
    pub formula: Formula,
    /// Every die rolled, highest total first.
    pub dice: Vec<DieResult>,
    /// Kept dice plus the flat bonus.
    pub total: i32,
}

impl RolledDice {
    /// Iterate over the kept dice.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| d.kept)
    }
}

impl std::fmt::Display for RolledDice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dice: Vec<String> = self.dice.iter().map(DieResult::to_string).collect();
        write!(f, "[{}]", dice.join(", "))?;
        match self.formula.pool.bonus {
            0 => {}
            b if b > 0 => write!(f, " +{b}")?,
            b => write!(f, " {b}")?,
        }
        write!(f, " = {}", self.total)
    }
}

/// Roll the dice described by `formula`.
///
/// Each die is rerolled once on a 1 when the formula asks for it, then keeps
/// exploding while it lands at or above the explode threshold. The highest
/// `keep` die totals are kept.
pub fn execute(formula: &Formula, roller: &mut dyn Roller) -> RolledDice {
    let mut dice: Vec<DieResult> = (0..formula.pool.roll)
        .map(|_| roll_one(formula, roller))
        .collect();

    dice.sort_by_key(|d| std::cmp::Reverse(d.total()));
    let keep = formula.pool.keep as usize;
    for die in dice.iter_mut().take(keep) {
        die.kept = true;
    }

    let kept_sum: u32 = dice.iter().filter(|d| d.kept).map(DieResult::total).sum();
    let total = i32::try_from(kept_sum)
        .unwrap_or(i32::MAX)
        .saturating_add(formula.pool.bonus);

    RolledDice {
        formula: *formula,
        dice,
        total,
    }
}

fn roll_one(formula: &Formula, roller: &mut dyn Roller) -> DieResult {
    let mut face = roller.roll_d10();
    let mut rerolled = None;
    if formula.reroll_low_once && face == 1 {
        rerolled = Some(face);
        face = roller.roll_d10();
    }

    let mut faces = vec![face];
    if let Some(threshold) = formula.explode_on {
        while face >= threshold {
            face = roller.roll_d10();
            faces.push(face);
        }
    }

    DieResult {
        faces,
        rerolled,
        kept: false,
    }
}
