//! Bonus aggregation.
//!
//! Every roll collects its additive modifiers into one ordered
//! [`BonusLedger`]: actor bonus tables first, then the active stance, then
//! ad hoc modifiers from the prompt, then anything a resource spend folds in.
//! Sources are summed, never multiplied, so the order only matters for
//! reporting.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::pipeline::{RollKindSpec, RollRequest};
use crate::sheet::{ActorData, BonusTable, ResourceKind, Stance};

/// An additive contribution to a roll: extra rolled dice, kept dice and flat total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSet {
    /// Extra rolled dice.
    pub roll: i32,
    /// Extra kept dice.
    pub keep: i32,
    /// Flat bonus to the total.
    pub total: i32,
}

impl BonusSet {
    /// No bonus at all.
    pub const ZERO: Self = Self {
        roll: 0,
        keep: 0,
        total: 0,
    };

    /// Create a bonus set.
    pub const fn new(roll: i32, keep: i32, total: i32) -> Self {
        Self { roll, keep, total }
    }

    /// Returns true if this set changes nothing.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for BonusSet {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            roll: self.roll.saturating_add(rhs.roll),
            keep: self.keep.saturating_add(rhs.keep),
            total: self.total.saturating_add(rhs.total),
        }
    }
}

impl AddAssign for BonusSet {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for BonusSet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for BonusSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}k{:+} {:+}", self.roll, self.keep, self.total)
    }
}

/// Where a contribution came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusSource {
    /// An entry in one of the actor's bonus tables.
    Table {
        /// Which table.
        table: BonusTable,
        /// The subject key looked up.
        key: String,
    },
    /// The first active stance.
    Stance(Stance),
    /// Modifiers entered for this roll only.
    AdHoc,
    /// A spent resource.
    Resource(ResourceKind),
}

impl std::fmt::Display for BonusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table { table, key } => write!(f, "{table} bonus ({key})"),
            Self::Stance(stance) => write!(f, "{stance} stance"),
            Self::AdHoc => write!(f, "modifiers"),
            Self::Resource(kind) => write!(f, "{kind}"),
        }
    }
}

/// One labelled entry in a [`BonusLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Where the bonus came from.
    pub source: BonusSource,
    /// The bonus itself.
    pub bonus: BonusSet,
}

/// An ordered list of bonus contributions for a single roll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BonusLedger {
    contributions: Vec<Contribution>,
}

impl BonusLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contribution. Zero contributions are skipped.
    pub fn push(&mut self, source: BonusSource, bonus: BonusSet) {
        if !bonus.is_zero() {
            self.contributions.push(Contribution { source, bonus });
        }
    }

    /// The contributions in the order they were added.
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    /// Sum of every contribution.
    pub fn total(&self) -> BonusSet {
        self.contributions.iter().map(|c| c.bonus).sum()
    }
}

/// The roll bonus a stance grants, if any.
///
/// Full Attack helps attack rolls only. Center helps any roll except damage.
/// The remaining stances grant nothing to the roll itself.
pub fn stance_bonus(stance: Stance, attack: bool, damage: bool) -> Option<BonusSet> {
    match stance {
        Stance::FullAttack if attack => Some(BonusSet::new(2, 1, 0)),
        Stance::Center if !damage => Some(BonusSet::new(1, 1, 0)),
        _ => None,
    }
}

/// Collect table, stance and ad hoc bonuses for a roll, in that order.
///
/// Which tables and whether stances apply is decided by the roll kind.
/// Only the first stance on the actor is considered, even if it grants
/// nothing to this roll.
pub fn gather(
    actor: Option<&dyn ActorData>,
    spec: &RollKindSpec,
    request: &RollRequest,
    ad_hoc: BonusSet,
) -> BonusLedger {
    let mut ledger = BonusLedger::new();

    if let Some(actor) = actor {
        for (table, key) in spec.table_lookups(request) {
            if let Some(bonus) = actor.bonus(table, &key) {
                ledger.push(BonusSource::Table { table, key }, bonus);
            }
        }

        let damage = !spec.fields.target;
        let stance = actor.stances().first().filter(|_| spec.stance_applies);
        if let Some(&stance) = stance {
            if let Some(bonus) = stance_bonus(stance, request.attack, damage) {
                ledger.push(BonusSource::Stance(stance), bonus);
            }
        }
    }

    ledger.push(BonusSource::AdHoc, ad_hoc);
    ledger
}
