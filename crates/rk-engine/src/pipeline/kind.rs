//! Roll kinds and the descriptor each one runs the pipeline with.

use serde::{Deserialize, Serialize};

use super::preset;
use super::request::RollRequest;
use crate::sheet::BonusTable;

/// The kinds of action a roll can be made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollKind {
    /// Trait plus skill rank, keep trait.
    Skill,
    /// Elemental ring test.
    Ring,
    /// Attribute (trait) test.
    Trait,
    /// Weapon damage.
    Weapon,
    /// Generic action, typically an NPC's.
    Generic,
}

impl RollKind {
    /// All kinds.
    pub const ALL: [RollKind; 5] = [
        RollKind::Skill,
        RollKind::Ring,
        RollKind::Trait,
        RollKind::Weapon,
        RollKind::Generic,
    ];

    /// The descriptor this kind runs the pipeline with.
    pub fn spec(self) -> RollKindSpec {
        match self {
            Self::Skill => preset::skill(),
            Self::Ring => preset::ring(),
            Self::Trait => preset::trait_test(),
            Self::Weapon => preset::weapon(),
            Self::Generic => preset::generic(),
        }
    }
}

impl std::fmt::Display for RollKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Ring => write!(f, "ring"),
            Self::Trait => write!(f, "trait"),
            Self::Weapon => write!(f, "weapon"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Which optional fields the modifier prompt surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptFields {
    /// Toggle for adding the wound penalty to the TN.
    pub penalty: bool,
    /// Toggle for rerolling 1s once.
    pub reroll_low: bool,
    /// Numeric roll/keep/total modifiers.
    pub modifiers: bool,
    /// Toggle for spending a void point.
    pub primary_resource: bool,
    /// Toggle for spending a spell slot.
    pub elemental_resource: bool,
    /// Target number and raises.
    pub target: bool,
}

/// Which part of a request names the key for a bonus table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKey {
    /// The request's subject (skill, ring or trait name).
    Subject,
    /// The trait paired with a skill.
    Trait,
}

/// Everything that differs between roll kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollKindSpec {
    /// The kind described.
    pub kind: RollKind,
    /// Fields the modifier prompt may show.
    pub fields: PromptFields,
    /// Bonus tables read, in order.
    pub tables: &'static [(BonusTable, SubjectKey)],
    /// Whether the actor's stance can add to this roll.
    pub stance_applies: bool,
    /// Whether a failed attack of this kind reads as a miss.
    pub attack_label: bool,
}

impl RollKindSpec {
    /// The (table, key) pairs to look up for a request, in order.
    pub fn table_lookups(&self, request: &RollRequest) -> Vec<(BonusTable, String)> {
        self.tables
            .iter()
            .filter_map(|(table, key)| {
                let key = match key {
                    SubjectKey::Subject => Some(request.subject.clone()),
                    SubjectKey::Trait => request.trait_key.clone(),
                }?;
                Some((*table, key))
            })
            .collect()
    }
}
