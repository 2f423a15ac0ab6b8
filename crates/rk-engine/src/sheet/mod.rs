//! Actors: bonus tables, stances, wound penalties and resources.
//!
//! The engine only touches actor state through [`ActorData`], which exposes
//! plain reads plus single-value writes to the resource counters. [`Actor`]
//! is the serde-backed implementation used by the CLI and the tests.

pub mod resource;

pub use resource::{Element, ResourceKind, ResourcePool, SpendOutcome, spend};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bonus::BonusSet;

/// Which of an actor's bonus tables a lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusTable {
    /// Per-trait bonuses (agility, strength, ...).
    Traits,
    /// Per-skill bonuses (kenjutsu, etiquette, ...).
    Skills,
    /// Per-ring bonuses (air, earth, fire, water, void).
    Rings,
}

impl std::fmt::Display for BonusTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Traits => write!(f, "trait"),
            Self::Skills => write!(f, "skill"),
            Self::Rings => write!(f, "ring"),
        }
    }
}

/// A combat stance marker on an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Attack stance.
    Attack,
    /// Full Attack stance.
    FullAttack,
    /// Defense stance.
    Defense,
    /// Full Defense stance.
    FullDefense,
    /// Center stance.
    Center,
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::FullAttack => write!(f, "Full Attack"),
            Self::Defense => write!(f, "Defense"),
            Self::FullDefense => write!(f, "Full Defense"),
            Self::Center => write!(f, "Center"),
        }
    }
}

/// Read access to an actor's numbers and write access to its resources.
pub trait ActorData {
    /// Display name.
    fn name(&self) -> &str;

    /// The bonus stored under `key` in `table`, if any.
    fn bonus(&self, table: BonusTable, key: &str) -> Option<BonusSet>;

    /// Active stance markers, in the order they were applied.
    fn stances(&self) -> &[Stance];

    /// Current wound penalty, added to target numbers when requested.
    fn wound_penalty(&self) -> u32;

    /// Current value of a resource counter.
    fn resource(&self, kind: ResourceKind) -> u32;

    /// Overwrite a resource counter.
    fn set_resource(&mut self, kind: ResourceKind, value: u32);
}

/// A character or NPC as stored by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Bonus tables keyed by subject (lowercase).
    pub bonuses: HashMap<BonusTable, HashMap<String, BonusSet>>,
    /// Active stance markers.
    pub stances: Vec<Stance>,
    /// Current wound penalty.
    pub wound_penalty: u32,
    /// Void points and spell slots.
    pub resources: ResourcePool,
}

impl Actor {
    /// Create an actor with empty tables and no resources.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store a bonus under `key` in `table`, replacing any previous entry.
    pub fn set_bonus(&mut self, table: BonusTable, key: &str, bonus: BonusSet) {
        self.bonuses
            .entry(table)
            .or_default()
            .insert(key.to_lowercase(), bonus);
    }

    /// Set the starting resources.
    pub fn with_resources(mut self, resources: ResourcePool) -> Self {
        self.resources = resources;
        self
    }
}

impl ActorData for Actor {
    fn name(&self) -> &str {
        &self.name
    }

    fn bonus(&self, table: BonusTable, key: &str) -> Option<BonusSet> {
        self.bonuses.get(&table)?.get(&key.to_lowercase()).copied()
    }

    fn stances(&self) -> &[Stance] {
        &self.stances
    }

    fn wound_penalty(&self) -> u32 {
        self.wound_penalty
    }

    fn resource(&self, kind: ResourceKind) -> u32 {
        self.resources.get(kind)
    }

    fn set_resource(&mut self, kind: ResourceKind, value: u32) {
        self.resources.set(kind, value);
    }
}
