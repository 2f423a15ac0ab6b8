//! Finite per-actor resources and the spend guard.
//!
//! Counters never go below zero and are never refilled here. A spend is
//! committed before any die is rolled and is not reversed afterwards,
//! whatever the roll or its presentation does. Two spends racing on the
//! same actor are check-then-act, not atomic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ActorData;
use crate::bonus::BonusSet;

/// The five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// Air.
    Air,
    /// Earth.
    Earth,
    /// Fire.
    Fire,
    /// Water.
    Water,
    /// Void.
    Void,
}

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; 5] = [
        Element::Air,
        Element::Earth,
        Element::Fire,
        Element::Water,
        Element::Void,
    ];

    /// Lowercase key used in bonus tables.
    pub fn key(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Earth => "earth",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Void => "void",
        }
    }

    /// Parse an element from its name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.key().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Air => write!(f, "Air"),
            Self::Earth => write!(f, "Earth"),
            Self::Fire => write!(f, "Fire"),
            Self::Water => write!(f, "Water"),
            Self::Void => write!(f, "Void"),
        }
    }
}

/// Which counter a spend draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The shared luck resource (void points).
    Primary,
    /// An element's casting resource (spell slots).
    Elemental(Element),
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "void points"),
            Self::Elemental(element) => write!(f, "{element} spell slots"),
        }
    }
}

/// An actor's resource counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePool {
    /// Void points.
    pub primary: u32,
    /// Spell slots per element. Missing elements hold zero.
    pub elemental: BTreeMap<Element, u32>,
}

impl ResourcePool {
    /// Create a pool with `primary` void points and no spell slots.
    pub fn new(primary: u32) -> Self {
        Self {
            primary,
            elemental: BTreeMap::new(),
        }
    }

    /// Set the spell slots for one element.
    pub fn with_slots(mut self, element: Element, slots: u32) -> Self {
        self.elemental.insert(element, slots);
        self
    }

    /// Current value of a counter.
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Primary => self.primary,
            ResourceKind::Elemental(element) => {
                self.elemental.get(&element).copied().unwrap_or(0)
            }
        }
    }

    /// Overwrite a counter.
    pub fn set(&mut self, kind: ResourceKind, value: u32) {
        match kind {
            ResourceKind::Primary => self.primary = value,
            ResourceKind::Elemental(element) => {
                self.elemental.insert(element, value);
            }
        }
    }
}

/// The result of a spend attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendOutcome {
    /// The counter was decremented by one.
    Committed {
        /// Which counter was spent.
        kind: ResourceKind,
        /// What is left after the spend.
        remaining: u32,
        /// Bonus folded into the roll (+1k1 for void points).
        bonus: BonusSet,
        /// Informational tag for the roll's presentation.
        tag: Option<String>,
    },
    /// The counter was at zero. Nothing changed.
    Refused(ResourceKind),
}

impl SpendOutcome {
    /// Returns true if the spend was committed.
    pub fn ok(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Bonus a spent void point adds to the roll.
pub const PRIMARY_SPEND_BONUS: BonusSet = BonusSet::new(1, 1, 0);

/// Spend one unit of `kind` from the actor.
///
/// A counter at zero refuses the spend and is left untouched.
pub fn spend(actor: &mut dyn ActorData, kind: ResourceKind) -> SpendOutcome {
    let balance = actor.resource(kind);
    if balance == 0 {
        return SpendOutcome::Refused(kind);
    }

    let remaining = balance - 1;
    actor.set_resource(kind, remaining);
    tracing::info!(actor = actor.name(), %kind, remaining, "resource spent");

    match kind {
        ResourceKind::Primary => SpendOutcome::Committed {
            kind,
            remaining,
            bonus: PRIMARY_SPEND_BONUS,
            tag: None,
        },
        ResourceKind::Elemental(element) => SpendOutcome::Committed {
            kind,
            remaining,
            bonus: BonusSet::ZERO,
            tag: Some(format!("{element} spell slot spent")),
        },
    }
}
