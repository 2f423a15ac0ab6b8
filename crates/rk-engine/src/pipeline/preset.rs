//! Descriptors for the five roll kinds.
//!
//! These are the only place that says which bonus sources, prompt fields
//! and labels apply to which kind of roll.

use super::kind::{PromptFields, RollKind, RollKindSpec, SubjectKey};
use crate::sheet::BonusTable;

/// Skill roll: (trait + rank) keep trait.
///
/// Reads the skill and trait bonus tables, honours stances and emphasis,
/// and may be flagged as an attack.
pub fn skill() -> RollKindSpec {
    RollKindSpec {
        kind: RollKind::Skill,
        fields: PromptFields {
            penalty: true,
            reroll_low: true,
            modifiers: true,
            primary_resource: true,
            elemental_resource: false,
            target: true,
        },
        tables: &[
            (BonusTable::Skills, SubjectKey::Subject),
            (BonusTable::Traits, SubjectKey::Trait),
        ],
        stance_applies: true,
        attack_label: true,
    }
}

/// Ring test: ring keep ring. The only kind that can spend spell slots.
pub fn ring() -> RollKindSpec {
    RollKindSpec {
        kind: RollKind::Ring,
        fields: PromptFields {
            penalty: true,
            reroll_low: false,
            modifiers: true,
            primary_resource: true,
            elemental_resource: true,
            target: true,
        },
        tables: &[(BonusTable::Rings, SubjectKey::Subject)],
        stance_applies: true,
        attack_label: false,
    }
}

/// Trait test: trait keep trait.
pub fn trait_test() -> RollKindSpec {
    RollKindSpec {
        kind: RollKind::Trait,
        fields: PromptFields {
            penalty: true,
            reroll_low: false,
            modifiers: true,
            primary_resource: true,
            elemental_resource: false,
            target: true,
        },
        tables: &[(BonusTable::Traits, SubjectKey::Subject)],
        stance_applies: true,
        attack_label: false,
    }
}

/// Weapon damage: no target number, no resources, modifiers only.
pub fn weapon() -> RollKindSpec {
    RollKindSpec {
        kind: RollKind::Weapon,
        fields: PromptFields {
            modifiers: true,
            ..PromptFields::default()
        },
        tables: &[],
        stance_applies: false,
        attack_label: false,
    }
}

/// Generic action with an explicit pool, usually for NPCs.
pub fn generic() -> RollKindSpec {
    RollKindSpec {
        kind: RollKind::Generic,
        fields: PromptFields {
            penalty: false,
            reroll_low: true,
            modifiers: true,
            primary_resource: true,
            elemental_resource: false,
            target: true,
        },
        tables: &[],
        stance_applies: true,
        attack_label: true,
    }
}
