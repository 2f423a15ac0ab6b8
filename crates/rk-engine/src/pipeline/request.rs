//! Per-invocation roll requests.

use super::kind::RollKind;
use crate::bonus::BonusSet;
use crate::dice::{RollFlags, notation};
use crate::error::EngineResult;
use crate::sheet::Element;

/// Everything the caller knows about a roll before the pipeline starts.
///
/// Built fresh for every action and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    /// Which pipeline descriptor to use.
    pub kind: RollKind,
    /// Heading shown with the result.
    pub label: String,
    /// Skill, ring, trait, weapon or action key.
    pub subject: String,
    /// Trait paired with a skill roll.
    pub trait_key: Option<String>,
    /// Element tested by a ring roll.
    pub element: Option<Element>,
    /// Dice rolled before bonuses.
    pub base_roll: u32,
    /// Dice kept before bonuses.
    pub base_keep: u32,
    /// Flat bonus before other bonuses.
    pub base_bonus: i32,
    /// Starting dice flags.
    pub flags: RollFlags,
    /// The actor has an emphasis in this skill.
    pub emphasis: bool,
    /// A skill roll at rank 0: never explodes, ignores emphasis.
    pub unskilled: bool,
    /// Declared target number, 0 for none.
    pub target_number: u32,
    /// Declared raises.
    pub raises: u32,
    /// Explicit penalty. When absent the actor's wound penalty is used.
    pub penalty: Option<u32>,
    /// Add the penalty to the target number.
    pub apply_penalty: bool,
    /// The roll is an attack; a failure reads as a miss.
    pub attack: bool,
    /// Spend a void point for +1k1.
    pub spend_primary: bool,
    /// Spend a spell slot of the ring's element.
    pub spend_elemental: bool,
    /// Roll/keep/total modifiers supplied up front.
    pub modifiers: BonusSet,
    /// Invert the configured prompt preference for this roll.
    pub toggle_prompt: bool,
}

impl RollRequest {
    fn base(kind: RollKind, label: String, subject: &str, roll: u32, keep: u32) -> Self {
        Self {
            kind,
            label,
            subject: subject.to_lowercase(),
            trait_key: None,
            element: None,
            base_roll: roll,
            base_keep: keep,
            base_bonus: 0,
            flags: RollFlags::default(),
            emphasis: false,
            unskilled: false,
            target_number: 0,
            raises: 0,
            penalty: None,
            apply_penalty: false,
            attack: false,
            spend_primary: false,
            spend_elemental: false,
            modifiers: BonusSet::ZERO,
            toggle_prompt: false,
        }
    }

    /// Skill roll: (trait + rank) keep trait. Rank 0 is unskilled.
    pub fn skill(skill: &str, trait_key: &str, trait_value: u32, rank: u32) -> Self {
        let mut request = Self::base(
            RollKind::Skill,
            format!("{} ({})", title_case(skill), title_case(trait_key)),
            skill,
            trait_value.saturating_add(rank),
            trait_value,
        );
        request.trait_key = Some(trait_key.to_lowercase());
        request.unskilled = rank == 0;
        request
    }

    /// Ring test: ring keep ring.
    pub fn ring(element: Element, value: u32) -> Self {
        let mut request = Self::base(
            RollKind::Ring,
            format!("{element} Ring"),
            element.key(),
            value,
            value,
        );
        request.element = Some(element);
        request
    }

    /// Trait test: trait keep trait.
    pub fn trait_roll(trait_key: &str, value: u32) -> Self {
        Self::base(
            RollKind::Trait,
            title_case(trait_key),
            trait_key,
            value,
            value,
        )
    }

    /// Weapon damage with a resolved pool.
    pub fn weapon(weapon: &str, roll: u32, keep: u32) -> Self {
        Self::base(
            RollKind::Weapon,
            format!("{} Damage", title_case(weapon)),
            weapon,
            roll,
            keep,
        )
    }

    /// Generic action with a resolved pool.
    pub fn generic(action: &str, roll: u32, keep: u32) -> Self {
        Self::base(RollKind::Generic, title_case(action), action, roll, keep)
    }

    /// Generic action decoded from compact notation such as `6k3+2e`.
    pub fn from_notation(action: &str, text: &str) -> EngineResult<Self> {
        let parsed = notation::parse(text)?;
        let mut request = Self::generic(action, parsed.pool.roll, parsed.pool.keep);
        request.base_bonus = parsed.pool.bonus;
        request.flags = parsed.flags;
        Ok(request)
    }

    /// Declare a target number and raises.
    pub fn with_target(mut self, target_number: u32, raises: u32) -> Self {
        self.target_number = target_number;
        self.raises = raises;
        self
    }

    /// Mark the roll as an attack.
    pub fn as_attack(mut self) -> Self {
        self.attack = true;
        self
    }

    /// Mark the skill as emphasised.
    pub fn with_emphasis(mut self) -> Self {
        self.emphasis = true;
        self
    }

    /// Add the wound penalty (or an explicit one) to the target number.
    pub fn with_penalty(mut self, penalty: Option<u32>) -> Self {
        self.apply_penalty = true;
        self.penalty = penalty;
        self
    }

    /// Spend a void point.
    pub fn spending_primary(mut self) -> Self {
        self.spend_primary = true;
        self
    }

    /// Spend a spell slot of the ring's element.
    pub fn spending_elemental(mut self) -> Self {
        self.spend_elemental = true;
        self
    }

    /// Apply roll/keep/total modifiers.
    pub fn with_modifiers(mut self, modifiers: BonusSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Invert the configured modifier-prompt preference.
    pub fn toggling_prompt(mut self) -> Self {
        self.toggle_prompt = true;
        self
    }
}

fn title_case(s: &str) -> String {
    s.split(|c: char| c == ' ' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DicePool;

    #[test]
    fn skill_pool_and_label() {
        let request = RollRequest::skill("kenjutsu", "agility", 3, 2);
        assert_eq!((request.base_roll, request.base_keep), (5, 3));
        assert_eq!(request.label, "Kenjutsu (Agility)");
        assert!(!request.unskilled);
        assert_eq!(request.trait_key.as_deref(), Some("agility"));
    }

    #[test]
    fn rank_zero_is_unskilled() {
        let request = RollRequest::skill("horsemanship", "agility", 2, 0);
        assert!(request.unskilled);
        assert_eq!((request.base_roll, request.base_keep), (2, 2));
    }

    #[test]
    fn huge_skill_pool_saturates() {
        let request = RollRequest::skill("kenjutsu", "agility", u32::MAX, 3);
        assert_eq!(request.base_roll, u32::MAX);
        assert_eq!(request.base_keep, u32::MAX);
    }

    #[test]
    fn ring_uses_element_key() {
        let request = RollRequest::ring(Element::Water, 4);
        assert_eq!(request.subject, "water");
        assert_eq!(request.label, "Water Ring");
        assert_eq!(request.element, Some(Element::Water));
    }

    #[test]
    fn notation_request_carries_pool_and_flags() {
        let request = RollRequest::from_notation("bandit strike", "7k3+2u").unwrap();
        assert_eq!(request.kind, RollKind::Generic);
        assert_eq!(
            DicePool::new(request.base_roll, request.base_keep, request.base_bonus),
            DicePool::new(7, 3, 2)
        );
        assert!(request.flags.no_explode);
        assert_eq!(request.label, "Bandit Strike");
    }

    #[test]
    fn bad_notation_is_an_error() {
        assert!(RollRequest::from_notation("x", "k").is_err());
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("full_attack strike"), "Full Attack Strike");
        assert_eq!(title_case(""), "");
    }
}
