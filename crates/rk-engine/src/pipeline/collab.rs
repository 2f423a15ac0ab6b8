//! Host-side collaborators: the modifier prompt and the presenter.

use serde::{Deserialize, Serialize};

use super::kind::PromptFields;
use crate::bonus::BonusSet;
use crate::resolution::{OutcomeLabel, RollOutcome};

/// Values the modifier prompt starts from and hands back.
///
/// Fields the roll kind does not surface are ignored on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptAnswers {
    /// Extra roll/keep/total modifiers.
    pub modifiers: BonusSet,
    /// Add the penalty to the target number.
    pub apply_penalty: bool,
    /// Reroll 1s once.
    pub reroll_low: bool,
    /// Spend a void point.
    pub spend_primary: bool,
    /// Spend a spell slot.
    pub spend_elemental: bool,
    /// Target number, 0 for none.
    pub target_number: u32,
    /// Declared raises.
    pub raises: u32,
}

/// What the modifier prompt returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// The user confirmed these values.
    Submitted(PromptAnswers),
    /// The user dismissed the prompt.
    Cancelled,
}

/// Asks the user for last-moment modifiers.
pub trait ModifierPrompt {
    /// Show the fields in `fields`, pre-filled from `defaults`.
    fn ask(
        &mut self,
        label: &str,
        fields: &PromptFields,
        defaults: &PromptAnswers,
    ) -> PromptResponse;
}

/// What the presenter receives for a finished roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Heading for the roll.
    pub label: String,
    /// Dice as rolled, e.g. `[10+4, 7, (3)] +2 = 23`.
    pub rendered_dice: String,
    /// Numeric outcome.
    pub outcome: RollOutcome,
    /// Success, failure, miss or plain roll.
    pub outcome_label: OutcomeLabel,
    /// Informational notes (spent spell slots, unskilled, ...).
    pub tags: Vec<String>,
}

/// Displays finished rolls and user-facing warnings.
pub trait Presenter {
    /// Durably display a roll.
    fn present(&mut self, presentation: &Presentation) -> Result<(), String>;

    /// Show a warning to the user.
    fn warn(&mut self, message: &str);
}

/// A prompt that accepts the defaults without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl ModifierPrompt for AcceptDefaults {
    fn ask(
        &mut self,
        _label: &str,
        _fields: &PromptFields,
        defaults: &PromptAnswers,
    ) -> PromptResponse {
        PromptResponse::Submitted(*defaults)
    }
}
