//! Target numbers, raises, and outcome labels.

use serde::{Deserialize, Serialize};

/// How much each declared raise adds to the target number.
pub const RAISE_STEP: u32 = 5;

/// The result of comparing a roll total against its target number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Base TN plus raises plus any applied penalty.
    pub effective_tn: u32,
    /// Declared raises, counted only on a success.
    pub raises_achieved: u32,
    /// `None` when no target number was declared.
    pub success: Option<bool>,
}

/// Compare a roll total with a target number.
///
/// The effective TN is `base_tn + raises * 5`, plus `penalty` when
/// `apply_penalty` is set, saturating at `u32::MAX`. An effective TN of zero
/// means no TN was declared.
pub fn resolve(
    roll_total: i32,
    base_tn: u32,
    raises: u32,
    penalty: u32,
    apply_penalty: bool,
) -> Resolution {
    let penalty = if apply_penalty { penalty } else { 0 };
    let effective_tn = base_tn
        .saturating_add(raises.saturating_mul(RAISE_STEP))
        .saturating_add(penalty);

    if effective_tn == 0 {
        return Resolution {
            effective_tn,
            raises_achieved: 0,
            success: None,
        };
    }

    let success = i64::from(roll_total) >= i64::from(effective_tn);
    Resolution {
        effective_tn,
        raises_achieved: if success { raises } else { 0 },
        success: Some(success),
    }
}

/// Everything known about a finished roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The executed formula.
    pub formula: String,
    /// Kept dice plus bonus.
    pub total: i32,
    /// Target number after raises and penalty.
    pub effective_tn: u32,
    /// Raises achieved on a success.
    pub raises_achieved: u32,
    /// `None` when no target number was declared.
    pub success: Option<bool>,
}

impl RollOutcome {
    /// Combine a formula, its total and a resolution.
    pub fn new(formula: impl Into<String>, total: i32, resolution: Resolution) -> Self {
        Self {
            formula: formula.into(),
            total,
            effective_tn: resolution.effective_tn,
            raises_achieved: resolution.raises_achieved,
            success: resolution.success,
        }
    }

    /// The label shown for this outcome. Failed attacks read as a miss.
    pub fn label(&self, attack: bool) -> OutcomeLabel {
        match self.success {
            None => OutcomeLabel::Rolled,
            Some(true) => OutcomeLabel::Success,
            Some(false) if attack => OutcomeLabel::Missed,
            Some(false) => OutcomeLabel::Failure,
        }
    }
}

/// Display label for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeLabel {
    /// No target number; the total stands on its own.
    Rolled,
    /// Met or beat the target number.
    Success,
    /// Fell short of the target number.
    Failure,
    /// An attack that fell short.
    Missed,
}

impl std::fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rolled => write!(f, "Rolled"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Missed => write!(f, "Missed"),
        }
    }
}
