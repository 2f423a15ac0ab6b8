//! Engine configuration.
//!
//! Settings are read through [`ConfigProvider`] at the moment they are
//! needed, never cached, so a host can change them between rolls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::RollKind;

/// Source of the settings the engine consults while rolling.
pub trait ConfigProvider {
    /// Whether the Ten Dice Rule house-rule variant is enabled.
    fn house_rule(&self) -> bool;

    /// Whether the modifier prompt is shown by default for this kind of roll.
    fn show_prompt_by_default(&self, kind: RollKind) -> bool;
}

/// Plain configuration values, loadable from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ten Dice Rule house-rule variant.
    pub house_rule: bool,
    /// Per-kind prompt preference. Kinds not listed show the prompt.
    pub prompt_defaults: HashMap<RollKind, bool>,
}

impl EngineConfig {
    /// Enable or disable the Ten Dice Rule house-rule variant.
    pub fn with_house_rule(mut self, enabled: bool) -> Self {
        self.house_rule = enabled;
        self
    }

    /// Set whether the modifier prompt shows by default for a roll kind.
    pub fn with_prompt_default(mut self, kind: RollKind, show: bool) -> Self {
        self.prompt_defaults.insert(kind, show);
        self
    }
}

impl ConfigProvider for EngineConfig {
    fn house_rule(&self) -> bool {
        self.house_rule
    }

    fn show_prompt_by_default(&self, kind: RollKind) -> bool {
        self.prompt_defaults.get(&kind).copied().unwrap_or(true)
    }
}
