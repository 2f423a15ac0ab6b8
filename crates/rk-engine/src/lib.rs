//! Roll-and-keep dice rules engine.
//!
//! Assembles a d10 pool from an actor's bonus tables, stance and ad hoc
//! modifiers, spends void points and spell slots, caps the pool with the
//! Ten Dice Rule, compiles and rolls it, and classifies the total against a
//! target number with raises. Every roll kind (skill, ring, trait, weapon,
//! generic) runs through the same [`RollPipeline`]; compact notation such as
//! `6k3+2e` enters through [`dice::parse`] and meets the same normalizer.

pub mod bonus;
pub mod config;
pub mod dice;
pub mod error;
pub mod pipeline;
pub mod resolution;
pub mod sheet;

pub use bonus::{BonusLedger, BonusSet, BonusSource};
pub use config::{ConfigProvider, EngineConfig};
pub use dice::{DicePool, Formula, RollFlags, RolledDice, Roller, compile, execute, ten_dice_rule};
pub use error::{EngineError, EngineResult};
pub use pipeline::{
    ModifierPrompt, Presentation, Presenter, PromptAnswers, PromptResponse, RollKind, RollPipeline,
    RollReport, RollRequest, RollStatus,
};
pub use resolution::{OutcomeLabel, Resolution, RollOutcome, resolve};
pub use sheet::{Actor, ActorData, Element, ResourceKind, ResourcePool, Stance, spend};
