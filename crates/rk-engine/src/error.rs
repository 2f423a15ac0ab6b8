//! Error types for the roll engine.

use crate::sheet::ResourceKind;

/// Errors that can occur while preparing or running a roll.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The modifier prompt was dismissed. Nothing was spent or rolled.
    #[error("roll cancelled")]
    UserCancelled,

    /// A resource counter was already at zero when a spend was attempted.
    #[error("no {0} remaining")]
    InsufficientResource(ResourceKind),

    /// A step needed an actor and none was supplied.
    #[error("no actor available for this roll")]
    NoActorResolved,

    /// The roll happened but could not be shown.
    #[error("failed to present roll: {0}")]
    PresentationFailure(String),

    /// A compact dice notation string could not be parsed.
    #[error("invalid dice notation: {0}")]
    InvalidNotation(String),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
