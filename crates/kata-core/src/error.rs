use kata_model::ValueId;
use thiserror::Error;

/// Errors raised by the cascade controller.
///
/// Every operation that returns one of these leaves the controller state
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CascadeError {
    /// The step number has no live selector.
    #[error("no selector at step {step} (active steps: {len})")]
    InvalidStep { step: usize, len: usize },

    /// The value is not offered by the selector at this step.
    #[error("{value} is not a candidate at step {step}")]
    NotACandidate { step: usize, value: ValueId },

    /// The selector at this step has no sentinel option to pick.
    #[error("step {step} has no unselected option")]
    SentinelNotOffered { step: usize },

    /// An auto-cascade run reached a value it had already selected.
    #[error("cyclic transition: {value} revisited at step {step} during auto-cascade")]
    CyclicTransition { value: ValueId, step: usize },

    /// Every step already holds a value, so there is nowhere to apply another.
    #[error("no open step to receive {value}")]
    NoOpenStep { value: ValueId },
}

pub type Result<T> = std::result::Result<T, CascadeError>;
