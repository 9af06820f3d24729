//! Error types for the wheel engine.
//!
//! Only structurally invalid input is an error. Numerical edge cases at the
//! sampling and angle-recovery boundaries resolve to a fallback index instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    #[error("wheel needs at least 2 options, got {0}")]
    TooFewOptions(usize),

    #[error("total weight must be positive, got {0}")]
    NonPositiveTotalWeight(f64),

    #[error("option {id:?} has invalid weight {weight}")]
    InvalidWeight { id: String, weight: f64 },

    #[error("duplicate option id {0:?}")]
    DuplicateId(String),

    #[error("winning index {index} out of range for {count} options")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("a spin is already in progress")]
    SpinInProgress,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl WheelError {
    /// True for errors caused by a malformed option list or index, as opposed
    /// to calling into the wheel at the wrong time.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            WheelError::TooFewOptions(_)
                | WheelError::NonPositiveTotalWeight(_)
                | WheelError::InvalidWeight { .. }
                | WheelError::DuplicateId(_)
                | WheelError::IndexOutOfRange { .. }
        )
    }
}

/// Failures of the external option generator. Never reach the spin flow.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Request(String),

    #[error("malformed generator response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generator returned {0} usable labels")]
    TooFewLabels(usize),
}
