use thiserror::Error;

use crate::types::ApprovalStep;

/// faults that stop an approval run.
///
/// a loan that fails a step is not an error: it comes back as a rejected
/// `LoanRecord` with the failing steps' reasons. these variants cover the
/// cases where a decision could not be made at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("step {step} could not be evaluated: {message}")]
    EvaluationFault {
        step: ApprovalStep,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl ApprovalError {
    pub fn evaluation_fault(step: ApprovalStep, message: impl Into<String>) -> Self {
        ApprovalError::EvaluationFault {
            step,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApprovalError>;
