use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a loan record
pub type LoanId = Uuid;

/// loan product families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanProduct {
    PrimePersonal,
    SubprimePersonal,
    Car,
}

/// the five steps of the approval workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStep {
    /// kyc and document checks
    VerifyDocuments,
    /// eligibility checks before review
    PreClearance,
    /// first reviewer
    MakerApproval,
    /// second reviewer
    CheckerApproval,
    /// checks after both reviewers signed off
    PostClearance,
}

impl ApprovalStep {
    /// evaluation order, never changes between runs
    pub const ORDER: [ApprovalStep; 5] = [
        ApprovalStep::VerifyDocuments,
        ApprovalStep::PreClearance,
        ApprovalStep::MakerApproval,
        ApprovalStep::CheckerApproval,
        ApprovalStep::PostClearance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ApprovalStep::VerifyDocuments => "verify_documents",
            ApprovalStep::PreClearance => "pre_clearance",
            ApprovalStep::MakerApproval => "maker_approval",
            ApprovalStep::CheckerApproval => "checker_approval",
            ApprovalStep::PostClearance => "post_clearance",
        }
    }
}

impl fmt::Display for ApprovalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// outcome of a single approval step
///
/// only `passed` decides approval. a message may ride along on a passing
/// result as information and is dropped during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StepResult {
    pub passed: bool,
    pub message: Option<String>,
}

impl StepResult {
    /// pass without a message
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    /// pass carrying an informational note
    pub fn pass_with(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: Some(message.into()),
        }
    }

    /// business rejection with its reason
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }

    /// pass iff `passed`, attaching `reason` only on failure
    pub fn check(passed: bool, reason: &str) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail(reason)
        }
    }

    /// the rejection reason this result contributes, if any
    pub fn rejection(&self) -> Option<&str> {
        if self.passed {
            None
        } else {
            self.message.as_deref()
        }
    }
}
