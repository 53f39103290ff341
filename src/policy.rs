use crate::errors::Result;
use crate::loan::Loan;
use crate::types::{ApprovalStep, StepResult};

/// step decisions for one loan product.
///
/// implementors supply the decision logic for each step; the order the steps
/// run in and how their results combine belong to `ApprovalPipeline`. steps
/// read the loan and must not keep state between calls, so one policy value
/// can serve any number of runs.
///
/// returning `Ok(StepResult::fail(..))` rejects the loan for cause. `Err`
/// means the step could not reach a decision and stops the run.
pub trait LoanApprovalPolicy {
    type Loan: Loan;

    fn verify_documents(&self, loan: &Self::Loan) -> Result<StepResult>;

    /// hook, passes unless overridden
    fn get_pre_clearance(&self, _loan: &Self::Loan) -> Result<StepResult> {
        Ok(StepResult::pass())
    }

    fn maker_approve(&self, loan: &Self::Loan) -> Result<StepResult>;

    fn checker_approve(&self, loan: &Self::Loan) -> Result<StepResult>;

    /// hook, passes unless overridden
    fn get_post_clearance(&self, _loan: &Self::Loan) -> Result<StepResult> {
        Ok(StepResult::pass())
    }

    /// run the method backing `step`
    fn evaluate(&self, step: ApprovalStep, loan: &Self::Loan) -> Result<StepResult> {
        match step {
            ApprovalStep::VerifyDocuments => self.verify_documents(loan),
            ApprovalStep::PreClearance => self.get_pre_clearance(loan),
            ApprovalStep::MakerApproval => self.maker_approve(loan),
            ApprovalStep::CheckerApproval => self.checker_approve(loan),
            ApprovalStep::PostClearance => self.get_post_clearance(loan),
        }
    }
}

impl<P: LoanApprovalPolicy + ?Sized> LoanApprovalPolicy for &P {
    type Loan = P::Loan;

    fn verify_documents(&self, loan: &Self::Loan) -> Result<StepResult> {
        (**self).verify_documents(loan)
    }

    fn get_pre_clearance(&self, loan: &Self::Loan) -> Result<StepResult> {
        (**self).get_pre_clearance(loan)
    }

    fn maker_approve(&self, loan: &Self::Loan) -> Result<StepResult> {
        (**self).maker_approve(loan)
    }

    fn checker_approve(&self, loan: &Self::Loan) -> Result<StepResult> {
        (**self).checker_approve(loan)
    }

    fn get_post_clearance(&self, loan: &Self::Loan) -> Result<StepResult> {
        (**self).get_post_clearance(loan)
    }
}
