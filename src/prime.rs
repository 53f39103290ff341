use tracing::debug;

use crate::config::PrimeLoanConfig;
use crate::errors::Result;
use crate::events::Event;
use crate::loan::{LoanRecord, PrimePersonalLoan};
use crate::pipeline::ApprovalPipeline;
use crate::policy::LoanApprovalPolicy;
use crate::types::StepResult;

/// approval rules for prime personal loans
#[derive(Debug, Clone, Default)]
pub struct PrimePersonalLoanPolicy {
    config: PrimeLoanConfig,
}

impl PrimePersonalLoanPolicy {
    pub fn new(config: PrimeLoanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PrimeLoanConfig {
        &self.config
    }
}

impl LoanApprovalPolicy for PrimePersonalLoanPolicy {
    type Loan = PrimePersonalLoan;

    fn verify_documents(&self, _loan: &PrimePersonalLoan) -> Result<StepResult> {
        debug!("prime personal loan: verify documents");
        // flagged for follow-up, not grounds for rejection
        Ok(StepResult::pass_with("Discrepancy in Aadhaar data"))
    }

    fn get_pre_clearance(&self, loan: &PrimePersonalLoan) -> Result<StepResult> {
        debug!("prime personal loan: pre-clearance");
        Ok(StepResult::check(
            loan.annual_income >= self.config.min_annual_income,
            "Not enough annual income",
        ))
    }

    fn maker_approve(&self, loan: &PrimePersonalLoan) -> Result<StepResult> {
        debug!("prime personal loan: maker approve");
        // passes iff not a city dweller
        Ok(StepResult::check(!loan.city_dweller, "Not a city dweller"))
    }

    fn checker_approve(&self, loan: &PrimePersonalLoan) -> Result<StepResult> {
        debug!("prime personal loan: checker approve");
        Ok(StepResult::check(
            loan.credit_score >= self.config.min_credit_score,
            "Not enough credit score",
        ))
    }
}

pub type PrimePipeline = ApprovalPipeline<PrimePersonalLoanPolicy, fn() -> PrimePersonalLoan>;

/// runs the prime personal loan workflow on a default applicant
pub struct PrimePersonalLoanService {
    pipeline: PrimePipeline,
}

impl PrimePersonalLoanService {
    pub fn new() -> Self {
        Self {
            pipeline: ApprovalPipeline::with_default_loan(PrimePersonalLoanPolicy::default()),
        }
    }

    pub fn with_config(config: PrimeLoanConfig) -> Result<Self> {
        Ok(Self {
            pipeline: ApprovalPipeline::with_default_loan(PrimePersonalLoanPolicy::new(config)?),
        })
    }

    pub fn process(&mut self) -> Result<LoanRecord<PrimePersonalLoan>> {
        self.pipeline.process()
    }

    pub fn pipeline(&self) -> &PrimePipeline {
        &self.pipeline
    }

    /// drain the events recorded by past runs
    pub fn take_events(&mut self) -> Vec<Event> {
        self.pipeline.take_events()
    }
}

impl Default for PrimePersonalLoanService {
    fn default() -> Self {
        Self::new()
    }
}
