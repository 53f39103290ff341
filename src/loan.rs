use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{ApprovalStep, LoanId, LoanProduct, StepResult};

/// product-specific loan fields that approval steps decide on
pub trait Loan {
    const PRODUCT: LoanProduct;
}

/// one step evaluation as recorded on the loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: ApprovalStep,
    pub result: StepResult,
}

/// a loan going through (or done with) the approval workflow.
///
/// steps only ever see `&L`. the decision fields are written by the
/// pipeline once all five steps have been evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord<L> {
    id: LoanId,
    product: LoanProduct,
    loan: L,
    is_approved: bool,
    rejection_reasons: Vec<String>,
    step_outcomes: Vec<StepOutcome>,
    decided_at: Option<DateTime<Utc>>,
}

impl<L: Loan> LoanRecord<L> {
    pub(crate) fn new(loan: L) -> Self {
        Self {
            id: Uuid::new_v4(),
            product: L::PRODUCT,
            loan,
            is_approved: false,
            rejection_reasons: Vec::new(),
            step_outcomes: Vec::new(),
            decided_at: None,
        }
    }
}

impl<L> LoanRecord<L> {
    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn product(&self) -> LoanProduct {
        self.product
    }

    /// product fields the steps were evaluated against
    pub fn loan(&self) -> &L {
        &self.loan
    }

    /// false until the pipeline has decided, and false on rejection
    pub fn is_approved(&self) -> bool {
        self.is_approved
    }

    /// reasons of the failing steps, in evaluation order
    pub fn rejection_reasons(&self) -> &[String] {
        &self.rejection_reasons
    }

    /// every step evaluation of the run, passing ones included
    pub fn step_outcomes(&self) -> &[StepOutcome] {
        &self.step_outcomes
    }

    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    pub fn is_decided(&self) -> bool {
        self.decided_at.is_some()
    }

    pub(crate) fn record_step(&mut self, step: ApprovalStep, result: StepResult) {
        self.step_outcomes.push(StepOutcome { step, result });
    }

    pub(crate) fn reject_for(&mut self, reason: String) {
        self.rejection_reasons.push(reason);
    }

    pub(crate) fn decide(&mut self, approved: bool, at: DateTime<Utc>) {
        self.is_approved = approved;
        self.decided_at = Some(at);
    }
}

impl<L: Serialize> LoanRecord<L> {
    /// get json representation of the record
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

/// prime personal loan applicant data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimePersonalLoan {
    pub credit_score: u32,
    pub city_dweller: bool,
    pub annual_income: Money,
}

impl Default for PrimePersonalLoan {
    fn default() -> Self {
        Self {
            credit_score: 730,
            city_dweller: true,
            annual_income: Money::from_major(2_000_000),
        }
    }
}

impl Loan for PrimePersonalLoan {
    const PRODUCT: LoanProduct = LoanProduct::PrimePersonal;
}

impl PrimePersonalLoan {
    pub fn builder() -> PrimePersonalLoanBuilder {
        PrimePersonalLoanBuilder::new()
    }
}

/// builder for prime personal loans, unset fields keep the defaults
#[derive(Debug, Clone, Default)]
pub struct PrimePersonalLoanBuilder {
    loan: PrimePersonalLoan,
}

impl PrimePersonalLoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit_score(mut self, score: u32) -> Self {
        self.loan.credit_score = score;
        self
    }

    pub fn city_dweller(mut self, city_dweller: bool) -> Self {
        self.loan.city_dweller = city_dweller;
        self
    }

    pub fn annual_income(mut self, income: Money) -> Self {
        self.loan.annual_income = income;
        self
    }

    pub fn build(self) -> PrimePersonalLoan {
        self.loan
    }
}
