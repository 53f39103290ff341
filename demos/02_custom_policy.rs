/// custom policy - a car loan product that only fills in the mandatory steps
use loan_approval_rs::{
    ApprovalPipeline, Loan, LoanApprovalPolicy, LoanProduct, Money, Result, StepResult,
};

#[derive(Debug, Clone)]
struct CarLoan {
    vehicle_value: Money,
    down_payment: Money,
    insured: bool,
}

impl Loan for CarLoan {
    const PRODUCT: LoanProduct = LoanProduct::Car;
}

/// pre- and post-clearance fall back to the default pass
struct CarLoanPolicy;

impl LoanApprovalPolicy for CarLoanPolicy {
    type Loan = CarLoan;

    fn verify_documents(&self, loan: &CarLoan) -> Result<StepResult> {
        Ok(StepResult::check(loan.insured, "Vehicle is not insured"))
    }

    fn maker_approve(&self, loan: &CarLoan) -> Result<StepResult> {
        Ok(StepResult::check(
            !loan.down_payment.is_zero(),
            "No down payment",
        ))
    }

    fn checker_approve(&self, loan: &CarLoan) -> Result<StepResult> {
        Ok(StepResult::check(
            loan.down_payment <= loan.vehicle_value,
            "Down payment exceeds vehicle value",
        ))
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut pipeline = ApprovalPipeline::new(CarLoanPolicy, || CarLoan {
        vehicle_value: Money::from_major(900_000),
        down_payment: Money::ZERO,
        insured: false,
    });

    let record = pipeline.process()?;
    println!("approved: {}", record.is_approved());
    println!("reasons: {:?}", record.rejection_reasons());

    println!("\nevents:");
    for event in pipeline.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
