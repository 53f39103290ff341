/// scenarios - the same policy against different applicants
use loan_approval_rs::{ApprovalPipeline, Money, PrimePersonalLoan, PrimePersonalLoanPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("loan_approval_rs=debug"))
        .init();

    println!("=== prime personal loan scenarios ===\n");

    let applicants = [
        ("good income, low score", 2_000_000, false, 730),
        ("low income, city dweller", 500_000, true, 800),
        ("strong applicant", 2_000_000, false, 800),
    ];

    // one policy shared by every run
    let policy = PrimePersonalLoanPolicy::default();

    for (label, income, city_dweller, credit_score) in applicants {
        let loan = PrimePersonalLoan::builder()
            .annual_income(Money::from_major(income))
            .city_dweller(city_dweller)
            .credit_score(credit_score)
            .build();

        let mut pipeline = ApprovalPipeline::new(&policy, move || loan.clone());
        let record = pipeline.process()?;

        println!("{}:", label);
        println!("  approved: {}", record.is_approved());
        for reason in record.rejection_reasons() {
            println!("  rejected: {}", reason);
        }
        println!();
    }

    Ok(())
}
