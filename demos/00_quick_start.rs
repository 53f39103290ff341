/// quick start - run the prime personal loan workflow once
use loan_approval_rs::PrimePersonalLoanService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut service = PrimePersonalLoanService::new();
    let record = service.process()?;

    println!("{}", record.json());

    Ok(())
}
