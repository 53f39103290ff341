pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod loan;
pub mod pipeline;
pub mod policy;
pub mod prime;
pub mod types;

// re-export key types
pub use config::PrimeLoanConfig;
pub use decimal::Money;
pub use errors::{ApprovalError, Result};
pub use events::{Event, EventStore};
pub use loan::{Loan, LoanRecord, PrimePersonalLoan, PrimePersonalLoanBuilder, StepOutcome};
pub use pipeline::ApprovalPipeline;
pub use policy::LoanApprovalPolicy;
pub use prime::{PrimePersonalLoanPolicy, PrimePersonalLoanService};
pub use types::{ApprovalStep, LoanId, LoanProduct, StepResult};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
