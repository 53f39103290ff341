use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::loan::LoanRecord;
use crate::policy::LoanApprovalPolicy;
use crate::types::ApprovalStep;

/// runs loans of one product through the fixed approval workflow.
///
/// every run builds a fresh loan from `factory`, evaluates all five steps in
/// `ApprovalStep::ORDER` and approves the loan iff every step passed. a
/// failing step never stops later steps from running.
pub struct ApprovalPipeline<P, F>
where
    P: LoanApprovalPolicy,
    F: Fn() -> P::Loan,
{
    policy: P,
    factory: F,
    time: SafeTimeProvider,
    events: EventStore,
}

impl<P, F> ApprovalPipeline<P, F>
where
    P: LoanApprovalPolicy,
    F: Fn() -> P::Loan,
{
    /// create a pipeline on system time
    pub fn new(policy: P, factory: F) -> Self {
        Self {
            policy,
            factory,
            time: SafeTimeProvider::new(TimeSource::System),
            events: EventStore::new(),
        }
    }

    /// replace the time provider used for decision timestamps
    pub fn with_time(mut self, time: SafeTimeProvider) -> Self {
        self.time = time;
        self
    }

    /// run one approval
    pub fn process(&mut self) -> Result<LoanRecord<P::Loan>> {
        let mut record = LoanRecord::new((self.factory)());
        let loan_id = record.id();

        self.events.emit(Event::ApprovalStarted {
            loan_id,
            product: record.product(),
            timestamp: self.time.now(),
        });

        let mut approved = true;
        for step in ApprovalStep::ORDER {
            let result = match self.policy.evaluate(step, record.loan()) {
                Ok(result) => result,
                Err(err) => {
                    warn!(%loan_id, %step, error = %err, "approval run aborted");
                    self.events.emit(Event::ApprovalFaulted {
                        loan_id,
                        step,
                        message: err.to_string(),
                        timestamp: self.time.now(),
                    });
                    return Err(err);
                }
            };

            debug!(%loan_id, %step, passed = result.passed, "step evaluated");
            self.events.emit(Event::StepEvaluated {
                loan_id,
                step,
                passed: result.passed,
                message: result.message.clone(),
                timestamp: self.time.now(),
            });

            if !result.passed {
                approved = false;
                let reason = result
                    .rejection()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} failed", step));
                record.reject_for(reason);
            }
            record.record_step(step, result);
        }

        let now = self.time.now();
        record.decide(approved, now);

        if approved {
            info!(%loan_id, "loan approved");
            self.events.emit(Event::LoanApproved {
                loan_id,
                timestamp: now,
            });
        } else {
            info!(%loan_id, reasons = ?record.rejection_reasons(), "loan rejected");
            self.events.emit(Event::LoanRejected {
                loan_id,
                reasons: record.rejection_reasons().to_vec(),
                timestamp: now,
            });
        }

        Ok(record)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

impl<P> ApprovalPipeline<P, fn() -> P::Loan>
where
    P: LoanApprovalPolicy,
    P::Loan: Default,
{
    /// create a pipeline that runs on the product's default loan
    pub fn with_default_loan(policy: P) -> Self {
        Self::new(policy, <P::Loan as Default>::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApprovalError;
    use crate::loan::Loan;
    use crate::types::{LoanProduct, StepResult};
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    /// pass/fail per step, in evaluation order
    #[derive(Debug, Clone, Default)]
    struct ScriptedLoan {
        outcomes: [bool; 5],
    }

    impl Loan for ScriptedLoan {
        const PRODUCT: LoanProduct = LoanProduct::SubprimePersonal;
    }

    #[derive(Default)]
    struct CountingPolicy {
        calls: [Cell<u32>; 5],
        order: std::cell::RefCell<Vec<ApprovalStep>>,
        fault_at: Option<ApprovalStep>,
    }

    impl CountingPolicy {
        fn step(&self, step: ApprovalStep, loan: &ScriptedLoan) -> Result<StepResult> {
            let idx = ApprovalStep::ORDER.iter().position(|s| *s == step).unwrap();
            self.calls[idx].set(self.calls[idx].get() + 1);
            self.order.borrow_mut().push(step);

            if self.fault_at == Some(step) {
                return Err(ApprovalError::evaluation_fault(step, "missing field"));
            }
            Ok(StepResult::check(loan.outcomes[idx], &format!("{} rejected", step.name())))
        }

        fn counts(&self) -> Vec<u32> {
            self.calls.iter().map(Cell::get).collect()
        }
    }

    impl LoanApprovalPolicy for CountingPolicy {
        type Loan = ScriptedLoan;

        fn verify_documents(&self, loan: &ScriptedLoan) -> Result<StepResult> {
            self.step(ApprovalStep::VerifyDocuments, loan)
        }

        fn get_pre_clearance(&self, loan: &ScriptedLoan) -> Result<StepResult> {
            self.step(ApprovalStep::PreClearance, loan)
        }

        fn maker_approve(&self, loan: &ScriptedLoan) -> Result<StepResult> {
            self.step(ApprovalStep::MakerApproval, loan)
        }

        fn checker_approve(&self, loan: &ScriptedLoan) -> Result<StepResult> {
            self.step(ApprovalStep::CheckerApproval, loan)
        }

        fn get_post_clearance(&self, loan: &ScriptedLoan) -> Result<StepResult> {
            self.step(ApprovalStep::PostClearance, loan)
        }
    }

    fn fixed_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ))
    }

    fn run(outcomes: [bool; 5], policy: &CountingPolicy) -> LoanRecord<ScriptedLoan> {
        let mut pipeline = ApprovalPipeline::new(policy, move || ScriptedLoan { outcomes });
        pipeline.process().unwrap()
    }

    #[test]
    fn test_all_pass_approves() {
        let policy = CountingPolicy::default();
        let record = run([true; 5], &policy);

        assert!(record.is_approved());
        assert!(record.rejection_reasons().is_empty());
        assert!(record.is_decided());
    }

    #[test]
    fn test_every_step_runs_once_in_order() {
        let policy = CountingPolicy::default();
        run([false; 5], &policy);

        assert_eq!(policy.counts(), vec![1, 1, 1, 1, 1]);
        assert_eq!(*policy.order.borrow(), ApprovalStep::ORDER.to_vec());
    }

    #[test]
    fn test_first_step_failure_does_not_short_circuit() {
        let policy = CountingPolicy::default();
        let record = run([false, true, true, true, true], &policy);

        assert_eq!(policy.counts(), vec![1, 1, 1, 1, 1]);
        assert!(!record.is_approved());
        assert_eq!(record.rejection_reasons(), ["verify_documents rejected"]);
        assert_eq!(record.step_outcomes().len(), 5);
    }

    #[test]
    fn test_reasons_follow_evaluation_order() {
        let policy = CountingPolicy::default();
        let record = run([false, true, false, false, true], &policy);

        assert!(!record.is_approved());
        assert_eq!(
            record.rejection_reasons(),
            [
                "verify_documents rejected",
                "maker_approval rejected",
                "checker_approval rejected",
            ]
        );
    }

    #[test]
    fn test_each_mandatory_subset_rejects() {
        // every non-empty subset of documents, maker, checker
        for mask in 1u8..8 {
            let mut outcomes = [true; 5];
            outcomes[0] = mask & 1 == 0;
            outcomes[2] = mask & 2 == 0;
            outcomes[3] = mask & 4 == 0;

            let policy = CountingPolicy::default();
            let record = run(outcomes, &policy);

            assert!(!record.is_approved());
            assert_eq!(record.rejection_reasons().len(), mask.count_ones() as usize);
            assert_eq!(policy.counts(), vec![1, 1, 1, 1, 1]);
        }
    }

    #[test]
    fn test_failure_without_message_still_gives_a_reason() {
        struct SilentPolicy;

        impl LoanApprovalPolicy for SilentPolicy {
            type Loan = ScriptedLoan;

            fn verify_documents(&self, _loan: &ScriptedLoan) -> Result<StepResult> {
                Ok(StepResult::pass())
            }

            fn maker_approve(&self, _loan: &ScriptedLoan) -> Result<StepResult> {
                Ok(StepResult {
                    passed: false,
                    message: None,
                })
            }

            fn checker_approve(&self, _loan: &ScriptedLoan) -> Result<StepResult> {
                Ok(StepResult::pass())
            }
        }

        let mut pipeline = ApprovalPipeline::with_default_loan(SilentPolicy);
        let record = pipeline.process().unwrap();

        assert!(!record.is_approved());
        assert_eq!(record.rejection_reasons(), ["maker_approval failed"]);
    }

    #[test]
    fn test_evaluation_fault_aborts_run() {
        let policy = CountingPolicy {
            fault_at: Some(ApprovalStep::MakerApproval),
            ..Default::default()
        };
        let mut pipeline = ApprovalPipeline::new(&policy, || ScriptedLoan {
            outcomes: [true; 5],
        });

        let err = pipeline.process().unwrap_err();
        assert_eq!(
            err,
            ApprovalError::EvaluationFault {
                step: ApprovalStep::MakerApproval,
                message: "missing field".to_string(),
            }
        );

        // later steps never ran
        assert_eq!(policy.counts(), vec![1, 1, 1, 0, 0]);

        let events = pipeline.take_events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], Event::ApprovalStarted { .. }));
        let evaluated: Vec<ApprovalStep> = events
            .iter()
            .filter_map(|e| match e {
                Event::StepEvaluated { step, .. } => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(
            evaluated,
            vec![ApprovalStep::VerifyDocuments, ApprovalStep::PreClearance]
        );
        match &events[3] {
            Event::ApprovalFaulted { step, message, .. } => {
                assert_eq!(*step, ApprovalStep::MakerApproval);
                assert_eq!(
                    message,
                    "step maker_approval could not be evaluated: missing field"
                );
            }
            other => panic!("unexpected final event: {:?}", other),
        }
        assert!(events
            .iter()
            .all(|e| !matches!(e, Event::LoanApproved { .. } | Event::LoanRejected { .. })));
    }

    #[test]
    fn test_events_and_timestamps() {
        let policy = CountingPolicy::default();
        let mut pipeline = ApprovalPipeline::new(&policy, || ScriptedLoan {
            outcomes: [true, true, true, false, true],
        })
        .with_time(fixed_time());

        let record = pipeline.process().unwrap();
        assert_eq!(
            record.decided_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );

        let events = pipeline.take_events();
        assert_eq!(events.len(), 7);
        assert!(matches!(
            events[0],
            Event::ApprovalStarted {
                product: LoanProduct::SubprimePersonal,
                ..
            }
        ));
        assert!(events.iter().all(|e| e.loan_id() == record.id()));
        match &events[6] {
            Event::LoanRejected { reasons, .. } => {
                assert_eq!(reasons, &vec!["checker_approval rejected".to_string()]);
            }
            other => panic!("unexpected final event: {:?}", other),
        }
        assert!(pipeline.events().is_empty());
    }

    #[test]
    fn test_each_run_gets_a_fresh_record() {
        let policy = CountingPolicy::default();
        let mut pipeline = ApprovalPipeline::new(&policy, || ScriptedLoan {
            outcomes: [false, true, true, true, true],
        });

        let first = pipeline.process().unwrap();
        let second = pipeline.process().unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(second.rejection_reasons().len(), 1);
        assert_eq!(policy.counts(), vec![2, 2, 2, 2, 2]);
    }
}
