use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ApprovalStep, LoanId, LoanProduct};

/// all events that can be emitted by an approval run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ApprovalStarted {
        loan_id: LoanId,
        product: LoanProduct,
        timestamp: DateTime<Utc>,
    },
    StepEvaluated {
        loan_id: LoanId,
        step: ApprovalStep,
        passed: bool,
        message: Option<String>,
        timestamp: DateTime<Utc>,
    },
    /// a step could not be evaluated and the run stopped undecided
    ApprovalFaulted {
        loan_id: LoanId,
        step: ApprovalStep,
        message: String,
        timestamp: DateTime<Utc>,
    },
    LoanApproved {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanRejected {
        loan_id: LoanId,
        reasons: Vec<String>,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn loan_id(&self) -> LoanId {
        match self {
            Event::ApprovalStarted { loan_id, .. }
            | Event::StepEvaluated { loan_id, .. }
            | Event::ApprovalFaulted { loan_id, .. }
            | Event::LoanApproved { loan_id, .. }
            | Event::LoanRejected { loan_id, .. } => *loan_id,
        }
    }
}

/// event store for collecting events during approval runs
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
