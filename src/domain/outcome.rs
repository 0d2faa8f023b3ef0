//! Attempt and run outcome types.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::candidate::Candidate;
use super::loop_state::{LoopState, LoopStatus};

/// Why an attempt ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Consecutive invalid verdicts reached the error cap
    TooManyErrors,
    /// Verification iterations reached the cap
    IterationCap,
    /// A generation call failed after its retries; aborts the attempt
    Generation(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::TooManyErrors => f.write_str("too many consecutive invalid verdicts"),
            FailureCause::IterationCap => f.write_str("verification iteration cap reached"),
            FailureCause::Generation(msg) => write!(f, "generation failed: {}", msg),
        }
    }
}

/// Terminal result of one inner-loop run.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    /// Final counters and status
    pub state: LoopState,

    /// Last candidate produced, if the solver produced any
    pub candidate: Option<Candidate>,

    /// Verification passes performed (each is two generation calls)
    pub verifications: u32,

    /// Correction calls performed
    pub corrections: u32,
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        self.state.status == LoopStatus::Success
    }

    pub fn cause(&self) -> Option<&FailureCause> {
        self.state.cause.as_ref()
    }
}

/// One outer attempt as recorded by the supervisor.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// 1-based attempt number
    pub attempt: u32,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub outcome: AttemptOutcome,
}

impl RunRecord {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Overall result of a supervised solve.
#[derive(Debug, Clone, Default)]
pub struct SolveResult {
    /// Attempts in execution order; at most one success, always last
    pub records: Vec<RunRecord>,
}

impl SolveResult {
    pub fn is_success(&self) -> bool {
        self.records.last().is_some_and(RunRecord::is_success)
    }

    pub fn attempts(&self) -> usize {
        self.records.len()
    }

    /// Verified candidate on success, otherwise the last attempt's candidate
    pub fn final_candidate(&self) -> Option<&Candidate> {
        self.records.last().and_then(|r| r.outcome.candidate.as_ref())
    }
}
