//! Progress reporting seam between the loops and whatever displays them.

use std::sync::Mutex;

use crate::domain::{FailureCause, LoopStatus};
use crate::validation::Verdict;

/// Which solver call produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Solve,
    SelfImprove,
    Correction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    AttemptStarted {
        attempt: u32,
        max_attempts: u32,
    },
    CandidateProduced {
        attempt: u32,
        stage: Stage,
        has_body: bool,
    },
    Verified {
        attempt: u32,
        iteration: u32,
        verdict: Verdict,
        streak: u32,
        errors: u32,
    },
    /// Candidate had no detailed body; counted as an invalid pass
    MissingBody {
        attempt: u32,
        iteration: u32,
        errors: u32,
    },
    AttemptFinished {
        attempt: u32,
        status: LoopStatus,
        cause: Option<FailureCause>,
    },
}

/// Receives loop progress. Implementations must not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: &ProgressEvent) {}
}

/// Keeps every event in order, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: &ProgressEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        reporter.report(&ProgressEvent::AttemptStarted {
            attempt: 1,
            max_attempts: 2,
        });
        reporter.report(&ProgressEvent::AttemptFinished {
            attempt: 1,
            status: LoopStatus::Failure,
            cause: Some(FailureCause::TooManyErrors),
        });

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProgressEvent::AttemptStarted { attempt: 1, .. }));
        assert!(matches!(events[1], ProgressEvent::AttemptFinished { status: LoopStatus::Failure, .. }));
    }

    #[test]
    fn test_noop_reporter() {
        NoopReporter.report(&ProgressEvent::MissingBody {
            attempt: 1,
            iteration: 1,
            errors: 1,
        });
    }
}
