//! Agent Loop - the solve, self-improve, verify, correct state machine.
//!
//! One run owns one `LoopState` and one current `Candidate`:
//!
//! 1. solve, then self-improve exactly once
//! 2. verify the current candidate
//!    - valid: extend the streak; on reaching the required streak stop,
//!      otherwise re-verify the same candidate with a fresh audit
//!    - invalid: clear the streak; stop on the error or iteration cap,
//!      otherwise correct against the audit log and verify again
//!
//! A candidate without a detailed body skips verification and counts as
//! an invalid pass. A generation failure ends the run immediately.

use std::sync::Arc;

use super::progress::{NoopReporter, ProgressEvent, ProgressReporter, Stage};
use super::solver::Solver;
use crate::domain::{AttemptOutcome, Candidate, FailureCause, LoopLimits, LoopState, LoopStatus};
use crate::error::Result;
use crate::validation::{Verdict, Verifier};

/// Bug report handed to the solver when its output had no detailed body
pub const MISSING_BODY_REPORT: &str = "The response could not be verified: it has no \"### Detailed Solution ###\" section. \
     Rewrite the full solution with both the Summary and the Detailed Solution sections.";

#[derive(Debug, Default)]
struct AttemptRun {
    state: LoopState,
    candidate: Option<Candidate>,
    verifications: u32,
    corrections: u32,
}

pub struct AgentLoop {
    solver: Solver,
    verifier: Verifier,
    limits: LoopLimits,
    reporter: Arc<dyn ProgressReporter>,
}

impl AgentLoop {
    pub fn new(solver: Solver, verifier: Verifier, limits: LoopLimits) -> Self {
        Self {
            solver,
            verifier,
            limits,
            reporter: Arc::new(NoopReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn limits(&self) -> &LoopLimits {
        &self.limits
    }

    pub(crate) fn reporter(&self) -> &dyn ProgressReporter {
        self.reporter.as_ref()
    }

    /// Run one attempt to a terminal state. Never returns an error: faults
    /// become a `Failure` with a `Generation` cause.
    pub async fn run(&self, problem: &str, attempt: u32) -> AttemptOutcome {
        let mut run = AttemptRun::default();
        tracing::debug!(
            attempt,
            solver = %self.solver.describe(),
            verifier = %self.verifier.describe(),
            "Attempt backends"
        );

        if let Err(e) = self.drive(problem, attempt, &mut run).await {
            tracing::error!(
                attempt,
                iteration = run.state.iteration,
                error = %e,
                "Attempt aborted by generation failure"
            );
            run.state.fail(FailureCause::Generation(e.to_string()));
        }

        self.reporter.report(&ProgressEvent::AttemptFinished {
            attempt,
            status: run.state.status,
            cause: run.state.cause.clone(),
        });

        AttemptOutcome {
            state: run.state,
            candidate: run.candidate,
            verifications: run.verifications,
            corrections: run.corrections,
        }
    }

    async fn drive(&self, problem: &str, attempt: u32, run: &mut AttemptRun) -> Result<()> {
        let current = run.candidate.insert(self.solver.solve(problem).await?);
        self.produced(attempt, Stage::Solve, current);

        *current = self.solver.improve(problem, current).await?;
        self.produced(attempt, Stage::SelfImprove, current);

        loop {
            let bug_report = match current.body() {
                Some(body) => {
                    let report = self.verifier.verify(problem, body).await?;
                    run.verifications += 1;

                    let status = match report.verdict {
                        Verdict::Valid => run.state.record_valid(&self.limits),
                        Verdict::Invalid => run.state.record_invalid(&self.limits),
                    };
                    tracing::info!(
                        attempt,
                        iteration = run.state.iteration,
                        streak = run.state.streak,
                        errors = run.state.errors,
                        verdict = %report.verdict,
                        elapsed_ms = report.duration.as_millis() as u64,
                        "Verification pass"
                    );
                    log::debug!("Grader decision: {:?}", report.decision);
                    self.reporter.report(&ProgressEvent::Verified {
                        attempt,
                        iteration: run.state.iteration,
                        verdict: report.verdict,
                        streak: run.state.streak,
                        errors: run.state.errors,
                    });

                    if status.is_terminal() {
                        return Ok(());
                    }
                    match report.bug_report() {
                        Some(log) => log.to_string(),
                        None => continue,
                    }
                }
                None => {
                    let status = run.state.record_invalid(&self.limits);
                    tracing::warn!(
                        attempt,
                        iteration = run.state.iteration,
                        errors = run.state.errors,
                        "Candidate has no detailed solution"
                    );
                    self.reporter.report(&ProgressEvent::MissingBody {
                        attempt,
                        iteration: run.state.iteration,
                        errors: run.state.errors,
                    });

                    if status.is_terminal() {
                        return Ok(());
                    }
                    MISSING_BODY_REPORT.to_string()
                }
            };

            debug_assert_eq!(run.state.status, LoopStatus::Running);
            *current = self.solver.correct(problem, current, &bug_report).await?;
            run.corrections += 1;
            self.produced(attempt, Stage::Correction, current);
        }
    }

    fn produced(&self, attempt: u32, stage: Stage, candidate: &Candidate) {
        log::debug!("Attempt {} produced candidate at {:?} ({} chars)", attempt, stage, candidate.raw.len());
        self.reporter.report(&ProgressEvent::CandidateProduced {
            attempt,
            stage,
            has_body: candidate.has_body(),
        });
    }
}
