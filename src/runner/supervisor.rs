//! Run Supervisor - bounded sequence of independent attempts.

use std::time::Instant;

use chrono::Utc;

use super::agent_loop::AgentLoop;
use super::progress::ProgressEvent;
use crate::domain::{RunRecord, SolveResult};

pub struct RunSupervisor {
    agent: AgentLoop,
}

impl RunSupervisor {
    pub fn new(agent: AgentLoop) -> Self {
        Self { agent }
    }

    /// Run up to `max_attempts` fresh attempts, stopping at the first success.
    ///
    /// Attempts share nothing: each starts from empty counters and a new
    /// initial solve. On overall failure the last attempt's candidate is
    /// still available through [`SolveResult::final_candidate`].
    pub async fn solve(&self, problem: &str, max_attempts: u32) -> SolveResult {
        let mut result = SolveResult::default();
        let limits = self.agent.limits();
        tracing::debug!(
            max_attempts,
            required = limits.required_consecutive_validations,
            max_errors = limits.max_consecutive_errors,
            max_iterations = limits.max_verification_iterations,
            "Supervising run"
        );

        for attempt in 1..=max_attempts {
            tracing::info!(attempt, max_attempts, "Starting attempt");
            self.agent.reporter().report(&ProgressEvent::AttemptStarted { attempt, max_attempts });

            let started_at = Utc::now();
            let start = Instant::now();
            let outcome = self.agent.run(problem, attempt).await;
            let success = outcome.is_success();

            match outcome.cause() {
                Some(cause) => tracing::warn!(attempt, %cause, "Attempt failed"),
                None => tracing::info!(attempt, "Attempt succeeded"),
            }

            result.records.push(RunRecord {
                attempt,
                started_at,
                duration: start.elapsed(),
                outcome,
            });

            if success {
                break;
            }
        }

        if !result.is_success() {
            log::error!("No attempt produced a verified solution after {} attempts", result.attempts());
        }
        result
    }
}
