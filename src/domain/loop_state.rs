//! Inner-loop counters and their transition rules.
//!
//! A valid verdict extends the streak and clears the error count; an
//! invalid one does the opposite. The two counters are therefore never
//! both nonzero. Every recorded verdict advances the iteration count.

use serde::{Deserialize, Serialize};

use super::outcome::FailureCause;
use crate::error::{ProofrError, Result};

/// Thresholds that end an inner loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopLimits {
    /// Consecutive valid verdicts needed for success
    pub required_consecutive_validations: u32,

    /// Consecutive invalid verdicts that end the attempt
    pub max_consecutive_errors: u32,

    /// Total verification passes allowed per attempt
    pub max_verification_iterations: u32,
}

impl Default for LoopLimits {
    fn default() -> Self {
        Self {
            required_consecutive_validations: 5,
            max_consecutive_errors: 10,
            max_verification_iterations: 30,
        }
    }
}

impl LoopLimits {
    pub fn validate(&self) -> Result<()> {
        if self.required_consecutive_validations == 0 {
            return Err(ProofrError::Config(
                "required_consecutive_validations must be at least 1".to_string(),
            ));
        }
        if self.max_consecutive_errors == 0 {
            return Err(ProofrError::Config("max_consecutive_errors must be at least 1".to_string()));
        }
        if self.max_verification_iterations == 0 {
            return Err(ProofrError::Config(
                "max_verification_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    #[default]
    Running,
    Success,
    Failure,
}

impl LoopStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoopStatus::Running)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// Verification passes recorded so far
    pub iteration: u32,

    /// Trailing run of valid verdicts
    pub streak: u32,

    /// Trailing run of invalid verdicts
    pub errors: u32,

    pub status: LoopStatus,

    /// Set once when the status becomes `Failure`
    pub cause: Option<FailureCause>,
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a valid verdict and return the resulting status.
    pub fn record_valid(&mut self, limits: &LoopLimits) -> LoopStatus {
        self.iteration += 1;
        self.streak += 1;
        self.errors = 0;

        if self.streak >= limits.required_consecutive_validations {
            self.status = LoopStatus::Success;
        } else if self.iteration >= limits.max_verification_iterations {
            self.fail(FailureCause::IterationCap);
        }
        self.status
    }

    /// Record an invalid verdict and return the resulting status.
    pub fn record_invalid(&mut self, limits: &LoopLimits) -> LoopStatus {
        self.iteration += 1;
        self.errors += 1;
        self.streak = 0;

        if self.errors >= limits.max_consecutive_errors {
            self.fail(FailureCause::TooManyErrors);
        } else if self.iteration >= limits.max_verification_iterations {
            self.fail(FailureCause::IterationCap);
        }
        self.status
    }

    /// End the loop with `cause`, leaving counters untouched
    pub fn fail(&mut self, cause: FailureCause) {
        self.status = LoopStatus::Failure;
        self.cause = Some(cause);
    }

    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }
}
