//! Domain types for Proofr
//!
//! - Candidate: one solver output split into summary and detailed body
//! - LoopState / LoopLimits: inner-loop counters and their thresholds
//! - AttemptOutcome / RunRecord / SolveResult: what the loops report upward

pub mod candidate;
pub mod loop_state;
pub mod outcome;

pub use candidate::Candidate;
pub use loop_state::{LoopLimits, LoopState, LoopStatus};
pub use outcome::{AttemptOutcome, FailureCause, RunRecord, SolveResult};
