//! Runner module - the solver role and the two nested loops.
//!
//! - Solver: initial solve, self-improvement and correction calls
//! - AgentLoop: one attempt of the verify/correct state machine
//! - RunSupervisor: independent attempts until one succeeds
//! - ProgressReporter: where loop progress goes

pub mod agent_loop;
pub mod progress;
pub mod solver;
pub mod supervisor;

pub use agent_loop::{AgentLoop, MISSING_BODY_REPORT};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, RecordingReporter, Stage};
pub use solver::Solver;
pub use supervisor::RunSupervisor;
