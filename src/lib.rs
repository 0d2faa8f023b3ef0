//! Proofr - a generate, critique, refine loop for proofs
//!
//! A solver model drafts a proof, an independent grader audits it and
//! reduces the audit to a yes/no verdict, and the solver corrects against
//! the audit until enough consecutive verifications pass. Attempts that
//! stall are abandoned and restarted from scratch.

pub mod domain;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod runner;
pub mod validation;

pub use error::{ProofrError, Result};
