//! Verification: grading a candidate and reducing the grade to a verdict.

pub mod protocol;
pub mod verdict;

pub use protocol::{VerificationReport, Verifier};
pub use verdict::{Verdict, VerdictRule, extract_verdict, extract_verdict_with_rule};
