//! Two-phase verification: audit, then distill.
//!
//! Phase one asks the grader for a step-by-step audit of the candidate,
//! every finding tagged as a Critical Error or a Justification Gap. Phase
//! two hands that audit back with a fixed yes/no question and runs the
//! answer through [`extract_verdict`]. The audit log doubles as the bug
//! report for the next correction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::verdict::{Verdict, VerdictRule, extract_verdict_with_rule};
use crate::error::Result;
use crate::llm::{GenerationRequest, GenerationService};
use crate::prompt::{self, PromptRenderer};

/// Result of one verification pass.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub verdict: Verdict,

    /// Which extraction rule produced the verdict
    pub rule: VerdictRule,

    /// Full phase-one audit log
    pub log: String,

    /// Raw phase-two answer
    pub decision: String,

    pub duration: Duration,
}

impl VerificationReport {
    /// The audit log, only when the candidate was judged invalid
    pub fn bug_report(&self) -> Option<&str> {
        match self.verdict {
            Verdict::Invalid => Some(&self.log),
            Verdict::Valid => None,
        }
    }
}

/// Grader role: the same generation trait as the solver, configured for low temperature.
pub struct Verifier {
    service: Arc<dyn GenerationService>,
    temperature: f32,
    renderer: PromptRenderer,
}

impl Verifier {
    pub fn new(service: Arc<dyn GenerationService>, temperature: f32) -> Self {
        Self {
            service,
            temperature,
            renderer: PromptRenderer::new(),
        }
    }

    pub fn describe(&self) -> String {
        self.service.describe()
    }

    /// Audit `body` against `problem` and reduce the audit to a verdict.
    ///
    /// Each call samples a fresh audit; results are never cached.
    pub async fn verify(&self, problem: &str, body: &str) -> Result<VerificationReport> {
        let start = Instant::now();

        let audit_prompt = self.renderer.verification_prompt(problem, body)?;
        let log = self
            .service
            .generate(GenerationRequest::new(
                prompt::VERIFICATION_SYSTEM_PROMPT,
                audit_prompt,
                self.temperature,
            ))
            .await?;

        let check_prompt = self.renderer.verdict_check_prompt(&log)?;
        let decision = self
            .service
            .generate(GenerationRequest::new("", check_prompt, self.temperature))
            .await?;

        let (verdict, rule) = extract_verdict_with_rule(&decision);
        log::debug!("Verdict {} via {:?} from answer {:?}", verdict, rule, truncate(&decision, 80));

        Ok(VerificationReport {
            verdict,
            rule,
            log,
            decision,
            duration: start.elapsed(),
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
