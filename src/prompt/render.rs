//! Prompt Renderer - fills the fixed templates using Handlebars

use handlebars::Handlebars;
use serde::Serialize;

use super::templates::{
    CORRECTION_PROMPT, CORRECTION_TEMPLATE, SELF_IMPROVEMENT_PROMPT, SELF_IMPROVEMENT_TEMPLATE,
    VERDICT_CHECK_TEMPLATE, VERIFICATION_REMINDER, VERIFICATION_TEMPLATE,
};
use crate::error::{ProofrError, Result};

/// Renders the user-turn prompts sent to solver and grader
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct VerificationContext<'a> {
    problem: &'a str,
    solution: &'a str,
    reminder: &'a str,
}

#[derive(Serialize)]
struct RevisionContext<'a> {
    problem: &'a str,
    solution: &'a str,
    bug_report: Option<&'a str>,
    instruction: &'a str,
}

impl PromptRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Proofs are full of <, > and &; never HTML-escape them
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render a template string with any serializable context
    pub fn render_with<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| ProofrError::Prompt(format!("Failed to render template: {}", e)))
    }

    /// Audit request: the problem, the detailed body only, then the reminder
    pub fn verification_prompt(&self, problem: &str, body: &str) -> Result<String> {
        self.render_with(
            VERIFICATION_TEMPLATE,
            &VerificationContext {
                problem,
                solution: body,
                reminder: VERIFICATION_REMINDER,
            },
        )
    }

    /// Yes/no question posed over an audit log
    pub fn verdict_check_prompt(&self, audit_log: &str) -> Result<String> {
        self.render_with(VERDICT_CHECK_TEMPLATE, &serde_json::json!({ "audit_log": audit_log }))
    }

    pub fn self_improvement_prompt(&self, problem: &str, candidate: &str) -> Result<String> {
        self.render_with(
            SELF_IMPROVEMENT_TEMPLATE,
            &RevisionContext {
                problem,
                solution: candidate,
                bug_report: None,
                instruction: SELF_IMPROVEMENT_PROMPT,
            },
        )
    }

    /// Correction request carrying the grader's bug report
    pub fn correction_prompt(&self, problem: &str, candidate: &str, bug_report: &str) -> Result<String> {
        self.render_with(
            CORRECTION_TEMPLATE,
            &RevisionContext {
                problem,
                solution: candidate,
                bug_report: Some(bug_report),
                instruction: CORRECTION_PROMPT,
            },
        )
    }
}
