//! Solver role: produce, self-improve and correct candidates.

use std::sync::Arc;

use crate::domain::Candidate;
use crate::error::Result;
use crate::llm::{GenerationRequest, GenerationService};
use crate::prompt::{PromptRenderer, SOLVER_SYSTEM_PROMPT};

pub struct Solver {
    service: Arc<dyn GenerationService>,
    temperature: f32,
    hints: Vec<String>,
    renderer: PromptRenderer,
}

impl Solver {
    pub fn new(service: Arc<dyn GenerationService>, temperature: f32) -> Self {
        Self {
            service,
            temperature,
            hints: Vec::new(),
            renderer: PromptRenderer::new(),
        }
    }

    /// Extra prompts appended to the initial solve call only
    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn describe(&self) -> String {
        self.service.describe()
    }

    pub async fn solve(&self, problem: &str) -> Result<Candidate> {
        let request = GenerationRequest::new(SOLVER_SYSTEM_PROMPT, problem, self.temperature)
            .with_auxiliary_prompts(self.hints.iter().cloned());
        self.generate(request).await
    }

    pub async fn improve(&self, problem: &str, candidate: &Candidate) -> Result<Candidate> {
        let prompt = self.renderer.self_improvement_prompt(problem, &candidate.raw)?;
        self.generate(GenerationRequest::new(SOLVER_SYSTEM_PROMPT, prompt, self.temperature))
            .await
    }

    /// Revise `candidate` against a bug report; the solver may rebut findings
    pub async fn correct(&self, problem: &str, candidate: &Candidate, bug_report: &str) -> Result<Candidate> {
        let prompt = self.renderer.correction_prompt(problem, &candidate.raw, bug_report)?;
        self.generate(GenerationRequest::new(SOLVER_SYSTEM_PROMPT, prompt, self.temperature))
            .await
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Candidate> {
        let text = self.service.generate(request).await?;
        Ok(Candidate::parse(text))
    }
}
