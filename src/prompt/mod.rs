//! Prompt text and rendering for the solver and grader roles.

mod render;
mod templates;

pub use render::PromptRenderer;
pub use templates::*;
