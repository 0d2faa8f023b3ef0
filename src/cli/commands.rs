//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

use proofr::llm::Provider;

/// Proofr - iterate a solver against an independent grader until a proof verifies
#[derive(Parser, Debug)]
#[command(name = "proofr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File containing the problem statement
    pub problem_file: PathBuf,

    /// Solver provider (anthropic, openai, gemini, cohere, deepseek, openrouter)
    #[arg(short, long)]
    pub backend: Option<Provider>,

    /// Solver model (defaults to the provider's default model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Verifier provider (defaults to the solver provider)
    #[arg(long = "v-backend")]
    pub verifier_backend: Option<Provider>,

    /// Verifier model (defaults to the solver model)
    #[arg(long = "v-model")]
    pub verifier_model: Option<String>,

    /// Maximum number of independent attempts
    #[arg(long = "max-runs")]
    pub max_runs: Option<u32>,

    /// Write the final solution to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Solver sampling temperature
    #[arg(long = "solver-temp")]
    pub solver_temperature: Option<f32>,

    /// Verifier sampling temperature
    #[arg(long = "verifier-temp")]
    pub verifier_temperature: Option<f32>,

    /// Extra prompt appended to the initial solve call (repeatable)
    #[arg(long = "hint")]
    pub hints: Vec<String>,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::try_parse_from(["proofr", "problem.txt"]).unwrap();
        assert_eq!(cli.problem_file, PathBuf::from("problem.txt"));
        assert!(cli.backend.is_none());
        assert!(cli.hints.is_empty());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::try_parse_from([
            "proofr",
            "imo.txt",
            "-b",
            "openai",
            "-m",
            "o3",
            "--v-backend",
            "gemini",
            "--v-model",
            "gemini-2.5-pro",
            "--max-runs",
            "3",
            "-o",
            "out.md",
            "--solver-temp",
            "0.9",
            "--verifier-temp",
            "0.0",
            "--hint",
            "consider parity",
            "--hint",
            "try small cases",
            "-c",
            "custom.yml",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.backend, Some(Provider::OpenAi));
        assert_eq!(cli.model.as_deref(), Some("o3"));
        assert_eq!(cli.verifier_backend, Some(Provider::Gemini));
        assert_eq!(cli.verifier_model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.max_runs, Some(3));
        assert_eq!(cli.output, Some(PathBuf::from("out.md")));
        assert_eq!(cli.solver_temperature, Some(0.9));
        assert_eq!(cli.verifier_temperature, Some(0.0));
        assert_eq!(cli.hints, vec!["consider parity", "try small cases"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Cli::try_parse_from(["proofr", "p.txt", "--backend", "nope"]).is_err());
    }

    #[test]
    fn test_problem_file_required() {
        assert!(Cli::try_parse_from(["proofr"]).is_err());
    }
}
