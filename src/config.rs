use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use proofr::domain::LoopLimits;
use proofr::llm::BackendConfig;

use crate::cli::Cli;

const VERIFIER_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub agent: AgentConfig,
    pub solver: BackendConfig,
    /// Absent means "same provider and model as the solver, low temperature"
    pub verifier: Option<BackendConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub required_consecutive_validations: u32,
    pub max_consecutive_errors: u32,
    pub max_verification_iterations: u32,
    pub max_attempts: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let limits = LoopLimits::default();
        Self {
            required_consecutive_validations: limits.required_consecutive_validations,
            max_consecutive_errors: limits.max_consecutive_errors,
            max_verification_iterations: limits.max_verification_iterations,
            max_attempts: 10,
        }
    }
}

impl AgentConfig {
    pub fn limits(&self) -> LoopLimits {
        LoopLimits {
            required_consecutive_validations: self.required_consecutive_validations,
            max_consecutive_errors: self.max_consecutive_errors,
            max_verification_iterations: self.max_verification_iterations,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            agent: AgentConfig::default(),
            solver: BackendConfig::default(),
            verifier: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Effective verifier backend
    pub fn verifier_backend(&self) -> BackendConfig {
        self.verifier.clone().unwrap_or_else(|| BackendConfig {
            temperature: VERIFIER_TEMPERATURE,
            ..self.solver.clone()
        })
    }

    /// Command-line flags win over file values
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(provider) = cli.backend {
            if provider != self.solver.provider {
                // a model named for another provider would not resolve
                self.solver.model = None;
                self.solver.base_url = None;
            }
            self.solver.provider = provider;
        }
        if let Some(model) = &cli.model {
            self.solver.model = Some(model.clone());
        }
        if let Some(temperature) = cli.solver_temperature {
            self.solver.temperature = temperature;
        }

        let touches_verifier =
            cli.verifier_backend.is_some() || cli.verifier_model.is_some() || cli.verifier_temperature.is_some();
        if touches_verifier {
            let mut verifier = self.verifier_backend();
            if let Some(provider) = cli.verifier_backend {
                if provider != verifier.provider {
                    verifier.model = None;
                    verifier.base_url = None;
                }
                verifier.provider = provider;
            }
            if let Some(model) = &cli.verifier_model {
                verifier.model = Some(model.clone());
            }
            if let Some(temperature) = cli.verifier_temperature {
                verifier.temperature = temperature;
            }
            self.verifier = Some(verifier);
        }

        if let Some(max_runs) = cli.max_runs {
            self.agent.max_attempts = max_runs;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.agent.limits().validate()?;
        if self.agent.max_attempts == 0 {
            bail!("agent.max_attempts must be at least 1");
        }
        for (role, backend) in [("solver", &self.solver), ("verifier", &self.verifier_backend())] {
            if backend.retry_attempts == 0 {
                bail!("{}.retry_attempts must be at least 1", role);
            }
            if !(0.0..=1.0).contains(&backend.temperature) {
                bail!("{}.temperature must be within [0, 1], got {}", role, backend.temperature);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use proofr::llm::Provider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["proofr", "problem.txt"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.required_consecutive_validations, 5);
        assert_eq!(config.agent.max_consecutive_errors, 10);
        assert_eq!(config.agent.max_verification_iterations, 30);
        assert_eq!(config.agent.max_attempts, 10);
        assert_eq!(config.solver.provider, Provider::Anthropic);
        assert!((config.solver.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.verifier_backend().temperature - 0.1).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let file = write_config(
            "log_level: debug\n\
             agent:\n  required_consecutive_validations: 2\n  max_attempts: 3\n\
             solver:\n  provider: openai\n  model: o3\n  temperature: 0.5\n\
             verifier:\n  provider: gemini\n  temperature: 0.0\n",
        );
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.agent.required_consecutive_validations, 2);
        assert_eq!(config.agent.max_consecutive_errors, 10);
        assert_eq!(config.agent.max_attempts, 3);
        assert_eq!(config.solver.provider, Provider::OpenAi);
        assert_eq!(config.solver.model_name(), "o3");
        assert_eq!(config.solver.retry_attempts, 3);

        let verifier = config.verifier_backend();
        assert_eq!(verifier.provider, Provider::Gemini);
        assert_eq!(verifier.model_name(), Provider::Gemini.default_model());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/proofr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let file = write_config("agent: [not, a, map]\n");
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_verifier_inherits_solver() {
        let mut config = Config::default();
        config.apply_cli(&cli(&["-b", "deepseek", "-m", "deepseek-reasoner"]));

        let verifier = config.verifier_backend();
        assert_eq!(verifier.provider, Provider::DeepSeek);
        assert_eq!(verifier.model_name(), "deepseek-reasoner");
        assert!((verifier.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cli_overrides_verifier_separately() {
        let mut config = Config::default();
        config.apply_cli(&cli(&[
            "-b",
            "openai",
            "--v-backend",
            "anthropic",
            "--verifier-temp",
            "0.2",
            "--max-runs",
            "4",
        ]));

        assert_eq!(config.solver.provider, Provider::OpenAi);
        let verifier = config.verifier_backend();
        assert_eq!(verifier.provider, Provider::Anthropic);
        assert_eq!(verifier.model_name(), Provider::Anthropic.default_model());
        assert!((verifier.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.agent.max_attempts, 4);
    }

    #[test]
    fn test_switching_provider_drops_stale_model() {
        let mut config = Config::default();
        config.solver.model = Some("claude-custom".to_string());
        config.apply_cli(&cli(&["-b", "gemini"]));
        assert_eq!(config.solver.model_name(), Provider::Gemini.default_model());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.agent.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.solver.temperature = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.apply_cli(&cli(&["--verifier-temp", "1.5"]));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.agent.max_consecutive_errors = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.solver.retry_attempts = 0;
        assert!(config.validate().is_err());
    }
}
