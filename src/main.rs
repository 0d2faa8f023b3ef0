use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod cli;
mod config;
mod console;

use cli::Cli;
use config::Config;
use console::ConsoleReporter;
use proofr::llm::build_service;
use proofr::runner::{AgentLoop, RunSupervisor, Solver};
use proofr::validation::Verifier;

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("proofr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("proofr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<bool> {
    let problem = fs::read_to_string(&cli.problem_file)
        .context(format!("Failed to read problem file {}", cli.problem_file.display()))?;
    if problem.trim().is_empty() {
        bail!("Problem file {} is empty", cli.problem_file.display());
    }

    let verifier_backend = config.verifier_backend();
    let solver_service = build_service(&config.solver).context("Failed to build solver backend")?;
    let verifier_service = build_service(&verifier_backend).context("Failed to build verifier backend")?;

    println!("{} {}", "Solver:".cyan(), config.solver.label());
    println!("{} {}", "Verifier:".cyan(), verifier_backend.label());
    if cli.is_verbose() {
        let limits = config.agent.limits();
        println!(
            "{}",
            format!(
                "streak={} max_errors={} max_iterations={} max_attempts={}",
                limits.required_consecutive_validations,
                limits.max_consecutive_errors,
                limits.max_verification_iterations,
                config.agent.max_attempts
            )
            .dimmed()
        );
    }

    let solver = Solver::new(solver_service, config.solver.temperature).with_hints(cli.hints.iter().cloned());
    let verifier = Verifier::new(verifier_service, verifier_backend.temperature);
    let agent = AgentLoop::new(solver, verifier, config.agent.limits())
        .with_reporter(Arc::new(ConsoleReporter::new(cli.is_verbose())));

    let result = RunSupervisor::new(agent)
        .solve(&problem, config.agent.max_attempts)
        .await;

    console::print_result(&result);

    if let Some(path) = &cli.output {
        match result.final_candidate() {
            Some(candidate) => {
                fs::write(path, &candidate.raw).context(format!("Failed to write solution to {}", path.display()))?;
                println!("{} {}", "Solution written to".green(), path.display());
            }
            None => log::warn!("No candidate to write to {}", path.display()),
        }
    }

    Ok(result.is_success())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Credentials may live in a .env file
    dotenv::dotenv().ok();

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_cli(&cli);

    let level = if cli.is_verbose() {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);
    config.validate().context("Invalid configuration")?;

    let solved = run_application(&cli, &config).await.context("Application failed")?;

    Ok(if solved { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
