//! Console progress output

use colored::*;

use proofr::domain::{LoopStatus, SolveResult};
use proofr::runner::{ProgressEvent, ProgressReporter, Stage};

/// Prints loop progress to stdout
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::AttemptStarted { attempt, max_attempts } => {
                println!();
                println!("{}", format!("=== Attempt {}/{} ===", attempt, max_attempts).cyan().bold());
            }
            ProgressEvent::CandidateProduced { stage, has_body, .. } => {
                if self.verbose || !has_body {
                    let label = match stage {
                        Stage::Solve => "initial solution",
                        Stage::SelfImprove => "self-improved solution",
                        Stage::Correction => "corrected solution",
                    };
                    let note = if *has_body { "" } else { " (no detailed solution)" };
                    println!("  {} {}{}", "Produced".dimmed(), label, note.yellow());
                }
            }
            ProgressEvent::Verified {
                iteration,
                verdict,
                streak,
                errors,
                ..
            } => {
                let verdict = if verdict.is_valid() {
                    "valid".green()
                } else {
                    "invalid".red()
                };
                println!(
                    "  Iteration {:>2}: {}  streak={} errors={}",
                    iteration, verdict, streak, errors
                );
            }
            ProgressEvent::MissingBody { iteration, errors, .. } => {
                println!(
                    "  Iteration {:>2}: {}  errors={}",
                    iteration,
                    "unparseable".yellow(),
                    errors
                );
            }
            ProgressEvent::AttemptFinished { attempt, status, cause } => match (status, cause) {
                (LoopStatus::Success, _) => println!("{} Attempt {} verified", "Success:".green().bold(), attempt),
                (_, Some(cause)) => println!("{} Attempt {}: {}", "Failed:".red(), attempt, cause),
                _ => println!("{} Attempt {}", "Failed:".red(), attempt),
            },
        }
    }
}

/// Print the final outcome and the candidate text
pub fn print_result(result: &SolveResult) {
    println!();
    if result.is_success() {
        println!(
            "{} solution verified after {} attempt(s)",
            "Done:".green().bold(),
            result.attempts()
        );
    } else {
        println!(
            "{} verification was never satisfied in {} attempt(s)",
            "Failed:".red().bold(),
            result.attempts()
        );
    }

    match result.final_candidate() {
        Some(candidate) => {
            let heading = if result.is_success() {
                "Verified solution"
            } else {
                "Last candidate (unverified)"
            };
            println!("{}", format!("--- {} ---", heading).bold());
            println!("{}", candidate.raw);
        }
        None => println!("{}", "No candidate was produced".yellow()),
    }
}
