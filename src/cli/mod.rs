//! CLI module for proofr - command-line surface.

pub mod commands;

pub use commands::Cli;
