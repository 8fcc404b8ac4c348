//! Tooling Layer
//!
//! Command-line front end for the encoder: argument parsing, input expansion
//! and output handling.

pub mod cli;
pub mod inputs;

pub use cli::{Cli, CliContext, ReportFormat};
pub use inputs::{expand_inputs, InputFile};
