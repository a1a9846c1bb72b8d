//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Output line style for published records

mod args;
mod output;

pub use args::Args;
pub use output::OutputFormat;
