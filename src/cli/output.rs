//! Output line styles.

use std::fmt;

use clap::ValueEnum;

/// How each publication is written as a JSON line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"topic": ..., "payload": ...}` (default)
    Envelope,
    /// The payload alone
    Payload,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Envelope => write!(f, "envelope"),
            OutputFormat::Payload => write!(f, "payload"),
        }
    }
}
