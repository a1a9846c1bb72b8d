//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use super::OutputFormat;

/// Decode IEEE 802.15.4 sniffer captures into JSON records.
#[derive(Parser, Debug)]
#[command(name = "wpansniff")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// PCAP file ('-' for stdin), optionally gzip-compressed
    #[arg(
        short = 'i',
        long = "input-pcap",
        value_name = "FILE",
        env = "WPANSNIFF_INPUT",
        default_value = "-"
    )]
    pub input_pcap: PathBuf,

    /// Write records to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Prefix of every published topic
    #[arg(
        long = "topic-prefix",
        value_name = "PREFIX",
        env = "WPANSNIFF_TOPIC_PREFIX",
        default_value = "sniffer"
    )]
    pub topic_prefix: String,

    /// Output line style
    #[arg(long = "format", value_enum, default_value = "envelope")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
