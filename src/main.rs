//! wpansniff CLI entry point.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wpansniff::cli::Args;
use wpansniff::pipeline;
use wpansniff::publish::{JsonLinesPublisher, RecordPublisher, Topics};
use wpansniff_core::CaptureReader;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Logs go to stderr; stdout carries records
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    let reader = CaptureReader::open(&args.input_pcap).with_context(|| {
        format!("Failed to open capture: {}", args.input_pcap.display())
    })?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut publisher = RecordPublisher::new(
        JsonLinesPublisher::new(writer, args.format),
        Topics::new(args.topic_prefix),
    );
    pipeline::run(reader, &mut publisher)?;

    Ok(())
}
