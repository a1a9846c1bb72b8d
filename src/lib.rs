//! wpansniff - decode IEEE 802.15.4 sniffer captures into JSON records.
//!
//! The decoding itself lives in [`wpansniff_core`]; this crate adds the
//! command line, topic scheme and publishing.
//!
//! # Example
//!
//! ```no_run
//! use wpansniff::cli::OutputFormat;
//! use wpansniff::publish::{JsonLinesPublisher, RecordPublisher, Topics};
//! use wpansniff_core::CaptureReader;
//!
//! let reader = CaptureReader::open("capture.pcap")?;
//! let sink = JsonLinesPublisher::new(std::io::stdout(), OutputFormat::Envelope);
//! let mut publisher = RecordPublisher::new(sink, Topics::new("sniffer"));
//! let summary = wpansniff::pipeline::run(reader, &mut publisher)?;
//! println!("{} frames", summary.frames);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod pipeline;
pub mod publish;

pub use wpansniff_core::{Error, Record};
