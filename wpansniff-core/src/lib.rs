//! # wpansniff-core
//!
//! Decoding pipeline for IEEE 802.15.4 sniffer captures.
//!
//! Frames are read from a pcap file, their MAC header is parsed, and the
//! payload is classified into one of the testbed's micro-protocols:
//! node metadata, the compass routing-control protocol, or NDN
//! Interest/Data packets. The result is a stream of normalized,
//! JSON-serializable [`Record`]s.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wpansniff_core::prelude::*;
//!
//! let reader = CaptureReader::open("capture.pcap")?;
//! let mut classifier = FrameClassifier::new();
//!
//! for record in reader {
//!     let record = record?;
//!     for out in classifier.classify(&record.data, record.timestamp_us) {
//!         println!("{}", serde_json::to_string(&out).unwrap_or_default());
//!     }
//! }
//! # Ok::<(), wpansniff_core::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        wpansniff-core                               |
//! +---------------------------------------------------------------------+
//! |  pcap/       - CaptureReader, link types, framing                   |
//! |  io/         - RawRecord, gzip decompression                        |
//! |  protocol/   - 802.15.4, Linux SLL, TLV, varint, meta, compass, NDN |
//! |  classify    - FrameClassifier, payload dispatch                    |
//! |  record      - normalized output records                            |
//! |  format/     - address, text and timestamp formatting               |
//! |  error/      - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```

pub mod classify;
pub mod error;
pub mod format;
pub mod io;
pub mod pcap;
pub mod prelude;
pub mod protocol;
pub mod record;

// Re-export commonly used types at crate root for convenience
pub use classify::{ClassifiedFrame, Dispatch, FrameClassifier};
pub use error::{Error, PcapError, ProtocolError, Result};
pub use io::{Compression, RawRecord};
pub use pcap::CaptureReader;
pub use record::{CacheInfo, NodeInfo, PacketInfo, Record, RouteInfo};
