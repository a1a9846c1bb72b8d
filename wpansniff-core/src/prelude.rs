//! Convenient re-exports for common usage.
//!
//! ```rust,no_run
//! use wpansniff_core::prelude::*;
//!
//! let mut classifier = FrameClassifier::new();
//! let records: Vec<Record> = classifier.classify(&[0x41, 0x88], 0);
//! ```

// Reading
pub use crate::io::RawRecord;
pub use crate::pcap::CaptureReader;

// Classification
pub use crate::classify::FrameClassifier;
pub use crate::record::Record;

// Error types
pub use crate::error::{Error, Result};
