//! Byte sources and the raw records read from them.
//!
//! - [`DecompressReader`] - transparent gzip decoding over any `Read`
//! - [`RawRecord`] - one captured frame, owned

mod decompress;

pub use decompress::{Compression, DecompressReader};

use bytes::Bytes;

use crate::format::format_timestamp;

/// One frame read from a capture, with framing already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based position among the frames returned by the reader.
    pub frame_number: u64,
    /// Capture time in microseconds since the Unix epoch.
    pub timestamp_us: i64,
    /// The IEEE 802.15.4 MAC frame, without checksum or cooked header.
    pub data: Bytes,
}

impl RawRecord {
    /// Capture time as RFC 3339 UTC.
    pub fn time(&self) -> String {
        format_timestamp(self.timestamp_us)
    }
}
