//! Compression detection and decompression support.
//!
//! Captures are often archived gzip-compressed. [`Compression::detect`]
//! sniffs the leading bytes and [`DecompressReader`] decodes on the fly, so
//! the capture reader only ever sees plain pcap bytes.

use std::fmt;
use std::io::{self, Read};

use flate2::read::GzDecoder;

/// Gzip member magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Detected compression format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// No compression
    None,
    /// Gzip (.gz)
    Gzip,
}

impl Compression {
    /// Detect compression format from magic bytes.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
        }
    }
}

/// Reader that decodes the detected compression format.
///
/// Enum dispatch keeps the reader generic over `R` without boxing.
pub enum DecompressReader<R: Read> {
    /// No compression - pass-through
    None(R),
    /// Gzip decompression
    Gzip(GzDecoder<R>),
}

impl<R: Read> DecompressReader<R> {
    /// Wrap `source` according to `compression`.
    pub fn new(source: R, compression: Compression) -> Self {
        match compression {
            Compression::None => DecompressReader::None(source),
            Compression::Gzip => DecompressReader::Gzip(GzDecoder::new(source)),
        }
    }
}

impl<R: Read> Read for DecompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DecompressReader::None(r) => r.read(buf),
            DecompressReader::Gzip(r) => r.read(buf),
        }
    }
}
