//! Error types for wpansniff-core.
//!
//! Errors are split along the line that decides what a caller does next:
//!
//! - [`PcapError`] - setup failures of the capture stream. The run cannot
//!   continue.
//! - [`ProtocolError`] - a single frame could not be decoded. The frame is
//!   skipped and the stream continues.
//! - [`enum@Error`] - wraps both plus I/O errors from the underlying source.

use thiserror::Error;

/// Main error type for wpansniff-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or validating the capture file
    #[error("PCAP error: {0}")]
    Pcap(#[from] PcapError),

    /// Error while decoding a frame
    #[error("Protocol parse error: {0}")]
    Protocol(#[from] ProtocolError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the capture stream must stop after this error.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Pcap(_) | Error::Io(_) => true,
            Error::Protocol(e) => !e.is_recoverable(),
        }
    }
}

/// Errors related to capture file reading.
#[derive(Error, Debug)]
pub enum PcapError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Invalid PCAP format
    #[error("Invalid PCAP format: {reason}")]
    InvalidFormat { reason: String },

    /// Magic number is not 0xa1b2c3d4 in host byte order
    #[error("PCAP was not in native byte order (magic {magic:#010x})")]
    NonNativeByteOrder { magic: u32 },

    /// Link type is neither raw IEEE 802.15.4 nor Linux cooked
    #[error("PCAP does not contain pure IEEE 802.15.4 MAC (network {link_type})")]
    UnsupportedLinkType { link_type: u32 },
}

/// Errors raised while decoding a single frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes remain than the field needs
    #[error("{protocol}: truncated input (need {needed} bytes, have {have})")]
    TruncatedInput {
        protocol: &'static str,
        needed: usize,
        have: usize,
    },

    /// A TLV declares more value bytes than the buffer holds
    #[error("Unproper TLV structure at offset {offset}: length {declared}, {available} bytes left")]
    MalformedTlv {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// NDN TLV type outside Interest, Data, Name and NameComponent
    #[error("Unexpected NDN type {0}")]
    UnexpectedNdnType(u64),

    /// Any failure inside the NDN grammar, carrying the offending buffer
    #[error("Unexpected NDN packet {data:02x?}: {reason}")]
    MalformedNdnPacket {
        data: Vec<u8>,
        #[source]
        reason: Box<ProtocolError>,
    },

    /// Compass PAM prefix length runs past the end of the frame
    #[error("compass PAM prefix length {declared} exceeds {available} remaining bytes")]
    PrefixLengthMismatch { declared: usize, available: usize },

    /// MAC header without a usable source or destination address
    #[error("IEEE 802.15.4 header lacks a supported {which} address")]
    MissingAddress { which: &'static str },
}

impl ProtocolError {
    /// Per-frame decode errors never stop the stream.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
