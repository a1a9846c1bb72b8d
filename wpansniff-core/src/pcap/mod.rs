//! Capture file reading.
//!
//! Only classic pcap in the host's byte order is accepted, carrying one of:
//!
//! | Link type | Value | Checksum | Cooked header |
//! |-----------|-------|----------|---------------|
//! | `LINKTYPE_IEEE802_15_4_WITHFCS` | 195 | yes | no |
//! | `LINKTYPE_IEEE802_15_4_NOFCS` | 230 | no | no |
//! | `LINKTYPE_LINUX_SLL` | 113 | yes | yes |

mod reader;

pub use reader::{CaptureReader, CaptureSource};

pub use crate::protocol::linux_sll::LINKTYPE_LINUX_SLL;

/// Magic number of a microsecond-resolution pcap file.
pub const PCAP_MAGIC: u32 = 0xa1b2c3d4;

/// Raw 802.15.4 frames followed by a 2-byte FCS.
pub const LINKTYPE_IEEE802_15_4_WITHFCS: u32 = 195;

/// Raw 802.15.4 frames without FCS.
pub const LINKTYPE_IEEE802_15_4_NOFCS: u32 = 230;

/// Global header length.
pub const PCAP_HEADER_LEN: usize = 24;

/// Per-record header length.
pub const RECORD_HEADER_LEN: usize = 16;

/// Trailing frame check sequence length.
pub const FCS_LEN: usize = 2;
