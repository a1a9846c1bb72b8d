//! Frame and payload parsers.
//!
//! Layers, outermost first:
//!
//! - [`linux_sll`] - Linux cooked capture header (framing only)
//! - [`ieee802154`] - MAC header and addresses
//! - [`meta`] - metadata TLVs ([`tlv`] encoding A)
//! - [`compass`] - PAM/NAM/SOL routing control ([`tlv`] encoding B)
//! - [`ndn`] - Interest/Data names ([`varint`] TLVs)
//!
//! Every parser works on borrowed byte slices and reports failures as
//! [`ProtocolError`](crate::error::ProtocolError); none of them keeps state
//! between frames.

pub mod compass;
pub mod ieee802154;
pub mod linux_sll;
pub mod meta;
pub mod ndn;
pub mod tlv;
pub mod varint;

#[cfg(test)]
pub mod test_utils;

pub use compass::CompassMessage;
pub use ieee802154::{FrameType, MacAddress, MacHeader};
pub use linux_sll::LinuxSllHeader;
pub use meta::MetaType;
pub use ndn::{NdnElement, NdnType};
pub use tlv::{LengthEncoding, Tlv, TlvIter};
