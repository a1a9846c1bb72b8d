//! Linux SLL (Sockaddr Link Layer) header parser.
//!
//! Parses Linux cooked capture headers (LINKTYPE_LINUX_SLL = 113), as
//! written when sniffing a Linux 802.15.4 interface (e.g. through a
//! monitor device). Only captures whose protocol field is
//! [`ETH_P_IEEE802154`] carry frames this crate can decode.

/// PCAP link type for Linux SLL captures.
pub const LINKTYPE_LINUX_SLL: u32 = 113;

/// Linux SLL header length in bytes.
pub const LINUX_SLL_HEADER_LEN: usize = 16;

/// Protocol field value for IEEE 802.15.4 MAC frames.
pub const ETH_P_IEEE802154: u16 = 0x00f6;

/// Decoded Linux SLL header. All fields are big-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinuxSllHeader {
    pub packet_type: u16,
    pub arphrd_type: u16,
    pub addr_len: u16,
    pub addr: [u8; 8],
    pub protocol: u16,
}

impl LinuxSllHeader {
    /// Parse the 16-byte header. Returns `None` if `data` is too short.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < LINUX_SLL_HEADER_LEN {
            return None;
        }

        let mut addr = [0u8; 8];
        addr.copy_from_slice(&data[6..14]);

        Some(Self {
            packet_type: u16::from_be_bytes([data[0], data[1]]),
            arphrd_type: u16::from_be_bytes([data[2], data[3]]),
            addr_len: u16::from_be_bytes([data[4], data[5]]),
            addr,
            protocol: u16::from_be_bytes([data[14], data[15]]),
        })
    }

    /// Whether the wrapped frame is an IEEE 802.15.4 MAC frame.
    pub fn is_ieee802154(&self) -> bool {
        self.protocol == ETH_P_IEEE802154
    }

    /// The valid portion of the link-layer address, logged when a record is skipped.
    pub fn link_addr(&self) -> &[u8] {
        &self.addr[..(self.addr_len as usize).min(8)]
    }
}
