//! IEEE 802.15.4 MAC header parser.
//!
//! Only the parts needed to attribute a frame are decoded: the frame type,
//! the security bit and the source/destination addresses. PAN ids are
//! skipped. The frame check sequence is never validated.

use std::fmt;

use crate::error::ProtocolError;
use crate::format::{format_ext_addr, format_short_addr, BROADCAST};

/// Frame control + sequence number.
pub const MHR_FIXED_LEN: usize = 3;

/// Short address reserved for broadcast.
pub const BROADCAST_SHORT_ADDR: u16 = 0xffff;

const FCF_FRAME_TYPE_MASK: u16 = 0x0007;
const FCF_SECURITY_ENABLED: u16 = 0x0008;
const FCF_PAN_ID_COMPRESSION: u16 = 0x0040;
const FCF_DST_MODE_SHIFT: u16 = 10;
const FCF_SRC_MODE_SHIFT: u16 = 14;

/// Frame type from bits 0-2 of the frame control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Beacon,
    Data,
    Ack,
    Command,
    Reserved(u8),
}

impl From<u16> for FrameType {
    fn from(fcf: u16) -> Self {
        match (fcf & FCF_FRAME_TYPE_MASK) as u8 {
            0 => FrameType::Beacon,
            1 => FrameType::Data,
            2 => FrameType::Ack,
            3 => FrameType::Command,
            other => FrameType::Reserved(other),
        }
    }
}

/// Addressing mode of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    None,
    Reserved,
    Short,
    Extended,
}

impl AddrMode {
    fn from_bits(bits: u16) -> Self {
        match bits & 0x3 {
            0 => AddrMode::None,
            1 => AddrMode::Reserved,
            2 => AddrMode::Short,
            _ => AddrMode::Extended,
        }
    }

    fn addr_len(self) -> Option<usize> {
        match self {
            AddrMode::Short => Some(2),
            AddrMode::Extended => Some(8),
            AddrMode::None | AddrMode::Reserved => None,
        }
    }
}

/// A decoded link-layer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacAddress {
    Short(u16),
    Extended(u64),
    Broadcast,
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacAddress::Short(addr) => f.write_str(&format_short_addr(*addr)),
            MacAddress::Extended(addr) => f.write_str(&format_ext_addr(*addr)),
            MacAddress::Broadcast => f.write_str(BROADCAST),
        }
    }
}

/// Parsed subset of a MAC header.
///
/// A `header_len` of 0 marks a frame outside the decoded scope (not a data
/// frame, or security enabled); such headers carry no addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacHeader {
    pub frame_type: FrameType,
    pub security_enabled: bool,
    pub dst: Option<MacAddress>,
    pub src: Option<MacAddress>,
    pub header_len: usize,
}

impl MacHeader {
    /// Whether the frame should be passed on to payload decoding.
    pub fn is_decodable(&self) -> bool {
        self.header_len > 0
    }
}

/// Parse the MAC header at the start of `frame`.
pub fn parse(frame: &[u8]) -> Result<MacHeader, ProtocolError> {
    if frame.len() < 2 {
        return Err(truncated(2, frame.len()));
    }

    let fcf = u16::from_le_bytes([frame[0], frame[1]]);
    let frame_type = FrameType::from(fcf);
    let security_enabled = fcf & FCF_SECURITY_ENABLED != 0;

    let mut header = MacHeader {
        frame_type,
        security_enabled,
        dst: None,
        src: None,
        header_len: 0,
    };

    if frame_type != FrameType::Data || security_enabled {
        return Ok(header);
    }

    let dst_mode = AddrMode::from_bits(fcf >> FCF_DST_MODE_SHIFT);
    let src_mode = AddrMode::from_bits(fcf >> FCF_SRC_MODE_SHIFT);
    let pan_id_compression = fcf & FCF_PAN_ID_COMPRESSION != 0;

    let mut offset = MHR_FIXED_LEN;

    if let Some(len) = dst_mode.addr_len() {
        // destination PAN id
        offset += 2;
        header.dst = Some(match read_addr(frame, offset, len)? {
            MacAddress::Short(BROADCAST_SHORT_ADDR) => MacAddress::Broadcast,
            addr => addr,
        });
        offset += len;
    }

    if !pan_id_compression {
        // source PAN id
        offset += 2;
    }

    if let Some(len) = src_mode.addr_len() {
        header.src = Some(read_addr(frame, offset, len)?);
        offset += len;
    }

    if offset > frame.len() {
        return Err(truncated(offset, frame.len()));
    }

    header.header_len = offset;
    Ok(header)
}

fn read_addr(frame: &[u8], offset: usize, len: usize) -> Result<MacAddress, ProtocolError> {
    let bytes = frame
        .get(offset..offset + len)
        .ok_or_else(|| truncated(offset + len, frame.len()))?;

    Ok(match len {
        2 => MacAddress::Short(u16::from_le_bytes([bytes[0], bytes[1]])),
        _ => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            MacAddress::Extended(u64::from_le_bytes(raw))
        }
    })
}

fn truncated(needed: usize, have: usize) -> ProtocolError {
    ProtocolError::TruncatedInput {
        protocol: "ieee802154",
        needed,
        have,
    }
}
