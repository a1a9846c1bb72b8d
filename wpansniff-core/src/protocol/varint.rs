//! NDN variable-width unsigned integers.
//!
//! A leading marker byte selects the width: values below 253 are stored
//! inline, 253/254/255 announce a big-endian u16/u32/u64 that follows.

use crate::error::ProtocolError;

/// Marker for a following big-endian u16.
pub const VARNUM_U16: u8 = 253;
/// Marker for a following big-endian u32.
pub const VARNUM_U32: u8 = 254;
/// Marker for a following big-endian u64.
pub const VARNUM_U64: u8 = 255;

/// Decode one varint from the start of `data`.
///
/// Returns the value and the number of bytes consumed (1, 3, 5 or 9).
///
/// # Example
///
/// ```
/// use wpansniff_core::protocol::varint;
///
/// assert_eq!(varint::decode(&[0x07, 0xff]).unwrap(), (7, 1));
/// assert_eq!(varint::decode(&[0xfd, 0x01, 0x00]).unwrap(), (256, 3));
/// ```
pub fn decode(data: &[u8]) -> Result<(u64, usize), ProtocolError> {
    let first = *data.first().ok_or(ProtocolError::TruncatedInput {
        protocol: "varint",
        needed: 1,
        have: 0,
    })?;

    let width = match first {
        VARNUM_U16 => 2,
        VARNUM_U32 => 4,
        VARNUM_U64 => 8,
        b => return Ok((b as u64, 1)),
    };

    let needed = 1 + width;
    if data.len() < needed {
        return Err(ProtocolError::TruncatedInput {
            protocol: "varint",
            needed,
            have: data.len(),
        });
    }

    let value = data[1..needed]
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | *b as u64);
    Ok((value, needed))
}

#[cfg(test)]
pub(crate) fn encode(value: u64) -> Vec<u8> {
    if value < VARNUM_U16 as u64 {
        vec![value as u8]
    } else if value <= u16::MAX as u64 {
        let mut out = vec![VARNUM_U16];
        out.extend_from_slice(&(value as u16).to_be_bytes());
        out
    } else if value <= u32::MAX as u64 {
        let mut out = vec![VARNUM_U32];
        out.extend_from_slice(&(value as u32).to_be_bytes());
        out
    } else {
        let mut out = vec![VARNUM_U64];
        out.extend_from_slice(&value.to_be_bytes());
        out
    }
}
