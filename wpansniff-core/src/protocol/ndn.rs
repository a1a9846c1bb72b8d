//! NDN packet parser.
//!
//! Decodes just enough of the NDN TLV grammar to recover the packet type
//! and the hierarchical name:
//!
//! ```text
//! Interest | Data  := TYPE LENGTH Name *OtherField
//! Name             := 0x07 LENGTH 1*NameComponent
//! NameComponent    := 0x08 LENGTH *OCTET
//! ```
//!
//! TYPE and LENGTH are [`varint`](super::varint)s. Every element's value is
//! a sub-slice of its parent's value, so a LENGTH running past the enclosing
//! buffer is rejected before any descent.

use smallvec::SmallVec;

use super::varint;
use crate::error::ProtocolError;
use crate::format::decode_lossy;

pub const NDN_INTEREST_TYPE: u64 = 0x05;
pub const NDN_DATA_TYPE: u64 = 0x06;
pub const NDN_NAME_TYPE: u64 = 0x07;
pub const NDN_NAME_COMPONENT_TYPE: u64 = 0x08;

/// The NDN TLV types this parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdnType {
    Interest,
    Data,
    Name,
    NameComponent,
}

impl NdnType {
    pub fn as_u64(self) -> u64 {
        match self {
            NdnType::Interest => NDN_INTEREST_TYPE,
            NdnType::Data => NDN_DATA_TYPE,
            NdnType::Name => NDN_NAME_TYPE,
            NdnType::NameComponent => NDN_NAME_COMPONENT_TYPE,
        }
    }
}

impl TryFrom<u64> for NdnType {
    type Error = ProtocolError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            NDN_INTEREST_TYPE => Ok(NdnType::Interest),
            NDN_DATA_TYPE => Ok(NdnType::Data),
            NDN_NAME_TYPE => Ok(NdnType::Name),
            NDN_NAME_COMPONENT_TYPE => Ok(NdnType::NameComponent),
            other => Err(ProtocolError::UnexpectedNdnType(other)),
        }
    }
}

/// A decoded element.
///
/// `value` holds the raw bytes of a NameComponent, or the textual form of
/// the name (`/a/bc`) for Name, Interest and Data. For Interest and Data,
/// `length` is the consumed length of the wrapped Name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdnElement {
    pub tlv_type: NdnType,
    pub length: usize,
    pub value: Vec<u8>,
}

impl NdnElement {
    /// The value as text, dropping invalid UTF-8.
    pub fn label(&self) -> String {
        decode_lossy(&self.value)
    }
}

/// Parse the element at the start of `data`.
///
/// Every failure is reported as [`ProtocolError::MalformedNdnPacket`]
/// carrying `data`; callers skip the frame.
pub fn parse(data: &[u8]) -> Result<NdnElement, ProtocolError> {
    parse_element(data).map_err(|reason| ProtocolError::MalformedNdnPacket {
        data: data.to_vec(),
        reason: Box::new(reason),
    })
}

/// Type, header length and value of one element.
struct Header<'a> {
    tlv_type: NdnType,
    header_len: usize,
    value: &'a [u8],
}

impl Header<'_> {
    fn total_len(&self) -> usize {
        self.header_len + self.value.len()
    }
}

fn read_header(data: &[u8]) -> Result<Header<'_>, ProtocolError> {
    let (raw_type, type_len) = varint::decode(data)?;
    let (length, length_len) = varint::decode(&data[type_len..])?;
    let tlv_type = NdnType::try_from(raw_type)?;

    let header_len = type_len + length_len;
    let available = data.len() - header_len;
    let length = usize::try_from(length).unwrap_or(usize::MAX);
    if length > available {
        return Err(ProtocolError::TruncatedInput {
            protocol: "ndn",
            needed: header_len.saturating_add(length),
            have: data.len(),
        });
    }

    Ok(Header {
        tlv_type,
        header_len,
        value: &data[header_len..header_len + length],
    })
}

fn parse_element(data: &[u8]) -> Result<NdnElement, ProtocolError> {
    let header = read_header(data)?;

    match header.tlv_type {
        NdnType::Interest | NdnType::Data => {
            let name = parse_name(header.value)?;
            Ok(NdnElement {
                tlv_type: header.tlv_type,
                length: name.length,
                value: name.value,
            })
        }
        NdnType::Name => Ok(NdnElement {
            tlv_type: NdnType::Name,
            length: header.total_len(),
            value: join_components(header.value)?,
        }),
        NdnType::NameComponent => Ok(NdnElement {
            tlv_type: NdnType::NameComponent,
            length: header.total_len(),
            value: header.value.to_vec(),
        }),
    }
}

/// Parse a Name element; anything else in its place is an error.
fn parse_name(data: &[u8]) -> Result<NdnElement, ProtocolError> {
    let header = read_header(data)?;
    if header.tlv_type != NdnType::Name {
        return Err(ProtocolError::UnexpectedNdnType(header.tlv_type.as_u64()));
    }

    Ok(NdnElement {
        tlv_type: NdnType::Name,
        length: header.total_len(),
        value: join_components(header.value)?,
    })
}

/// Render the components of a Name's value as `/c1/c2/...`.
fn join_components(mut data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut components: SmallVec<[&[u8]; 8]> = SmallVec::new();

    // at least one component, then until the Name's value is exhausted
    loop {
        let header = read_header(data)?;
        if header.tlv_type != NdnType::NameComponent {
            return Err(ProtocolError::UnexpectedNdnType(header.tlv_type.as_u64()));
        }
        components.push(header.value);
        data = &data[header.total_len()..];
        if data.is_empty() {
            break;
        }
    }

    let mut name = Vec::with_capacity(components.iter().map(|c| c.len() + 1).sum());
    for component in components {
        name.push(b'/');
        name.extend_from_slice(component);
    }
    Ok(name)
}
