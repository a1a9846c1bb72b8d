//! Lazy type-length-value iteration.
//!
//! Two encodings share one iterator and differ only in the length field:
//!
//! | Encoding | Tag | Length | Used by |
//! |----------|-----|--------|---------|
//! | [`LengthEncoding::U8`] | 1 byte | 1 byte | metadata dispatch |
//! | [`LengthEncoding::U16Le`] | 1 byte | 2 bytes, little-endian | compass NAM options |
//!
//! Iteration stops at the first element whose header or value does not fit
//! in the remaining buffer. That tail is never yielded; the reason is kept
//! and can be read back through [`TlvIter::malformed`].

use tracing::debug;

use crate::error::ProtocolError;

/// Width and byte order of a TLV length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEncoding {
    /// One length byte.
    U8,
    /// Two length bytes, little-endian.
    U16Le,
}

impl LengthEncoding {
    /// Bytes taken by tag plus length.
    pub fn header_len(self) -> usize {
        match self {
            LengthEncoding::U8 => 2,
            LengthEncoding::U16Le => 3,
        }
    }

    fn read_length(self, header: &[u8]) -> usize {
        match self {
            LengthEncoding::U8 => header[1] as usize,
            LengthEncoding::U16Le => u16::from_le_bytes([header[1], header[2]]) as usize,
        }
    }
}

/// One decoded element, borrowing its value from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: u8,
    pub value: &'a [u8],
}

/// Iterator over the TLV elements of a buffer.
#[derive(Debug, Clone)]
pub struct TlvIter<'a> {
    data: &'a [u8],
    offset: usize,
    encoding: LengthEncoding,
    malformed: Option<ProtocolError>,
}

impl<'a> TlvIter<'a> {
    pub fn new(data: &'a [u8], encoding: LengthEncoding) -> Self {
        Self {
            data,
            offset: 0,
            encoding,
            malformed: None,
        }
    }

    /// Why iteration ended early, if it did.
    pub fn malformed(&self) -> Option<&ProtocolError> {
        self.malformed.as_ref()
    }

    fn stop(&mut self, err: ProtocolError) {
        debug!(encoding = ?self.encoding, "{err}");
        self.malformed = Some(err);
        self.offset = self.data.len();
    }
}

impl<'a> Iterator for TlvIter<'a> {
    type Item = Tlv<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        let rest = &data[self.offset..];
        if rest.is_empty() {
            return None;
        }

        let header_len = self.encoding.header_len();
        if rest.len() < header_len {
            self.stop(ProtocolError::TruncatedInput {
                protocol: "tlv",
                needed: header_len,
                have: rest.len(),
            });
            return None;
        }

        let length = self.encoding.read_length(rest);
        let available = rest.len() - header_len;
        if length > available {
            self.stop(ProtocolError::MalformedTlv {
                offset: self.offset,
                declared: length,
                available,
            });
            return None;
        }

        let tlv = Tlv {
            tag: rest[0],
            value: &rest[header_len..header_len + length],
        };
        self.offset += header_len + length;
        Some(tlv)
    }
}

/// Iterate metadata TLVs (1-byte tag, 1-byte length).
pub fn tlvs(data: &[u8]) -> TlvIter<'_> {
    TlvIter::new(data, LengthEncoding::U8)
}

/// Iterate compass option TLVs (1-byte tag, 2-byte little-endian length).
pub fn compass_tlvs(data: &[u8]) -> TlvIter<'_> {
    TlvIter::new(data, LengthEncoding::U16Le)
}
