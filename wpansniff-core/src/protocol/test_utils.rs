//! Test utilities for frame decoding.
//!
//! Provides builders for constructing MAC frames, NDN packets and whole
//! capture files in memory.

use super::linux_sll::{ETH_P_IEEE802154, LINKTYPE_LINUX_SLL, LINUX_SLL_HEADER_LEN};
use super::varint;
use crate::pcap::{LINKTYPE_IEEE802_15_4_NOFCS, LINKTYPE_IEEE802_15_4_WITHFCS, PCAP_MAGIC};

#[derive(Debug, Clone, Copy)]
enum Addr {
    None,
    Short(u16),
    Ext(u64),
}

impl Addr {
    fn mode(self) -> u16 {
        match self {
            Addr::None => 0,
            Addr::Short(_) => 2,
            Addr::Ext(_) => 3,
        }
    }

    fn write(self, out: &mut Vec<u8>) {
        match self {
            Addr::None => {}
            Addr::Short(a) => out.extend_from_slice(&a.to_le_bytes()),
            Addr::Ext(a) => out.extend_from_slice(&a.to_le_bytes()),
        }
    }
}

/// Builder for IEEE 802.15.4 MAC frames.
#[derive(Debug, Clone)]
pub struct MacHeaderBuilder {
    frame_type: u16,
    security: bool,
    pan_id_compression: bool,
    seq: u8,
    pan_id: u16,
    dst: Addr,
    src: Addr,
    payload: Vec<u8>,
}

impl Default for MacHeaderBuilder {
    fn default() -> Self {
        Self {
            frame_type: 1, // data
            security: false,
            pan_id_compression: true,
            seq: 0,
            pan_id: 0x0023,
            dst: Addr::Short(0xffff),
            src: Addr::Short(0x1234),
            payload: Vec::new(),
        }
    }
}

impl MacHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_type(mut self, frame_type: u16) -> Self {
        self.frame_type = frame_type;
        self
    }

    pub fn security(mut self, enabled: bool) -> Self {
        self.security = enabled;
        self
    }

    pub fn pan_id_compression(mut self, enabled: bool) -> Self {
        self.pan_id_compression = enabled;
        self
    }

    pub fn dst_short(mut self, addr: u16) -> Self {
        self.dst = Addr::Short(addr);
        self
    }

    pub fn dst_ext(mut self, addr: u64) -> Self {
        self.dst = Addr::Ext(addr);
        self
    }

    pub fn no_dst(mut self) -> Self {
        self.dst = Addr::None;
        self
    }

    pub fn src_short(mut self, addr: u16) -> Self {
        self.src = Addr::Short(addr);
        self
    }

    pub fn src_ext(mut self, addr: u64) -> Self {
        self.src = Addr::Ext(addr);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut fcf = self.frame_type & 0x7;
        if self.security {
            fcf |= 0x0008;
        }
        if self.pan_id_compression {
            fcf |= 0x0040;
        }
        fcf |= self.dst.mode() << 10;
        fcf |= self.src.mode() << 14;

        let mut frame = Vec::with_capacity(23 + self.payload.len());
        frame.extend_from_slice(&fcf.to_le_bytes());
        frame.push(self.seq);
        if !matches!(self.dst, Addr::None) {
            frame.extend_from_slice(&self.pan_id.to_le_bytes());
            self.dst.write(&mut frame);
        }
        if !self.pan_id_compression {
            frame.extend_from_slice(&self.pan_id.to_le_bytes());
        }
        self.src.write(&mut frame);
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder helpers for NDN TLV packets.
pub struct NdnBuilder;

impl NdnBuilder {
    /// Encode `TYPE LENGTH value`.
    pub fn wrap(tlv_type: u64, value: &[u8]) -> Vec<u8> {
        let mut out = varint::encode(tlv_type);
        out.extend(varint::encode(value.len() as u64));
        out.extend_from_slice(value);
        out
    }

    /// Encode a Name from its components.
    pub fn name(components: &[&str]) -> Vec<u8> {
        let mut value = Vec::new();
        for component in components {
            value.extend(Self::wrap(super::ndn::NDN_NAME_COMPONENT_TYPE, component.as_bytes()));
        }
        Self::wrap(super::ndn::NDN_NAME_TYPE, &value)
    }

    pub fn interest(components: &[&str]) -> Vec<u8> {
        Self::wrap(super::ndn::NDN_INTEREST_TYPE, &Self::name(components))
    }

    pub fn data(components: &[&str]) -> Vec<u8> {
        Self::wrap(super::ndn::NDN_DATA_TYPE, &Self::name(components))
    }
}

/// Framing variants of a capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    NoFcs,
    WithFcs,
    LinuxCooked,
}

impl Framing {
    fn link_type(self) -> u32 {
        match self {
            Framing::NoFcs => LINKTYPE_IEEE802_15_4_NOFCS,
            Framing::WithFcs => LINKTYPE_IEEE802_15_4_WITHFCS,
            Framing::LinuxCooked => LINKTYPE_LINUX_SLL,
        }
    }
}

/// Builder for native-order capture files.
#[derive(Debug, Clone)]
pub struct CaptureBuilder {
    framing: Framing,
    data: Vec<u8>,
}

impl CaptureBuilder {
    pub fn new(framing: Framing) -> Self {
        Self::with_link_type(framing, framing.link_type())
    }

    /// Start a capture with an arbitrary link type in the global header.
    pub fn with_link_type(framing: Framing, link_type: u32) -> Self {
        let mut data = Vec::with_capacity(24);
        data.extend_from_slice(&PCAP_MAGIC.to_ne_bytes());
        data.extend_from_slice(&2u16.to_ne_bytes()); // version major
        data.extend_from_slice(&4u16.to_ne_bytes()); // version minor
        data.extend_from_slice(&0i32.to_ne_bytes()); // thiszone
        data.extend_from_slice(&0u32.to_ne_bytes()); // sigfigs
        data.extend_from_slice(&65535u32.to_ne_bytes()); // snaplen
        data.extend_from_slice(&link_type.to_ne_bytes());
        Self { framing, data }
    }

    /// Append a record carrying `frame`, with the cooked protocol set to 802.15.4.
    pub fn frame(self, ts_sec: u32, ts_usec: u32, frame: &[u8]) -> Self {
        self.frame_with_protocol(ts_sec, ts_usec, frame, ETH_P_IEEE802154)
    }

    /// Append a record; `protocol` only matters for Linux cooked framing.
    pub fn frame_with_protocol(mut self, ts_sec: u32, ts_usec: u32, frame: &[u8], protocol: u16) -> Self {
        let fcs = [0xde, 0xad];
        let incl_len = match self.framing {
            Framing::NoFcs | Framing::WithFcs => frame.len(),
            Framing::LinuxCooked => LINUX_SLL_HEADER_LEN + frame.len() + fcs.len(),
        } as u32;

        self.data.extend_from_slice(&ts_sec.to_ne_bytes());
        self.data.extend_from_slice(&ts_usec.to_ne_bytes());
        self.data.extend_from_slice(&incl_len.to_ne_bytes());
        self.data.extend_from_slice(&incl_len.to_ne_bytes());

        if self.framing == Framing::LinuxCooked {
            self.data.extend_from_slice(&0u16.to_be_bytes()); // packet type: host
            self.data.extend_from_slice(&805u16.to_be_bytes()); // ARPHRD_IEEE802154_MONITOR
            self.data.extend_from_slice(&0u16.to_be_bytes()); // addr len
            self.data.extend_from_slice(&[0u8; 8]);
            self.data.extend_from_slice(&protocol.to_be_bytes());
        }

        self.data.extend_from_slice(frame);
        if self.framing != Framing::NoFcs {
            self.data.extend_from_slice(&fcs);
        }
        self
    }

    /// Append raw bytes (e.g. a truncated trailing record).
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_builder_default() {
        let frame = MacHeaderBuilder::new().payload(vec![0xaa]).build();

        assert_eq!(&frame[0..2], &[0x41, 0x88]); // data, PAN compression, short/short
        assert_eq!(&frame[5..7], &[0xff, 0xff]); // dst
        assert_eq!(&frame[7..9], &[0x34, 0x12]); // src
        assert_eq!(frame.len(), 10);
    }

    #[test]
    fn test_ndn_builder_interest() {
        assert_eq!(
            NdnBuilder::interest(&["foo"]),
            vec![0x05, 0x07, 0x07, 0x05, 0x08, 0x03, b'f', b'o', b'o']
        );
    }

    #[test]
    fn test_capture_builder_cooked_length() {
        let capture = CaptureBuilder::new(Framing::LinuxCooked)
            .frame(1, 2, &[0x01, 0x02])
            .build();

        // 24 global + 16 record + 16 SLL + 2 frame + 2 FCS
        assert_eq!(capture.len(), 60);
        let incl_len = u32::from_ne_bytes([capture[32], capture[33], capture[34], capture[35]]);
        assert_eq!(incl_len, 20);
    }
}
