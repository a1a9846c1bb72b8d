//! Frame classification.
//!
//! [`FrameClassifier`] turns one MAC frame into normalized [`Record`]s. The
//! first payload byte after the MAC header selects the decoder:
//!
//! | First byte | Decoder | Records |
//! |------------|---------|---------|
//! | `0x00` | [`meta`] | zero or more metadata records |
//! | `0x80` | [`compass`] | one `pam`, `nam`, `sol` or `unknown` |
//! | other | [`ndn`] | one `interest`, `data` or `unknown` |
//!
//! Compass and NDN frames are numbered per classifier, so each capture
//! stream should get its own instance.

use tracing::{debug, warn};

use crate::error::ProtocolError;
use crate::format::format_timestamp;
use crate::protocol::compass::{self, CompassMessage};
use crate::protocol::ieee802154;
use crate::protocol::meta;
use crate::protocol::ndn::{self, NdnType};
use crate::record::{PacketInfo, Record};

/// First payload byte of a metadata frame.
pub const META_DISPATCH: u8 = 0x00;

/// First payload byte of a compass frame.
pub const CPS_DISPATCH: u8 = 0x80;

/// Top-level payload protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Metadata,
    Compass,
    Ndn,
}

impl From<u8> for Dispatch {
    fn from(first: u8) -> Self {
        match first {
            META_DISPATCH => Dispatch::Metadata,
            CPS_DISPATCH => Dispatch::Compass,
            _ => Dispatch::Ndn,
        }
    }
}

/// Outcome of classifying one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedFrame {
    /// Out of scope or undecodable; nothing to publish.
    Skipped,
    /// Metadata sent by `src`. `records` may be empty.
    Metadata { src: String, records: Vec<Record> },
    /// One numbered packet record.
    Packet(Record),
}

impl ClassifiedFrame {
    pub fn records(&self) -> &[Record] {
        match self {
            ClassifiedFrame::Skipped => &[],
            ClassifiedFrame::Metadata { records, .. } => records,
            ClassifiedFrame::Packet(record) => std::slice::from_ref(record),
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            ClassifiedFrame::Skipped => Vec::new(),
            ClassifiedFrame::Metadata { records, .. } => records,
            ClassifiedFrame::Packet(record) => vec![record],
        }
    }
}

/// Per-stream frame classifier.
#[derive(Debug, Default)]
pub struct FrameClassifier {
    pkt_count: u64,
}

impl FrameClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence numbers handed out so far; also the next one.
    pub fn packet_count(&self) -> u64 {
        self.pkt_count
    }

    /// Classify a frame into its records, logging and dropping any decode failure.
    pub fn classify(&mut self, frame: &[u8], timestamp_us: i64) -> Vec<Record> {
        self.classify_frame(frame, timestamp_us).into_records()
    }

    /// Like [`classify`](Self::classify), but keeps metadata frames apart
    /// from skipped ones.
    pub fn classify_frame(&mut self, frame: &[u8], timestamp_us: i64) -> ClassifiedFrame {
        match self.try_classify(frame, timestamp_us) {
            Ok(classified) => classified,
            Err(e @ ProtocolError::MalformedNdnPacket { .. }) => {
                warn!("{e}");
                ClassifiedFrame::Skipped
            }
            Err(e) => {
                debug!(error = %e, "dropping frame");
                ClassifiedFrame::Skipped
            }
        }
    }

    /// Classify a frame.
    ///
    /// Frames outside the decoded scope (non-data, secured) give
    /// [`ClassifiedFrame::Skipped`]. Every addressed compass or NDN frame
    /// takes the next sequence number before its body is decoded, so a
    /// frame that fails to decode still consumes one.
    pub fn try_classify(&mut self, frame: &[u8], timestamp_us: i64) -> Result<ClassifiedFrame, ProtocolError> {
        let header = ieee802154::parse(frame)?;
        if !header.is_decodable() {
            debug!(
                frame_type = ?header.frame_type,
                security = header.security_enabled,
                "skipping frame"
            );
            return Ok(ClassifiedFrame::Skipped);
        }

        let dst = header.dst.ok_or(ProtocolError::MissingAddress { which: "destination" })?;
        let src = header.src.ok_or(ProtocolError::MissingAddress { which: "source" })?;

        let payload = &frame[header.header_len..];
        let Some((&first, body)) = payload.split_first() else {
            return Err(ProtocolError::TruncatedInput {
                protocol: "dispatch",
                needed: 1,
                have: 0,
            });
        };

        let src = src.to_string();
        let dispatch = Dispatch::from(first);
        if dispatch == Dispatch::Metadata {
            return Ok(ClassifiedFrame::Metadata {
                records: meta::decode(&src, body),
                src,
            });
        }

        let seq = self.pkt_count;
        self.pkt_count += 1;

        let packet = |label: Option<String>| PacketInfo {
            seq,
            dst: dst.to_string(),
            src: src.clone(),
            time: format_timestamp(timestamp_us),
            label,
        };

        let record = if dispatch == Dispatch::Compass {
            match compass::decode(body)? {
                CompassMessage::Pam { prefix } => Record::Pam(packet(Some(prefix))),
                CompassMessage::Nam { name } => Record::Nam(packet(name)),
                CompassMessage::Sol => Record::Sol(packet(None)),
                CompassMessage::Unknown(msg_type) => {
                    debug!(msg_type, "unknown compass message");
                    Record::Unknown(packet(None))
                }
            }
        } else {
            let element = ndn::parse(payload)?;
            match element.tlv_type {
                NdnType::Interest => Record::Interest(packet(Some(element.label()))),
                NdnType::Data => Record::Data(packet(Some(element.label()))),
                NdnType::Name | NdnType::NameComponent => Record::Unknown(packet(None)),
            }
        };

        debug!(seq, kind = record.kind(), "decoded packet");
        Ok(ClassifiedFrame::Packet(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_utils::{MacHeaderBuilder, NdnBuilder};

    fn frame(payload: Vec<u8>) -> Vec<u8> {
        MacHeaderBuilder::new().payload(payload).build()
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(Dispatch::from(0x00), Dispatch::Metadata);
        assert_eq!(Dispatch::from(0x80), Dispatch::Compass);
        assert_eq!(Dispatch::from(0x05), Dispatch::Ndn);
        assert_eq!(Dispatch::from(0xc2), Dispatch::Ndn);
    }

    #[test]
    fn test_metadata_frame() {
        let mut classifier = FrameClassifier::new();

        let classified = classifier.classify_frame(&frame(vec![0x00, 0x02, 0x01, 0x05]), 0);

        let ClassifiedFrame::Metadata { src, records } = classified else {
            panic!("expected a metadata frame");
        };
        assert_eq!(src, "12:34");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), "cache-info");
        // metadata does not consume sequence numbers
        assert_eq!(classifier.packet_count(), 0);
    }

    #[test]
    fn test_label_only_metadata_frame_is_kept() {
        let mut classifier = FrameClassifier::new();
        let payload = vec![0x00, 0x01, 0x02, b'n', b'1']; // node label only

        assert_eq!(
            classifier.classify_frame(&frame(payload.clone()), 0),
            ClassifiedFrame::Metadata {
                src: "12:34".into(),
                records: Vec::new(),
            }
        );
        assert!(classifier.classify(&frame(payload), 0).is_empty());
    }

    #[test]
    fn test_sol_frame() {
        let mut classifier = FrameClassifier::new();

        let records = classifier.classify(&frame(vec![0x80, 0xc2]), 1_000_000);

        assert_eq!(
            records,
            vec![Record::Sol(PacketInfo {
                seq: 0,
                dst: "broadcast".into(),
                src: "12:34".into(),
                time: "1970-01-01T00:00:01.000000Z".into(),
                label: None,
            })]
        );
    }

    #[test]
    fn test_interest_frame() {
        let mut classifier = FrameClassifier::new();
        let mac = MacHeaderBuilder::new()
            .dst_short(0x0001)
            .src_ext(0x0011_2233_4455_6677)
            .payload(NdnBuilder::interest(&["foo"]))
            .build();

        let records = classifier.classify(&mac, 0);
        let packet = records[0].packet().unwrap();

        assert_eq!(records[0].kind(), "interest");
        assert_eq!(packet.label.as_deref(), Some("/foo"));
        assert_eq!(packet.dst, "00:01");
        assert_eq!(packet.src, "00:11:22:33:44:55:66:77");
    }

    #[test]
    fn test_data_frame() {
        let mut classifier = FrameClassifier::new();

        let records = classifier.classify(&frame(NdnBuilder::data(&["a", "bc"])), 0);

        assert_eq!(records[0].kind(), "data");
        assert_eq!(records[0].packet().unwrap().label.as_deref(), Some("/a/bc"));
    }

    #[test]
    fn test_bare_name_is_unknown() {
        let mut classifier = FrameClassifier::new();

        let records = classifier.classify(&frame(NdnBuilder::name(&["x"])), 0);

        assert_eq!(records[0].kind(), "unknown");
        assert_eq!(records[0].packet().unwrap().label, None);
    }

    #[test]
    fn test_dropped_frames_consume_sequence_numbers() {
        let mut classifier = FrameClassifier::new();

        classifier.classify(&frame(vec![0x80, 0xc2]), 0);
        assert!(classifier.classify(&frame(vec![0x64, 0x00]), 0).is_empty()); // malformed NDN
        classifier.classify(&frame(vec![0x00, 0x02, 0x01, 0x01]), 0); // metadata
        classifier.classify(&MacHeaderBuilder::new().frame_type(0).payload(vec![0x80, 0xc2]).build(), 0);
        let records = classifier.classify(&frame(vec![0x80, 0xc1]), 0);

        assert_eq!(records[0].packet().unwrap().seq, 2);
        assert_eq!(classifier.packet_count(), 3);
    }

    #[test]
    fn test_malformed_ndn_yields_nothing() {
        let mut classifier = FrameClassifier::new();

        let err = classifier.try_classify(&frame(vec![0x05, 0x10, 0x07]), 0).unwrap_err();

        assert!(matches!(err, ProtocolError::MalformedNdnPacket { .. }));
        assert!(classifier.classify(&frame(vec![0x05, 0x10, 0x07]), 0).is_empty());
    }

    #[test]
    fn test_pam_length_mismatch_is_dropped() {
        let mut classifier = FrameClassifier::new();
        let payload = vec![0x80, 0xc0, 0, 0, 0, 0, 0x09, 0x00, b'/'];

        assert!(matches!(
            classifier.try_classify(&frame(payload.clone()), 0),
            Err(ProtocolError::PrefixLengthMismatch { declared: 9, available: 1 })
        ));
        assert!(classifier.classify(&frame(payload), 0).is_empty());
        assert_eq!(classifier.packet_count(), 2);
    }

    #[test]
    fn test_non_data_and_secured_frames_are_skipped() {
        let mut classifier = FrameClassifier::new();
        let beacon = MacHeaderBuilder::new().frame_type(0).payload(vec![0x80, 0xc2]).build();
        let secured = MacHeaderBuilder::new().security(true).payload(vec![0x80, 0xc2]).build();

        assert_eq!(classifier.try_classify(&beacon, 0), Ok(ClassifiedFrame::Skipped));
        assert_eq!(classifier.try_classify(&secured, 0), Ok(ClassifiedFrame::Skipped));
        assert_eq!(classifier.packet_count(), 0);
    }

    #[test]
    fn test_missing_address() {
        let mut classifier = FrameClassifier::new();
        let mac = MacHeaderBuilder::new().no_dst().payload(vec![0x80, 0xc2]).build();

        assert_eq!(
            classifier.try_classify(&mac, 0),
            Err(ProtocolError::MissingAddress { which: "destination" })
        );
        assert_eq!(classifier.packet_count(), 0);
    }

    #[test]
    fn test_empty_payload() {
        let mut classifier = FrameClassifier::new();

        assert!(matches!(
            classifier.try_classify(&frame(Vec::new()), 0),
            Err(ProtocolError::TruncatedInput { protocol: "dispatch", .. })
        ));
    }
}
