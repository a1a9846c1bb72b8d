//! Metadata dispatch decoder.
//!
//! Nodes periodically broadcast their identity, content store occupancy and
//! routing changes as a list of one-byte-length TLVs following the
//! [`META_DISPATCH`](crate::classify::META_DISPATCH) byte.

use tracing::debug;

use super::tlv::tlvs;
use crate::format::{decode_lossy, format_octets, sanitize_node_id};
use crate::record::{CacheInfo, NodeInfo, Record, RouteInfo};

pub const META_NODE_ID_TYPE: u8 = 0x00;
pub const META_NODE_LABEL_TYPE: u8 = 0x01;
pub const META_CACHE_CURRENT_TYPE: u8 = 0x02;
pub const META_CACHE_MAX_TYPE: u8 = 0x03;
pub const META_NEW_ROUTE_TYPE: u8 = 0x04;
pub const META_LOST_ROUTE_TYPE: u8 = 0x05;

/// Metadata TLV tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaType {
    NodeId,
    NodeLabel,
    CacheCurrent,
    CacheMax,
    NewRoute,
    LostRoute,
    Unknown(u8),
}

impl From<u8> for MetaType {
    fn from(tag: u8) -> Self {
        match tag {
            META_NODE_ID_TYPE => MetaType::NodeId,
            META_NODE_LABEL_TYPE => MetaType::NodeLabel,
            META_CACHE_CURRENT_TYPE => MetaType::CacheCurrent,
            META_CACHE_MAX_TYPE => MetaType::CacheMax,
            META_NEW_ROUTE_TYPE => MetaType::NewRoute,
            META_LOST_ROUTE_TYPE => MetaType::LostRoute,
            other => MetaType::Unknown(other),
        }
    }
}

/// Decode the metadata TLVs of a frame sent by `src`.
///
/// Records come out in tag order. Both cache tags feed a single
/// `cache-info` record, placed where the first of them appeared.
pub fn decode(src: &str, data: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut cache_slot: Option<usize> = None;

    for tlv in tlvs(data) {
        match MetaType::from(tlv.tag) {
            MetaType::NodeId => {
                let id = decode_lossy(tlv.value);
                let id = if id.is_empty() { src } else { id.as_str() };
                records.push(Record::Node {
                    value: NodeInfo {
                        addr: src.to_string(),
                        id: sanitize_node_id(id),
                    },
                });
            }
            MetaType::NodeLabel => {}
            tag @ (MetaType::CacheCurrent | MetaType::CacheMax) => {
                let Some(&count) = tlv.value.first() else {
                    debug!(?tag, "empty cache value");
                    continue;
                };
                let slot = *cache_slot.get_or_insert_with(|| {
                    records.push(Record::CacheInfo {
                        value: CacheInfo {
                            addr: src.to_string(),
                            cached: None,
                            cache_size: None,
                        },
                    });
                    records.len() - 1
                });
                if let Record::CacheInfo { value } = &mut records[slot] {
                    if tag == MetaType::CacheCurrent {
                        value.cached = Some(count);
                    } else {
                        value.cache_size = Some(count);
                    }
                }
            }
            MetaType::NewRoute => records.push(Record::Route {
                value: route(src, tlv.value),
            }),
            MetaType::LostRoute => records.push(Record::RouteList {
                value: route(src, tlv.value),
            }),
            MetaType::Unknown(tag) => debug!(tag, "ignoring unknown metadata tag"),
        }
    }

    records
}

fn route(src: &str, dst: &[u8]) -> RouteInfo {
    RouteInfo {
        src: src.to_string(),
        dst: format_octets(dst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "12:34";

    fn cache(cached: Option<u8>, cache_size: Option<u8>) -> Record {
        Record::CacheInfo {
            value: CacheInfo {
                addr: SRC.into(),
                cached,
                cache_size,
            },
        }
    }

    #[test]
    fn test_cache_current_only() {
        let records = decode(SRC, &[0x02, 0x01, 0x05]);
        assert_eq!(records, vec![cache(Some(5), None)]);
    }

    #[test]
    fn test_cache_tags_merge() {
        let data = [
            0x03, 0x01, 0x20, // cache max 32
            0x04, 0x02, 0x00, 0x01, // new route
            0x02, 0x01, 0x07, // cache current 7
            0x02, 0x01, 0x08, // cache current 8, wins
        ];

        let records = decode(SRC, &data);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], cache(Some(8), Some(32)));
        assert_eq!(records[1].kind(), "route");
    }

    #[test]
    fn test_empty_cache_value_is_skipped() {
        let records = decode(SRC, &[0x02, 0x00, 0x03, 0x01, 0x10]);
        assert_eq!(records, vec![cache(None, Some(16))]);
    }

    #[test]
    fn test_node_id_is_sanitized() {
        let records = decode(SRC, &[0x00, 0x07, b'#', b'n', b'o', b'd', b'e', b' ', b'1']);

        assert_eq!(
            records,
            vec![Record::Node {
                value: NodeInfo {
                    addr: SRC.into(),
                    id: "node1".into(),
                },
            }]
        );
    }

    #[test]
    fn test_empty_node_id_falls_back_to_src() {
        let records = decode(SRC, &[0x00, 0x00]);

        // colons are not in the allowed set
        assert_eq!(
            records,
            vec![Record::Node {
                value: NodeInfo {
                    addr: SRC.into(),
                    id: "1234".into(),
                },
            }]
        );
    }

    #[test]
    fn test_routes() {
        let data = [
            0x04, 0x02, 0xbe, 0xef, // new route
            0x05, 0x01, 0x0a, // lost route
        ];

        let records = decode(SRC, &data);

        assert_eq!(
            records,
            vec![
                Record::Route {
                    value: RouteInfo {
                        src: SRC.into(),
                        dst: "be:ef".into(),
                    },
                },
                Record::RouteList {
                    value: RouteInfo {
                        src: SRC.into(),
                        dst: "0a".into(),
                    },
                },
            ]
        );
    }

    #[test]
    fn test_label_and_unknown_tags_are_ignored() {
        let data = [
            0x01, 0x03, b'a', b'b', b'c', // label
            0x42, 0x01, 0x00, // unknown
        ];
        assert!(decode(SRC, &data).is_empty());
    }

    #[test]
    fn test_truncated_tail_keeps_prior_records() {
        let data = [
            0x02, 0x01, 0x05, // cache current
            0x04, 0x08, 0x00, // route claiming 8 bytes
        ];

        assert_eq!(decode(SRC, &data), vec![cache(Some(5), None)]);
    }
}
