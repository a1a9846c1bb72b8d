//! Normalized output records.
//!
//! Every decoded frame becomes zero or more [`Record`]s. Records serialize
//! to JSON objects tagged by `"type"`:
//!
//! ```json
//! {"type": "cache-info", "value": {"addr": "12:34", "cached": 5}}
//! {"type": "interest", "dst": "broadcast", "src": "12:34", "time": "...", "label": "/foo"}
//! ```

use serde::{Deserialize, Serialize};

/// Identity announced by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub addr: String,
    pub id: String,
}

/// Content store occupancy of a node; either count may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    pub addr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<u8>,
}

/// A route gained or lost by `src` towards `dst`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub src: String,
    pub dst: String,
}

/// A protocol packet seen on the air.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketInfo {
    /// Position among the packet records of one capture stream.
    #[serde(skip)]
    pub seq: u64,
    pub dst: String,
    pub src: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One normalized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Record {
    Node { value: NodeInfo },
    CacheInfo { value: CacheInfo },
    Route { value: RouteInfo },
    RouteList { value: RouteInfo },
    Pam(PacketInfo),
    Nam(PacketInfo),
    Sol(PacketInfo),
    Data(PacketInfo),
    Interest(PacketInfo),
    Unknown(PacketInfo),
}

impl Record {
    /// The `"type"` tag this record serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Node { .. } => "node",
            Record::CacheInfo { .. } => "cache-info",
            Record::Route { .. } => "route",
            Record::RouteList { .. } => "route-list",
            Record::Pam(_) => "pam",
            Record::Nam(_) => "nam",
            Record::Sol(_) => "sol",
            Record::Data(_) => "data",
            Record::Interest(_) => "interest",
            Record::Unknown(_) => "unknown",
        }
    }

    /// Packet fields, for packet records.
    pub fn packet(&self) -> Option<&PacketInfo> {
        match self {
            Record::Pam(p)
            | Record::Nam(p)
            | Record::Sol(p)
            | Record::Data(p)
            | Record::Interest(p)
            | Record::Unknown(p) => Some(p),
            _ => None,
        }
    }
}
