//! Formatting of link-layer addresses, decoded text and timestamps.

mod address;
mod text;
mod time;

pub use address::{format_ext_addr, format_octets, format_short_addr, BROADCAST};
pub use text::{decode_lossy, sanitize_node_id};
pub use time::format_timestamp;
