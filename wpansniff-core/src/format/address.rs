//! IEEE 802.15.4 address formatting.
//!
//! Addresses travel little-endian on the air but are displayed most
//! significant octet first, each octet as two lowercase hex digits
//! separated by colons.

/// Rendering of the short broadcast destination `0xffff`.
pub const BROADCAST: &str = "broadcast";

/// Format bytes as colon-separated lowercase hex octets, in slice order.
///
/// # Example
///
/// ```
/// use wpansniff_core::format::format_octets;
///
/// assert_eq!(format_octets(&[0xaa, 0x0b, 0xcc]), "aa:0b:cc");
/// assert_eq!(format_octets(&[]), "");
/// ```
pub fn format_octets(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Format a 16-bit short address.
///
/// # Example
///
/// ```
/// use wpansniff_core::format::format_short_addr;
///
/// assert_eq!(format_short_addr(0x1234), "12:34");
/// assert_eq!(format_short_addr(0x0042), "00:42");
/// ```
pub fn format_short_addr(addr: u16) -> String {
    format_octets(&addr.to_be_bytes())
}

/// Format a 64-bit extended address.
pub fn format_ext_addr(addr: u64) -> String {
    format_octets(&addr.to_be_bytes())
}
