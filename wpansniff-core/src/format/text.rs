//! Text recovered from frame payloads.

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Reduce a node id to `[_A-Za-z0-9-.]`, after stripping any leading
/// characters that are not ASCII alphanumeric.
pub fn sanitize_node_id(id: &str) -> String {
    id.trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}
