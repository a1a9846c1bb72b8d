//! Fuzz target for capture file reading.
//!
//! Tests handling of malformed captures including:
//! - Magic number and link type validation
//! - Record headers with oversized or undersized incl_len
//! - Linux cooked headers with foreign protocol ids
//! - Truncated records and checksums

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use wpansniff_core::pcap::CaptureReader;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut reader) = CaptureReader::from_reader(Cursor::new(data)) {
        // Read all frames - should never panic
        while let Ok(Some(_record)) = reader.next_record() {}
    }
});
