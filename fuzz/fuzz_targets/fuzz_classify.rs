//! Fuzz target for frame classification.
//!
//! Feeds arbitrary bytes as MAC frames through the MAC header parser and
//! the metadata, compass and NDN decoders.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wpansniff_core::FrameClassifier;

fuzz_target!(|data: &[u8]| {
    let mut classifier = FrameClassifier::new();
    let _ = classifier.classify(data, 0);
});
