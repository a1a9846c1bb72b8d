//! Capture-to-publisher loop.

use std::io::Read;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::publish::{Publisher, RecordPublisher};
use wpansniff_core::{CaptureReader, FrameClassifier};

/// Counters for one processed capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub frames: u64,
    pub skipped: u64,
    pub packets: u64,
    pub published: u64,
}

/// Decode every frame of `reader` and publish the resulting records.
///
/// Frames that fail to decode are dropped by the classifier; only read or
/// publish failures abort the run.
pub fn run<R: Read, P: Publisher>(
    mut reader: CaptureReader<R>,
    publisher: &mut RecordPublisher<P>,
) -> Result<Summary> {
    let mut classifier = FrameClassifier::new();

    while let Some(record) = reader.next_record().context("Failed to read capture")? {
        let classified = classifier.classify_frame(&record.data, record.timestamp_us);
        debug!(
            frame = record.frame_number,
            time = %record.time(),
            len = record.data.len(),
            records = classified.records().len(),
            "classified frame"
        );
        publisher.publish(&classified)?;
    }
    publisher.flush()?;

    let summary = Summary {
        frames: reader.frame_count(),
        skipped: reader.skipped_count(),
        packets: classifier.packet_count(),
        published: publisher.published(),
    };
    info!(
        frames = summary.frames,
        skipped = summary.skipped,
        packets = summary.packets,
        published = summary.published,
        "capture finished"
    );
    Ok(summary)
}
