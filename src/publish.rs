//! Record publishing.
//!
//! Records are published the way the testbed's message bus expects them:
//!
//! | Records | Topic | Payload |
//! |---------|-------|---------|
//! | metadata of one frame | `<prefix>/network/<src>` | JSON array of records, possibly empty |
//! | one packet record | `<prefix>/pkt/<seq>` | JSON object |
//!
//! [`Publisher`] is the transport seam; [`JsonLinesPublisher`] writes one
//! line per publication to any `Write`.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use wpansniff_core::ClassifiedFrame;

/// Destination for topic/payload pairs.
pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &Value) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes each publication as one JSON line.
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, topic: &str, payload: &Value) -> Result<()> {
        match self.format {
            OutputFormat::Envelope => {
                serde_json::to_writer(&mut self.writer, &json!({"topic": topic, "payload": payload}))?
            }
            OutputFormat::Payload => serde_json::to_writer(&mut self.writer, payload)?,
        }
        self.writer
            .write_all(b"\n")
            .context("Failed to write record")
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output")
    }
}

/// Topic names under a common prefix.
#[derive(Debug, Clone)]
pub struct Topics {
    prefix: String,
}

impl Topics {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Topic for the metadata a node sends about itself.
    pub fn network(&self, src: &str) -> String {
        format!("{}/network/{}", self.prefix, src)
    }

    /// Topic for the packet with sequence number `seq`.
    pub fn packet(&self, seq: u64) -> String {
        format!("{}/pkt/{}", self.prefix, seq)
    }
}

/// Maps classified records onto topics and hands them to a [`Publisher`].
pub struct RecordPublisher<P> {
    publisher: P,
    topics: Topics,
    published: u64,
}

impl<P: Publisher> RecordPublisher<P> {
    pub fn new(publisher: P, topics: Topics) -> Self {
        Self {
            publisher,
            topics,
            published: 0,
        }
    }

    /// Publish what was decoded from one frame.
    pub fn publish(&mut self, frame: &ClassifiedFrame) -> Result<()> {
        match frame {
            ClassifiedFrame::Skipped => Ok(()),
            ClassifiedFrame::Metadata { src, records } => {
                let topic = self.topics.network(src);
                self.send(&topic, serde_json::to_value(records)?)
            }
            ClassifiedFrame::Packet(record) => match record.packet() {
                Some(packet) => {
                    let topic = self.topics.packet(packet.seq);
                    self.send(&topic, serde_json::to_value(record)?)
                }
                None => Ok(()),
            },
        }
    }

    /// Publications made so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn flush(&mut self) -> Result<()> {
        self.publisher.flush()
    }

    pub fn into_inner(self) -> P {
        self.publisher
    }

    fn send(&mut self, topic: &str, payload: Value) -> Result<()> {
        self.publisher.publish(topic, &payload)?;
        self.published += 1;
        Ok(())
    }
}
