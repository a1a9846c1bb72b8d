//! Capture reader with automatic gzip handling.
//!
//! [`CaptureReader`] validates the global header once, then yields one
//! [`RawRecord`] per captured frame with the framing stripped:
//!
//! ```text
//! raw 802.15.4:   [record header 16][frame incl_len][FCS 2]?
//! Linux cooked:   [record header 16][SLL header 16][frame incl_len-18][FCS 2]
//! ```
//!
//! A short read anywhere in a record ends the stream cleanly; captures
//! written by a sniffer that was killed mid-frame are common.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info, warn};

use super::{
    FCS_LEN, LINKTYPE_IEEE802_15_4_NOFCS, LINKTYPE_IEEE802_15_4_WITHFCS, LINKTYPE_LINUX_SLL,
    PCAP_HEADER_LEN, PCAP_MAGIC, RECORD_HEADER_LEN,
};
use crate::error::{Error, PcapError};
use crate::format::format_octets;
use crate::io::{Compression, DecompressReader, RawRecord};
use crate::protocol::linux_sll::{LinuxSllHeader, LINUX_SLL_HEADER_LEN};

/// Buffer size for the record stream (64KB).
const BUFFER_SIZE: usize = 65536;

/// Byte source behind [`CaptureReader::open`].
pub type CaptureSource = Box<dyn Read + Send>;

/// Reader for native-order pcap files carrying IEEE 802.15.4 frames.
///
/// # Example
///
/// ```no_run
/// use wpansniff_core::pcap::CaptureReader;
///
/// let reader = CaptureReader::open("capture.pcap.gz")?;
/// for record in reader {
///     let record = record?;
///     println!("frame {}: {} bytes", record.frame_number, record.data.len());
/// }
/// # Ok::<(), wpansniff_core::Error>(())
/// ```
pub struct CaptureReader<R: Read> {
    source: BufReader<DecompressReader<BufReader<R>>>,
    compression: Compression,
    link_type: u32,
    has_fcs: bool,
    linux_cooked: bool,
    frame_count: u64,
    skipped_count: u64,
    finished: bool,
}

impl CaptureReader<CaptureSource> {
    /// Open a capture file, or stdin when `path` is `-`.
    ///
    /// Gzip-compressed input is detected and decoded transparently.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        let source: CaptureSource = if path == Path::new("-") {
            Box::new(io::stdin())
        } else {
            let file = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::Pcap(PcapError::FileNotFound {
                    path: path.display().to_string(),
                }),
                _ => Error::Io(e),
            })?;
            Box::new(file)
        };

        Self::from_reader(source)
    }
}

impl<R: Read> CaptureReader<R> {
    /// Read and validate the global header from `source`.
    pub fn from_reader(source: R) -> Result<Self, Error> {
        let mut raw = BufReader::new(source);
        let compression = Compression::detect(raw.fill_buf()?);
        let mut source =
            BufReader::with_capacity(BUFFER_SIZE, DecompressReader::new(raw, compression));

        let mut header = [0u8; PCAP_HEADER_LEN];
        if !read_full(&mut source, &mut header)? {
            return Err(Error::Pcap(PcapError::InvalidFormat {
                reason: "Unable to read PCAP header".to_string(),
            }));
        }

        let magic = u32::from_ne_bytes([header[0], header[1], header[2], header[3]]);
        if magic != PCAP_MAGIC {
            return Err(Error::Pcap(PcapError::NonNativeByteOrder { magic }));
        }

        // version, thiszone, sigfigs and snaplen are ignored
        let link_type = u32::from_ne_bytes([header[20], header[21], header[22], header[23]]);
        let (has_fcs, linux_cooked) = match link_type {
            LINKTYPE_LINUX_SLL => (true, true),
            LINKTYPE_IEEE802_15_4_WITHFCS => (true, false),
            LINKTYPE_IEEE802_15_4_NOFCS => (false, false),
            _ => return Err(Error::Pcap(PcapError::UnsupportedLinkType { link_type })),
        };

        info!(link_type, has_fcs, linux_cooked, %compression, "opened capture");

        Ok(Self {
            source,
            compression,
            link_type,
            has_fcs,
            linux_cooked,
            frame_count: 0,
            skipped_count: 0,
            finished: false,
        })
    }

    /// Link type from the global header.
    #[inline]
    pub fn link_type(&self) -> u32 {
        self.link_type
    }

    /// Whether each frame is followed by a 2-byte checksum.
    #[inline]
    pub fn has_fcs(&self) -> bool {
        self.has_fcs
    }

    /// Whether records carry a Linux cooked header.
    #[inline]
    pub fn is_linux_cooked(&self) -> bool {
        self.linux_cooked
    }

    /// Compression detected on the input.
    #[inline]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Frames returned so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Records skipped because they did not carry 802.15.4 frames.
    #[inline]
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` at end of stream, including a truncated final record.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>, Error> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let header_len = if self.linux_cooked {
                RECORD_HEADER_LEN + LINUX_SLL_HEADER_LEN
            } else {
                RECORD_HEADER_LEN
            };

            let mut header = [0u8; RECORD_HEADER_LEN + LINUX_SLL_HEADER_LEN];
            if !read_full(&mut self.source, &mut header[..header_len])? {
                return Ok(self.finish());
            }

            let ts_sec = u32::from_ne_bytes([header[0], header[1], header[2], header[3]]);
            let ts_usec = u32::from_ne_bytes([header[4], header[5], header[6], header[7]]);
            let incl_len = u32::from_ne_bytes([header[8], header[9], header[10], header[11]]) as u64;

            let frame_len = if self.linux_cooked {
                let cooked_overhead = (LINUX_SLL_HEADER_LEN + FCS_LEN) as u64;
                match LinuxSllHeader::parse(&header[RECORD_HEADER_LEN..header_len]) {
                    Some(sll) if sll.is_ieee802154() && incl_len >= cooked_overhead => {
                        incl_len - cooked_overhead
                    }
                    sll => {
                        warn!(
                            protocol = sll.map(|s| s.protocol),
                            arphrd = sll.map(|s| s.arphrd_type),
                            link_addr = ?sll.map(|s| format_octets(s.link_addr())),
                            incl_len,
                            "PCAP does not contain pure IEEE 802.15.4 MAC (Linux cooked), skipping record"
                        );
                        self.skipped_count += 1;
                        // keep the stream aligned on the next record header
                        let rest = incl_len.saturating_sub(LINUX_SLL_HEADER_LEN as u64);
                        if !self.discard(rest)? {
                            return Ok(self.finish());
                        }
                        continue;
                    }
                }
            } else {
                incl_len
            };

            let mut data = Vec::new();
            (&mut self.source).take(frame_len).read_to_end(&mut data)?;
            if (data.len() as u64) < frame_len {
                debug!(frame_len, have = data.len(), "truncated frame at end of capture");
                return Ok(self.finish());
            }

            if self.has_fcs {
                // checksum is not validated; a missing one surfaces as EOF on the next header
                self.discard(FCS_LEN as u64)?;
            }

            self.frame_count += 1;
            return Ok(Some(RawRecord {
                frame_number: self.frame_count,
                timestamp_us: i64::from(ts_sec) * 1_000_000 + i64::from(ts_usec),
                data: Bytes::from(data),
            }));
        }
    }

    fn finish(&mut self) -> Option<RawRecord> {
        self.finished = true;
        None
    }

    /// Skip `len` bytes. Returns `false` if the stream ended first.
    fn discard(&mut self, len: u64) -> Result<bool, Error> {
        let skipped = io::copy(&mut (&mut self.source).take(len), &mut io::sink())?;
        Ok(skipped == len)
    }
}

impl<R: Read> Iterator for CaptureReader<R> {
    type Item = Result<RawRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` completely. Returns `false` on end of input before that.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}
