//! Extracting frames from a stream of serial bytes.
//!
//! Bytes arrive at the [`RingBuffer`] without any notion of where one frame
//! ends and the next begins, and a noisy line can leave garbage in front of a
//! frame or cut one short. [`FrameReader`] finds the start delimiter, works
//! out how many wire bytes the frame spans from its length field, and only
//! then hands exactly that window to [`receive`].
//!
//! ## Resynchronization
//!
//! - Bytes in front of a start delimiter are discarded.
//! - A window which fails validation costs one byte (its delimiter), and the
//!   search starts again from the next byte.
//! - An unescaped start delimiter inside a frame means the frame was cut
//!   short; everything before the new delimiter is discarded.
//!
//! ## Example
//!
//! ```rust
//! use xbee_api::frame::send;
//! use xbee_api::queue::RingBuffer;
//! use xbee_api::reader::FrameReader;
//!
//! let mut wire = [0u8; 32];
//! let len = send(b"ping", 0x0001, &mut wire).unwrap();
//!
//! let mut rx: RingBuffer = RingBuffer::new();
//! let _ = rx.enqueue_sequence(&[0x00, 0x42]); // line noise
//! let _ = rx.enqueue_sequence(&wire[..len]);
//!
//! let mut reader = FrameReader::new();
//! let frame = reader.poll(&mut rx).unwrap();
//! assert_eq!(frame.payload(), Some(&b"ping"[..]));
//! assert!(rx.is_empty());
//! ```

use crate::consts::{
    ESCAPE, ESCAPE_MASK, FRAME_ENVELOPE_LEN, MAX_FRAME_LEN, MAX_WIRE_FRAME_LEN, START_DELIMITER,
};
use crate::error::Error;
use crate::frame::{Frame, receive};
use crate::queue::RingBuffer;

/// Where the next frame ends in a queue, or why it cannot be determined yet.
enum Extent {
    /// The frame spans this many wire bytes.
    Complete(usize),
    /// More bytes are needed.
    Incomplete,
    /// A start delimiter at offset `at` cut the frame short.
    Truncated {
        at: usize,
        declared: Option<u16>,
        actual: u16,
    },
    /// The length field declares a frame too large to hold.
    Oversized(u16),
}

/// Pulls validated frames out of a [`RingBuffer`].
///
/// The reader owns the scratch space for the window handed to [`receive`]
/// and for the unescaped result, so the returned [`Frame`] borrows the reader.
#[derive(Debug)]
pub struct FrameReader {
    wire: [u8; MAX_WIRE_FRAME_LEN],
    unescaped: [u8; MAX_FRAME_LEN],

    /// Counter of frames which passed validation.
    pub rx_good: u16,

    /// Counter of windows rejected by validation or cut short by a new delimiter.
    pub rx_bad: u16,

    /// Counter of bytes dropped while searching for a start delimiter.
    pub discarded: u16,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReader {
    /// Creates a reader with zeroed counters.
    pub const fn new() -> Self {
        Self {
            wire: [0; MAX_WIRE_FRAME_LEN],
            unescaped: [0; MAX_FRAME_LEN],
            rx_good: 0,
            rx_bad: 0,
            discarded: 0,
        }
    }

    /// Tries to take the next frame off the front of `queue`.
    ///
    /// # Returns
    /// - `Ok(frame)`: a validated frame; its wire bytes have been removed from `queue`
    /// - `Err(nb::Error::WouldBlock)`: no complete frame is buffered yet
    /// - `Err(nb::Error::Other(e))`: a malformed frame was dropped; call again
    ///   to continue with the remaining bytes
    ///
    /// If `queue` is smaller than the frame being received this keeps
    /// returning `WouldBlock`; size queues to at least
    /// [`MAX_WIRE_FRAME_LEN`].
    pub fn poll<const N: usize>(
        &mut self,
        queue: &mut RingBuffer<N>,
    ) -> nb::Result<Frame<'_>, Error> {
        self.skip_to_delimiter(queue);
        if queue.is_empty() {
            return Err(nb::Error::WouldBlock);
        }

        let extent = match Self::frame_extent(queue) {
            Extent::Complete(extent) => extent,
            Extent::Incomplete => return Err(nb::Error::WouldBlock),
            Extent::Truncated {
                at,
                declared,
                actual,
            } => {
                warn!("frame cut short after {} bytes, resynchronizing", at);
                let _ = queue.clear(at);
                self.rx_bad = self.rx_bad.wrapping_add(1);
                let err = match declared {
                    Some(declared) => Error::LengthMismatch { declared, actual },
                    None => Error::TooShort,
                };
                return Err(nb::Error::Other(err));
            }
            Extent::Oversized(declared) => {
                warn!("frame declares {} bytes, resynchronizing", declared);
                let _ = queue.dequeue();
                self.rx_bad = self.rx_bad.wrapping_add(1);
                return Err(nb::Error::Other(Error::FrameTooLarge { declared }));
            }
        };

        let copied = queue.copy(&mut self.wire[..extent], 0)?;
        let len = match receive(&self.wire[..copied], &mut self.unescaped) {
            Ok(frame) => frame.len(),
            Err(e) => {
                warn!("dropping delimiter of invalid frame: {}", e);
                let _ = queue.dequeue();
                self.rx_bad = self.rx_bad.wrapping_add(1);
                return Err(nb::Error::Other(e));
            }
        };

        trace_frame!("Rx", &self.wire[..copied]);
        let _ = queue.clear(extent);
        self.rx_good = self.rx_good.wrapping_add(1);
        Ok(Frame::new(&self.unescaped[..len]))
    }

    /// Drops bytes until the oldest buffered byte is a start delimiter.
    fn skip_to_delimiter<const N: usize>(&mut self, queue: &mut RingBuffer<N>) {
        let mut skip = 0;
        while let Ok(byte) = queue.peek(skip) {
            if byte == START_DELIMITER {
                break;
            }
            skip += 1;
        }
        if skip > 0 {
            let removed = queue.clear(skip);
            trace!("discarded {} bytes before start delimiter", removed);
            self.discarded = self
                .discarded
                .wrapping_add(u16::try_from(removed).unwrap_or(u16::MAX));
        }
    }

    /// Walks the escaped bytes after the delimiter at the front of `queue`,
    /// decoding the length field on the way.
    fn frame_extent<const N: usize>(queue: &RingBuffer<N>) -> Extent {
        // Unescaped bytes seen so far, the delimiter included.
        let mut decoded: usize = 1;
        let mut msb = 0u8;
        let mut declared = None;
        let mut offset = 1;

        while let Ok(byte) = queue.peek(offset) {
            if byte == START_DELIMITER {
                return Self::truncated(offset, decoded, declared);
            }
            let value = if byte == ESCAPE {
                match queue.peek(offset + 1) {
                    Ok(START_DELIMITER) => return Self::truncated(offset + 1, decoded, declared),
                    Ok(next) => {
                        offset += 1;
                        next ^ ESCAPE_MASK
                    }
                    Err(_) => return Extent::Incomplete,
                }
            } else {
                byte
            };
            offset += 1;

            match decoded {
                1 => msb = value,
                2 => {
                    let len = u16::from_be_bytes([msb, value]);
                    if usize::from(len) + FRAME_ENVELOPE_LEN > MAX_FRAME_LEN {
                        return Extent::Oversized(len);
                    }
                    declared = Some(len);
                }
                _ => {}
            }
            decoded += 1;

            if let Some(len) = declared {
                if decoded == usize::from(len) + FRAME_ENVELOPE_LEN {
                    return Extent::Complete(offset);
                }
            }
        }
        Extent::Incomplete
    }

    fn truncated(at: usize, decoded: usize, declared: Option<u16>) -> Extent {
        Extent::Truncated {
            at,
            declared,
            // Everything after the length field counts towards it.
            actual: u16::try_from(decoded.saturating_sub(3)).unwrap_or(u16::MAX),
        }
    }
}
