//! Glue between the codec and a byte-oriented serial port.
//!
//! The UART itself is not part of this crate. Anything implementing the
//! `embedded-io` [`Read`]/[`Write`] traits can feed a [`RingBuffer`] with
//! [`fill_queue`] or take a transmit request with [`write_frame`].

use embedded_io::{Read, Write};
use thiserror::Error;

use crate::consts::MAX_WIRE_FRAME_LEN;
use crate::error::Error;
use crate::frame::TransmitRequest;
use crate::queue::RingBuffer;

/// Bytes moved from the port per [`fill_queue`] call at most.
const READ_CHUNK: usize = 32;

/// Errors from the serial glue: either the port or the codec failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError<E> {
    /// The underlying port reported an error.
    #[error("serial port error: {0:?}")]
    Io(E),
    /// Framing or buffering failed.
    #[error(transparent)]
    Codec(#[from] Error),
}

/// Reads whatever the port has into `queue`.
///
/// Performs a single `read`, so this blocks only as long as the port's own
/// `read` does. At most [`READ_CHUNK`] bytes, and never more than the queue
/// has room for, are read.
///
/// # Returns
/// The number of bytes enqueued, `0` at end of stream.
///
/// # Errors
/// - [`SerialError::Codec`] with [`Error::BufferFull`] if the queue has no room;
///   drain it with a [`FrameReader`](crate::reader::FrameReader) first
/// - [`SerialError::Io`] if the port read fails
pub fn fill_queue<R: Read, const N: usize>(
    serial: &mut R,
    queue: &mut RingBuffer<N>,
) -> Result<usize, SerialError<R::Error>> {
    if queue.is_full() {
        return Err(Error::BufferFull.into());
    }
    let mut chunk = [0u8; READ_CHUNK];
    let want = queue.free().min(READ_CHUNK);
    let read = serial.read(&mut chunk[..want]).map_err(SerialError::Io)?;
    Ok(queue.enqueue_sequence(&chunk[..read]))
}

/// Encodes `payload` as a transmit request and writes the whole frame to the port.
///
/// # Returns
/// The number of wire bytes written.
pub fn write_frame<W: Write>(
    serial: &mut W,
    request: &TransmitRequest,
    payload: &[u8],
) -> Result<usize, SerialError<W::Error>> {
    let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
    let len = request.encode(payload, &mut wire)?;
    serial.write_all(&wire[..len]).map_err(SerialError::Io)?;
    serial.flush().map_err(SerialError::Io)?;
    Ok(len)
}
