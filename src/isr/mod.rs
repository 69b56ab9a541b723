//! Sharing a [`RingBuffer`] between a UART interrupt and the main loop.
//!
//! The buffer's `head`, `tail` and length are updated together, so every
//! access from more than one execution context has to happen inside a
//! critical section. These helpers wrap the buffer in a
//! `critical_section::Mutex<RefCell<_>>` and take the critical section for you.
//!
//! The typical split is:
//! - the receive interrupt calls [`global_enqueue`] with each byte
//! - the main loop calls [`global_poll_frame`] and handles the frames
//!
//! Each call holds the critical section only for one O(1) push, or one
//! bounded scan and copy of at most a frame's worth of bytes.
//!
//! See also the [`init_rx_queue!`](crate::init_rx_queue) and
//! [`enqueue_rx_byte!`](crate::enqueue_rx_byte) macros for declaring and
//! feeding a `static` queue.

mod macros;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::queue::RingBuffer;
use crate::reader::FrameReader;
use core::cell::RefCell;
use critical_section::Mutex;

/// A ring buffer guarded for use from interrupt handlers.
pub type SharedRingBuffer<const N: usize> = Mutex<RefCell<RingBuffer<N>>>;

/// Creates an empty shared ring buffer, usable to initialize a `static`.
///
/// # Example
/// ```rust
/// use xbee_api::isr::{global_queue_init, SharedRingBuffer};
///
/// static RX_QUEUE: SharedRingBuffer<220> = global_queue_init::<220>();
/// ```
pub const fn global_queue_init<const N: usize>() -> SharedRingBuffer<N> {
    Mutex::new(RefCell::new(RingBuffer::new()))
}

/// Enqueues one byte. Intended for the UART receive interrupt.
///
/// Returns [`Error::BufferFull`] if the byte was dropped.
pub fn global_enqueue<const N: usize>(queue: &SharedRingBuffer<N>, byte: u8) -> Result<()> {
    critical_section::with(|cs| queue.borrow_ref_mut(cs).enqueue(byte))
}

/// Enqueues a burst of bytes, returning how many fit.
pub fn global_enqueue_sequence<const N: usize>(queue: &SharedRingBuffer<N>, bytes: &[u8]) -> usize {
    critical_section::with(|cs| queue.borrow_ref_mut(cs).enqueue_sequence(bytes))
}

/// Dequeues one byte, e.g. from a UART transmit-ready interrupt draining a
/// transmit queue.
pub fn global_dequeue<const N: usize>(queue: &SharedRingBuffer<N>) -> Result<u8> {
    critical_section::with(|cs| queue.borrow_ref_mut(cs).dequeue())
}

/// Number of bytes currently buffered.
pub fn global_len<const N: usize>(queue: &SharedRingBuffer<N>) -> usize {
    critical_section::with(|cs| queue.borrow_ref(cs).len())
}

/// Runs [`FrameReader::poll`] against the shared queue.
///
/// The returned frame borrows `reader`, not the queue, so it stays usable
/// after the critical section ends.
pub fn global_poll_frame<'r, const N: usize>(
    queue: &SharedRingBuffer<N>,
    reader: &'r mut FrameReader,
) -> nb::Result<Frame<'r>, Error> {
    critical_section::with(move |cs| {
        let reader = reader;
        reader.poll(&mut queue.borrow_ref_mut(cs))
    })
}
