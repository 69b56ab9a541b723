//! Fixed-capacity byte queue for staging serial data.
//!
//! [`RingBuffer`] accumulates bytes as they arrive from the UART, usually one
//! at a time from a receive interrupt, until a whole frame can be handed to
//! [`receive`](crate::frame::receive). It can equally stage escaped frames on
//! the transmit side.
//!
//! Storage is a plain array owned by the buffer. Callers only ever get copies
//! of the buffered bytes, never a reference into the storage. Vacated slots
//! are zeroed, as is the whole array on drop.
//!
//! For sharing a buffer between an interrupt handler and the main loop, see
//! [`crate::isr`].

use crate::consts::QUEUE_CAPACITY;
use crate::error::{Error, Result};

/// A wrap-around FIFO of at most `N` bytes.
///
/// `head` indexes the oldest byte and `tail` the next free slot. All indices
/// passed to the methods are logical offsets from the oldest byte.
#[derive(Debug)]
pub struct RingBuffer<const N: usize = QUEUE_CAPACITY> {
    data: [u8; N],
    head: usize,
    tail: usize,
    size: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Creates an empty, zeroed buffer.
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            head: 0,
            tail: 0,
            size: 0,
        }
    }

    /// The fixed number of bytes the buffer can hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes currently buffered.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether every slot is taken.
    pub fn is_full(&self) -> bool {
        self.size == N
    }

    /// Number of bytes that can still be enqueued.
    pub fn free(&self) -> usize {
        N - self.size
    }

    /// Appends `byte` after the newest byte.
    ///
    /// Returns [`Error::BufferFull`] without touching the buffer if it is full.
    pub fn enqueue(&mut self, byte: u8) -> Result<()> {
        if self.is_full() {
            trace!("ring buffer full, dropping byte");
            return Err(Error::BufferFull);
        }
        self.data[self.tail] = byte;
        self.tail = Self::advance(self.tail);
        self.size += 1;
        Ok(())
    }

    /// Removes and returns the oldest byte.
    ///
    /// Returns [`Error::BufferUnderrun`] if the buffer is empty.
    pub fn dequeue(&mut self) -> Result<u8> {
        if self.is_empty() {
            return Err(Error::BufferUnderrun);
        }
        let byte = self.data[self.head];
        self.data[self.head] = 0;
        self.head = Self::advance(self.head);
        self.size -= 1;
        Ok(byte)
    }

    /// Enqueues `bytes` in order, stopping at the first byte that does not fit.
    ///
    /// # Returns
    /// How many bytes were accepted. Less than `bytes.len()` means the buffer
    /// filled up; the remaining bytes were not enqueued.
    pub fn enqueue_sequence(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &byte in bytes {
            if self.enqueue(byte).is_err() {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Returns the byte at logical `offset` without removing it.
    ///
    /// # Errors
    /// - [`Error::BufferUnderrun`] if the buffer is empty
    /// - [`Error::OutOfRange`] if `offset` is not less than [`len`](RingBuffer::len)
    pub fn peek(&self, offset: usize) -> Result<u8> {
        self.check_offset(offset)?;
        Ok(self.data[self.index(offset)])
    }

    /// Copies the buffered bytes from logical `start` onwards into `destination`.
    ///
    /// With `start == 0` this is a snapshot of everything buffered. Nothing is
    /// removed. At most `destination.len()` bytes are copied.
    ///
    /// # Returns
    /// The number of bytes copied.
    ///
    /// # Errors
    /// - [`Error::BufferUnderrun`] if the buffer is empty
    /// - [`Error::OutOfRange`] if `start` is not less than [`len`](RingBuffer::len)
    pub fn copy(&self, destination: &mut [u8], start: usize) -> Result<usize> {
        self.check_offset(start)?;
        let count = (self.size - start).min(destination.len());
        let first = self.index(start);
        // The run may wrap past the end of storage.
        let contiguous = count.min(N - first);
        destination[..contiguous].copy_from_slice(&self.data[first..first + contiguous]);
        destination[contiguous..count].copy_from_slice(&self.data[..count - contiguous]);
        Ok(count)
    }

    /// Removes the bytes before logical position `upto`.
    ///
    /// If `upto` is at or past the end of the buffered data the whole buffer
    /// is cleared and every slot zeroed.
    ///
    /// # Returns
    /// The number of bytes actually removed.
    pub fn clear(&mut self, upto: usize) -> usize {
        if upto >= self.size {
            let removed = self.size;
            self.data.fill(0);
            self.head = 0;
            self.tail = 0;
            self.size = 0;
            return removed;
        }
        for _ in 0..upto {
            self.data[self.head] = 0;
            self.head = Self::advance(self.head);
        }
        self.size -= upto;
        upto
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if self.is_empty() {
            Err(Error::BufferUnderrun)
        } else if offset >= self.size {
            Err(Error::OutOfRange {
                offset,
                len: self.size,
            })
        } else {
            Ok(())
        }
    }

    // Only called with data buffered, so N > 0.
    fn index(&self, offset: usize) -> usize {
        (self.head + offset) % N
    }

    fn advance(index: usize) -> usize {
        if index + 1 == N { 0 } else { index + 1 }
    }
}

impl<const N: usize> Drop for RingBuffer<N> {
    fn drop(&mut self) {
        self.data.fill(0);
    }
}
