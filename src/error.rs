//! Error types for framing, parsing, and buffering.

use thiserror::Error;

/// Type alias for handling XBee framing and buffering errors.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors encountered while framing, parsing, or buffering XBee API data.
///
/// None of these are fatal. Frame errors mean the bytes handed to
/// [`receive`](crate::frame::receive) were not a valid frame; the caller
/// decides how to resynchronize (typically by dropping one byte).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    // Frame errors
    /// The first byte is not the `0x7E` start delimiter.
    #[error("frame does not begin with the 0x7e start delimiter")]
    BadDelimiter,
    /// Fewer bytes than the smallest frame the receiver accepts.
    #[error("frame is shorter than the 10 byte minimum")]
    TooShort,
    /// The length field disagrees with the number of bytes received.
    #[error("length field declares {declared} bytes but {actual} were received")]
    LengthMismatch {
        /// Value of the MSB/LSB length field.
        declared: u16,
        /// Bytes between the length field and the checksum, inclusive of neither.
        actual: u16,
    },
    /// The checksummed region does not sum to `0xFF`.
    #[error("checksum region sums to {sum:#04x} instead of 0xff")]
    ChecksumMismatch {
        /// Modulo 256 sum of the checksummed bytes, checksum included.
        sum: u8,
    },
    /// An escape byte was the final byte, so there is nothing to unescape.
    #[error("escape byte at end of input")]
    DanglingEscape,
    /// The length field declares a frame larger than the receiver can hold.
    #[error("length field declares {declared} bytes, more than a frame can hold")]
    FrameTooLarge {
        /// Value of the MSB/LSB length field.
        declared: u16,
    },

    // Encoder errors
    /// The payload does not fit in a single transmit request.
    #[error("payload of {len} bytes exceeds the {max} byte maximum")]
    PayloadTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Largest payload accepted.
        max: usize,
    },
    /// The output slice cannot hold the produced bytes.
    #[error("output buffer too small")]
    OutputTooSmall,

    // Ring buffer errors
    /// The ring buffer has no free slot.
    #[error("ring buffer is full")]
    BufferFull,
    /// The ring buffer holds no data.
    #[error("ring buffer is empty")]
    BufferUnderrun,
    /// A logical position at or past the end of the buffered data.
    #[error("offset {offset} is outside the {len} buffered bytes")]
    OutOfRange {
        /// Requested logical offset from the oldest byte.
        offset: usize,
        /// Number of bytes buffered at the time.
        len: usize,
    },
}

impl Error {
    /// Whether this error means the input was not a well formed frame.
    ///
    /// These are the errors a reader recovers from by discarding input and
    /// searching for the next start delimiter.
    pub fn is_malformed_frame(&self) -> bool {
        matches!(
            self,
            Error::BadDelimiter
                | Error::TooShort
                | Error::LengthMismatch { .. }
                | Error::ChecksumMismatch { .. }
                | Error::DanglingEscape
                | Error::FrameTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_frame_classification() {
        assert!(Error::BadDelimiter.is_malformed_frame());
        assert!(Error::ChecksumMismatch { sum: 0xfe }.is_malformed_frame());
        assert!(Error::DanglingEscape.is_malformed_frame());
        assert!(!Error::BufferFull.is_malformed_frame());
        assert!(!Error::PayloadTooLarge { len: 92, max: 91 }.is_malformed_frame());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_display_includes_fields() {
        let msg = Error::LengthMismatch {
            declared: 7,
            actual: 6,
        }
        .to_string();
        assert_eq!(msg, "length field declares 7 bytes but 6 were received");
        assert_eq!(
            Error::ChecksumMismatch { sum: 0x0f }.to_string(),
            "checksum region sums to 0x0f instead of 0xff"
        );
    }
}
