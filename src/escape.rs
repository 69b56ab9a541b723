//! Byte stuffing for XBee API mode 2 (escaped) framing.
//!
//! In escaped API mode the radio reserves four byte values for framing and
//! software flow control. After the leading start delimiter, none of them may
//! appear on the wire as-is: each is replaced by the escape byte followed by
//! the original value XOR `0x20`.
//!
//! ## Reserved Bytes
//!
//! | Byte   | Meaning          | Escaped form |
//! |--------|------------------|--------------|
//! | `0x7E` | Start delimiter  | `7D 5E`      |
//! | `0x7D` | Escape           | `7D 5D`      |
//! | `0x11` | XON              | `7D 31`      |
//! | `0x13` | XOFF             | `7D 33`      |
//!
//! ## Functions
//!
//! - [`escape`]: Stuffs a whole unescaped frame into an output slice
//! - [`unescape`]: Recovers the unescaped frame from its wire form
//! - [`is_reserved`]: Whether a byte must be escaped
//!
//! ## Limitations
//!
//! - The first input byte is always copied through untouched, since it is the
//!   start delimiter. Pass whole frames, not fragments.
//! - Output slices must be large enough; the worst case for [`escape`] is
//!   `2 * input.len() - 1` bytes.

use crate::consts::{ESCAPE, ESCAPE_MASK, RESERVED};
use crate::error::{Error, Result};

/// Whether `byte` must be escaped when it appears after the start delimiter.
pub fn is_reserved(byte: u8) -> bool {
    RESERVED.contains(&byte)
}

/// Escapes a frame into the slice `output`.
///
/// # Arguments
/// - `&[u8]` : The unescaped frame, start delimiter first
/// - `&mut [u8]` : The output buffer
///
/// # Returns
/// The length of the escaped frame, which is the input length plus one for
/// every escaped byte. [`Error::OutputTooSmall`] if `output` cannot hold it.
pub fn escape(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let Some((&first, rest)) = input.split_first() else {
        return Ok(0);
    };
    let mut pos = 0;
    push(output, &mut pos, first)?;
    for &byte in rest {
        if is_reserved(byte) {
            push(output, &mut pos, ESCAPE)?;
            push(output, &mut pos, byte ^ ESCAPE_MASK)?;
        } else {
            push(output, &mut pos, byte)?;
        }
    }
    Ok(pos)
}

/// Unescapes a frame into the slice `output`.
///
/// # Arguments
/// - `&[u8]` : The escaped frame as read from the wire
/// - `&mut [u8]` : The output buffer
///
/// # Returns
/// The length of the unescaped frame, never more than the input length.
/// Returns [`Error::DanglingEscape`] if the final input byte is an escape
/// byte with nothing after it, or [`Error::OutputTooSmall`] if `output` is short.
pub fn unescape(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let Some((&first, rest)) = input.split_first() else {
        return Ok(0);
    };
    let mut pos = 0;
    push(output, &mut pos, first)?;
    let mut bytes = rest.iter();
    while let Some(&byte) = bytes.next() {
        let decoded = if byte == ESCAPE {
            match bytes.next() {
                Some(&next) => next ^ ESCAPE_MASK,
                None => return Err(Error::DanglingEscape),
            }
        } else {
            byte
        };
        push(output, &mut pos, decoded)?;
    }
    Ok(pos)
}

fn push(output: &mut [u8], pos: &mut usize, byte: u8) -> Result<()> {
    let slot = output.get_mut(*pos).ok_or(Error::OutputTooSmall)?;
    *slot = byte;
    *pos += 1;
    Ok(())
}
