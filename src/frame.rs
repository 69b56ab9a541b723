//! Building and parsing XBee API frames.
//!
//! This module provides [`TransmitRequest`], which turns a payload into an
//! escaped, checksummed wire frame, and [`receive`], which validates an
//! escaped wire frame and exposes its unescaped bytes as a [`Frame`].
//!
//! ## Example
//!
//! ```rust
//! use xbee_api::frame::{receive, TransmitRequest};
//! use xbee_api::consts::{MAX_FRAME_LEN, MAX_WIRE_FRAME_LEN};
//!
//! let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
//! let wire_len = TransmitRequest::to(0x1234).encode(b"AB", &mut wire).unwrap();
//!
//! let mut unescaped = [0u8; MAX_FRAME_LEN];
//! let frame = receive(&wire[..wire_len], &mut unescaped).unwrap();
//! assert_eq!(frame.frame_type(), 0x01);
//! assert_eq!(frame.address(), Some(0x1234));
//! assert_eq!(frame.payload(), Some(&b"AB"[..]));
//! ```
//!
//! ## Design Notes
//!
//! Only the 16-bit address transmit request (`0x01`) is built. [`receive`]
//! accepts any frame type; dispatch on [`Frame::frame_type`].
//!
//! The receiver requires the length field to match the received byte count
//! exactly. A truncated or run-together window is rejected rather than
//! partially accepted.

use crate::checksum::{checksum, sum};
use crate::consts::{
    BROADCAST_ADDRESS, DEFAULT_FRAME_ID, FRAME_ENVELOPE_LEN, MAX_FRAME_LEN, MAX_PAYLOAD_LEN,
    MAX_WIRE_FRAME_LEN, MIN_FRAME_LEN, OPTION_DISABLE_ACK, START_DELIMITER, TX_PAYLOAD_OFFSET,
    TX_REQUEST_FRAME_TYPE, TX_REQUEST_OVERHEAD,
};
use crate::error::{Error, Result};
use crate::escape::{escape, unescape};

/// An owned escaped wire frame.
#[cfg(not(feature = "std"))]
pub type FrameBuffer = heapless::Vec<u8, MAX_WIRE_FRAME_LEN>;

/// An owned escaped wire frame.
#[cfg(feature = "std")]
pub type FrameBuffer = Vec<u8>;

/// Header fields of a 16-bit address transmit request (API frame type `0x01`).
///
/// The default request broadcasts with frame ID `0x00` (no transmit status)
/// and acknowledgment disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TransmitRequest {
    /// Destination 16-bit address.
    pub address: u16,
    /// Correlates the request with a transmit status frame. `0` disables the status.
    pub frame_id: u8,
    /// Transmit options bit field.
    pub options: u8,
}

impl Default for TransmitRequest {
    fn default() -> Self {
        Self {
            address: BROADCAST_ADDRESS,
            frame_id: DEFAULT_FRAME_ID,
            options: OPTION_DISABLE_ACK,
        }
    }
}

impl TransmitRequest {
    /// A request for `address` with the default frame ID and options.
    pub fn to(address: u16) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Builds the escaped wire frame for `payload` into `output`.
    ///
    /// # Arguments
    /// - `payload`: application bytes, at most [`MAX_PAYLOAD_LEN`]
    /// - `output`: receives the escaped frame; [`MAX_WIRE_FRAME_LEN`] bytes always suffice
    ///
    /// # Returns
    /// The number of bytes written to `output`.
    ///
    /// # Errors
    /// - [`Error::PayloadTooLarge`] if the payload exceeds [`MAX_PAYLOAD_LEN`]
    /// - [`Error::OutputTooSmall`] if the escaped frame does not fit in `output`
    pub fn encode(&self, payload: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut raw = [0u8; MAX_FRAME_LEN];
        let raw_len = self.encode_unescaped(payload, &mut raw)?;
        let len = escape(&raw[..raw_len], output)?;
        trace!("encoded {} payload bytes into {} wire bytes", payload.len(), len);
        trace_frame!("Tx", &output[..len]);
        Ok(len)
    }

    /// Builds the escaped wire frame for `payload` into an owned buffer.
    ///
    /// See [`TransmitRequest::encode`].
    #[cfg(not(feature = "std"))]
    pub fn encode_to_buffer(&self, payload: &[u8]) -> Result<FrameBuffer> {
        let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
        let len = self.encode(payload, &mut wire)?;
        FrameBuffer::from_slice(&wire[..len]).map_err(|_| Error::OutputTooSmall)
    }

    /// Builds the escaped wire frame for `payload` into an owned buffer.
    ///
    /// See [`TransmitRequest::encode`].
    #[cfg(feature = "std")]
    pub fn encode_to_buffer(&self, payload: &[u8]) -> Result<FrameBuffer> {
        let mut wire = vec![0u8; MAX_WIRE_FRAME_LEN];
        let len = self.encode(payload, &mut wire)?;
        wire.truncate(len);
        Ok(wire)
    }

    /// Lays out the unescaped frame, checksum included, and returns its length.
    fn encode_unescaped(&self, payload: &[u8], raw: &mut [u8; MAX_FRAME_LEN]) -> Result<usize> {
        if payload.len() > MAX_PAYLOAD_LEN {
            debug!("rejecting {} byte payload", payload.len());
            return Err(Error::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }
        let end = TX_PAYLOAD_OFFSET + payload.len();
        let [addr_hi, addr_lo] = self.address.to_be_bytes();

        raw[0] = START_DELIMITER;
        raw[1] = 0x00;
        // Fits in a byte since the payload is capped.
        raw[2] = payload.len() as u8 + TX_REQUEST_OVERHEAD;
        raw[3] = TX_REQUEST_FRAME_TYPE;
        raw[4] = self.frame_id;
        raw[5] = addr_hi;
        raw[6] = addr_lo;
        raw[7] = self.options;
        raw[TX_PAYLOAD_OFFSET..end].copy_from_slice(payload);
        raw[end] = checksum(&raw[3..end]);

        Ok(end + 1)
    }
}

/// Builds a default transmit request frame for `payload` addressed to `address`.
///
/// Shorthand for `TransmitRequest::to(address).encode(payload, output)`. Use
/// [`BROADCAST_ADDRESS`] to reach every radio.
pub fn send(payload: &[u8], address: u16, output: &mut [u8]) -> Result<usize> {
    TransmitRequest::to(address).encode(payload, output)
}

/// Validates an escaped wire frame and unescapes it into `output`.
///
/// `input` must hold exactly one frame: the start delimiter through the
/// checksum, as it appeared on the wire.
///
/// # Returns
/// A [`Frame`] borrowing the unescaped bytes in `output`. [`Frame::len`] is
/// the number of valid bytes written.
///
/// # Errors
/// - [`Error::BadDelimiter`]: `input` does not start with `0x7E`
/// - [`Error::TooShort`]: fewer than [`MIN_FRAME_LEN`] wire bytes
/// - [`Error::DanglingEscape`]: `input` ends in a lone escape byte
/// - [`Error::LengthMismatch`]: the length field disagrees with the unescaped length
/// - [`Error::ChecksumMismatch`]: the checksummed region does not sum to `0xFF`
/// - [`Error::OutputTooSmall`]: `output` cannot hold the unescaped frame
pub fn receive<'a>(input: &[u8], output: &'a mut [u8]) -> Result<Frame<'a>> {
    let result = validate(input, output);
    match result {
        Ok(len) => Ok(Frame::new(&output[..len])),
        Err(e) => {
            debug!("rejected frame: {}", e);
            Err(e)
        }
    }
}

fn validate(input: &[u8], output: &mut [u8]) -> Result<usize> {
    if input.first() != Some(&START_DELIMITER) {
        return Err(Error::BadDelimiter);
    }
    if input.len() < MIN_FRAME_LEN {
        return Err(Error::TooShort);
    }
    let len = unescape(input, output)?;

    let declared = u16::from_be_bytes([output[1], output[2]]);
    let actual = len - FRAME_ENVELOPE_LEN;
    if usize::from(declared) != actual {
        return Err(Error::LengthMismatch {
            declared,
            actual: u16::try_from(actual).unwrap_or(u16::MAX),
        });
    }

    let total = sum(&output[3..len]);
    if total != 0xFF {
        return Err(Error::ChecksumMismatch { sum: total });
    }
    Ok(len)
}

/// A validated, unescaped API frame.
///
/// Produced by [`receive`]. The accessors for the transmit request layout
/// ([`address`](Frame::address), [`options`](Frame::options),
/// [`payload`](Frame::payload)) return `None` when the frame is too short to
/// carry those fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    // Callers guarantee `bytes` passed `validate`, so it holds at least the
    // delimiter, length, frame type, frame ID and checksum.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The whole unescaped frame, start delimiter through checksum.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of unescaped bytes in the frame.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; a validated frame holds at least its header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The value of the length field.
    pub fn declared_len(&self) -> u16 {
        u16::from_be_bytes([self.bytes[1], self.bytes[2]])
    }

    /// The API identifier, e.g. `0x01` for a transmit request.
    pub fn frame_type(&self) -> u8 {
        self.bytes[3]
    }

    /// The frame ID byte of a transmit request.
    pub fn frame_id(&self) -> u8 {
        self.bytes[4]
    }

    /// Frame-specific data: everything after the frame type, before the checksum.
    pub fn data(&self) -> &'a [u8] {
        &self.bytes[4..self.bytes.len() - 1]
    }

    /// The trailing checksum byte.
    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    /// The big-endian destination address of a transmit request.
    pub fn address(&self) -> Option<u16> {
        if self.bytes.len() > 7 {
            Some(u16::from_be_bytes([self.bytes[5], self.bytes[6]]))
        } else {
            None
        }
    }

    /// The options byte of a transmit request.
    pub fn options(&self) -> Option<u8> {
        if self.bytes.len() > TX_PAYLOAD_OFFSET {
            Some(self.bytes[7])
        } else {
            None
        }
    }

    /// The application payload of a transmit request.
    pub fn payload(&self) -> Option<&'a [u8]> {
        self.bytes.get(TX_PAYLOAD_OFFSET..self.bytes.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(req: TransmitRequest, payload: &[u8]) -> ([u8; MAX_WIRE_FRAME_LEN], usize) {
        let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
        let len = req.encode(payload, &mut wire).unwrap();
        (wire, len)
    }

    #[test]
    fn test_send_builds_expected_frame() {
        let (wire, len) = encode(TransmitRequest::to(0x1234), &[0x41, 0x42]);
        let cs = 0xFF - (0x01u8 + 0x00 + 0x12 + 0x34 + 0x01 + 0x41 + 0x42);
        assert_eq!(
            &wire[..len],
            &[0x7e, 0x00, 0x07, 0x01, 0x00, 0x12, 0x34, 0x01, 0x41, 0x42, cs]
        );
    }

    #[test]
    fn test_send_shorthand_matches_request() {
        let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
        let len = send(b"hello", BROADCAST_ADDRESS, &mut wire).unwrap();
        let (expected, expected_len) = encode(TransmitRequest::default(), b"hello");
        assert_eq!(&wire[..len], &expected[..expected_len]);
        assert_eq!(&wire[5..7], &[0xff, 0xff]);
    }

    #[test]
    fn test_send_escapes_reserved_payload_byte() {
        let (wire, len) = encode(TransmitRequest::to(0x0001), &[0x7e]);
        // Header 7e 00 06 01 00 00 01 01, then the escaped payload.
        assert_eq!(&wire[8..10], &[0x7d, 0x5e]);
        assert!(!wire[1..len].contains(&0x7e));
    }

    #[test]
    fn test_send_escapes_length_and_address() {
        // 0x0e + 5 = 0x13 in the length byte, 0x7d11 in the address.
        let (wire, _) = encode(TransmitRequest::to(0x7d11), &[0u8; 0x0e]);
        assert_eq!(&wire[..3], &[0x7e, 0x00, 0x7d]);
        assert_eq!(wire[3], 0x33);
        assert_eq!(&wire[6..10], &[0x7d, 0x5d, 0x7d, 0x31]);
    }

    #[test]
    fn test_send_uses_request_fields() {
        let req = TransmitRequest {
            address: 0x0002,
            frame_id: 0x52,
            options: 0x00,
        };
        let (wire, _) = encode(req, b"x");
        assert_eq!(wire[4], 0x52);
        assert_eq!(wire[7], 0x00);
    }

    #[test]
    fn test_send_rejects_oversized_payload() {
        let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            send(&payload, 0x0001, &mut wire),
            Err(Error::PayloadTooLarge {
                len: MAX_PAYLOAD_LEN + 1,
                max: MAX_PAYLOAD_LEN
            })
        );
    }

    #[test]
    fn test_send_max_payload_all_reserved_fits() {
        let payload = [0x7d; MAX_PAYLOAD_LEN];
        let (wire, len) = encode(TransmitRequest::to(0x0001), &payload);
        assert!(len <= MAX_WIRE_FRAME_LEN);
        let mut out = [0u8; MAX_FRAME_LEN];
        let frame = receive(&wire[..len], &mut out).unwrap();
        assert_eq!(frame.payload(), Some(&payload[..]));
    }

    #[test]
    fn test_send_output_too_small() {
        let mut wire = [0u8; 8];
        assert_eq!(send(b"AB", 0x0001, &mut wire), Err(Error::OutputTooSmall));
    }

    #[test]
    fn test_encode_to_buffer() {
        let buf = TransmitRequest::to(0x1234).encode_to_buffer(b"AB").unwrap();
        let (wire, len) = encode(TransmitRequest::to(0x1234), b"AB");
        assert_eq!(&buf[..], &wire[..len]);
    }

    #[test]
    fn test_round_trip() {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        for (i, b) in payload.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(0x11);
        }
        for n in 1..=MAX_PAYLOAD_LEN {
            let address = (n as u16).wrapping_mul(0x7e13);
            let (wire, len) = encode(TransmitRequest::to(address), &payload[..n]);

            let mut out = [0u8; MAX_FRAME_LEN];
            let frame = receive(&wire[..len], &mut out).unwrap();
            assert_eq!(frame.len(), n + 9);
            assert_eq!(frame.declared_len(), n as u16 + 5);
            assert_eq!(frame.frame_type(), TX_REQUEST_FRAME_TYPE);
            assert_eq!(frame.frame_id(), DEFAULT_FRAME_ID);
            assert_eq!(frame.address(), Some(address));
            assert_eq!(frame.options(), Some(OPTION_DISABLE_ACK));
            assert_eq!(frame.payload(), Some(&payload[..n]));
            assert_eq!(sum(&frame.as_bytes()[3..]), 0xFF);
        }
    }

    #[test]
    fn test_receive_rejects_bad_delimiter() {
        let (mut wire, len) = encode(TransmitRequest::to(0x1234), b"AB");
        wire[0] = 0x7f;
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(receive(&wire[..len], &mut out), Err(Error::BadDelimiter));
        assert_eq!(receive(&[], &mut out), Err(Error::BadDelimiter));
    }

    #[test]
    fn test_receive_rejects_short_input() {
        // A valid frame with an empty payload is only nine bytes.
        let (wire, len) = encode(TransmitRequest::to(0x1234), &[]);
        assert_eq!(len, 9);
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(receive(&wire[..len], &mut out), Err(Error::TooShort));
    }

    #[test]
    fn test_receive_rejects_every_checksum_bit_flip() {
        let (wire, len) = encode(TransmitRequest::to(0x1234), b"ABCD");
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(wire[len - 1], 0xad);
        for bit in 0..8 {
            let mut corrupt = wire;
            corrupt[len - 1] ^= 1 << bit;
            assert!(matches!(
                receive(&corrupt[..len], &mut out),
                Err(Error::ChecksumMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_receive_rejects_truncated_frame() {
        let (wire, len) = encode(TransmitRequest::to(0x1234), b"ABCD");
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(
            receive(&wire[..len - 1], &mut out),
            Err(Error::LengthMismatch {
                declared: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_receive_rejects_trailing_bytes() {
        let (mut wire, len) = encode(TransmitRequest::to(0x1234), b"ABCD");
        wire[len] = 0x00;
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(
            receive(&wire[..len + 1], &mut out),
            Err(Error::LengthMismatch {
                declared: 9,
                actual: 10
            })
        );
    }

    #[test]
    fn test_receive_rejects_dangling_escape() {
        let (mut wire, len) = encode(TransmitRequest::to(0x1234), b"ABCD");
        wire[len - 1] = 0x7d;
        let mut out = [0u8; MAX_FRAME_LEN];
        assert_eq!(receive(&wire[..len], &mut out), Err(Error::DanglingEscape));
    }

    #[test]
    fn test_receive_accepts_rx_packet() {
        // RX (Receive) Packet 16-bit: source 0x0001, RSSI 0x28, options 0x00, data "Hi"
        let body = [0x81, 0x00, 0x01, 0x28, 0x00, b'H', b'i'];
        let cs = checksum(&body);
        let mut raw = [0u8; 11];
        raw[..3].copy_from_slice(&[0x7e, 0x00, body.len() as u8]);
        raw[3..10].copy_from_slice(&body);
        raw[10] = cs;

        let mut wire = [0u8; 32];
        let len = escape(&raw, &mut wire).unwrap();
        let mut out = [0u8; MAX_FRAME_LEN];
        let frame = receive(&wire[..len], &mut out).unwrap();
        assert_eq!(frame.frame_type(), 0x81);
        assert_eq!(frame.data(), &[0x00, 0x01, 0x28, 0x00, b'H', b'i']);
        assert_eq!(frame.checksum(), cs);
    }

    #[test]
    fn test_receive_output_too_small() {
        let (wire, len) = encode(TransmitRequest::to(0x1234), b"ABCD");
        let mut out = [0u8; 6];
        assert_eq!(receive(&wire[..len], &mut out), Err(Error::OutputTooSmall));
    }
}
