//! Constants used across the XBee API frame implementation.
//!
//! This module defines the reserved byte values, fixed header fields, and
//! buffer sizing used by the codec and the serial ring buffer.
//!
//! ## Frame Layout
//!
//! | Offset  | Field            | Value                                   |
//! |---------|------------------|-----------------------------------------|
//! | 0       | Start delimiter  | [`START_DELIMITER`], never escaped      |
//! | 1       | Length MSB       | `0x00`                                  |
//! | 2       | Length LSB       | payload length + [`TX_REQUEST_OVERHEAD`]|
//! | 3       | Frame type       | [`TX_REQUEST_FRAME_TYPE`]               |
//! | 4       | Frame ID         | [`DEFAULT_FRAME_ID`]                    |
//! | 5..=6   | Destination      | big-endian 16-bit address               |
//! | 7       | Options          | [`OPTION_DISABLE_ACK`]                  |
//! | 8..     | Payload          | application bytes                       |
//! | last    | Checksum         | `0xFF - sum(bytes[3..last])`            |
//!
//! ## Buffer Sizing
//!
//! The largest unescaped frame is [`MAX_FRAME_LEN`] bytes. Escaping can at most
//! double every byte but the delimiter, which gives [`MAX_WIRE_FRAME_LEN`].
//! [`QUEUE_CAPACITY`] holds two maximal unescaped frames with a little slack.

/// Marks the beginning of every API frame.
pub const START_DELIMITER: u8 = 0x7E;

/// Introduces an escaped byte on the wire.
pub const ESCAPE: u8 = 0x7D;

/// Software flow control: resume transmission.
pub const XON: u8 = 0x11;

/// Software flow control: pause transmission.
pub const XOFF: u8 = 0x13;

/// Value XORed with a reserved byte to form its escaped replacement.
pub const ESCAPE_MASK: u8 = 0x20;

/// The bytes which are never sent unescaped after the start delimiter.
pub const RESERVED: [u8; 4] = [START_DELIMITER, ESCAPE, XON, XOFF];

/// API identifier of a 16-bit address transmit request.
pub const TX_REQUEST_FRAME_TYPE: u8 = 0x01;

/// Frame ID used when no transmit status correlation is wanted.
pub const DEFAULT_FRAME_ID: u8 = 0x00;

/// Transmit option bit which disables the radio acknowledgment.
pub const OPTION_DISABLE_ACK: u8 = 0x01;

/// The default destination: every radio on the PAN.
pub const BROADCAST_ADDRESS: u16 = 0xFFFF;

/// Bytes counted by the length field besides the payload:
/// frame type, frame ID, two address bytes, and the options byte.
pub const TX_REQUEST_OVERHEAD: u8 = 5;

/// Offset of the first payload byte in an unescaped transmit request.
pub const TX_PAYLOAD_OFFSET: usize = 8;

/// Bytes outside the region counted by the length field:
/// delimiter, length MSB, length LSB, and checksum.
pub const FRAME_ENVELOPE_LEN: usize = 4;

/// Maximum size (in bytes) of an unescaped frame.
pub const MAX_FRAME_LEN: usize = 100;

/// Maximum size (in bytes) of a transmit request payload.
///
/// This is the maximum frame size minus the eight header bytes and the checksum.
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - TX_PAYLOAD_OFFSET - 1;

/// Maximum size (in bytes) of an escaped frame on the wire.
pub const MAX_WIRE_FRAME_LEN: usize = 2 * MAX_FRAME_LEN - 1;

/// Smallest number of wire bytes [`receive`](crate::frame::receive) will look at.
pub const MIN_FRAME_LEN: usize = 10;

/// Default capacity of the serial [`RingBuffer`](crate::queue::RingBuffer).
pub const QUEUE_CAPACITY: usize = 220;
