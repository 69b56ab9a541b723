//! # xbee-api
//!
//! A portable, no_std Rust implementation of the XBee API-mode frame format
//! for serial radio modules such as the XBee Series 1 (802.15.4).
//!
//! This crate provides the two pieces needed to talk to a radio in escaped
//! API mode (`AP=2`) over a plain UART:
//! - a frame codec: byte stuffing, checksums, and 16-bit address transmit requests
//! - a fixed-capacity ring buffer which accumulates received bytes until a
//!   whole frame can be extracted
//! - interrupt-safe buffer access with `critical-section`
//!
//! ## Crate features
//! | Feature          | Description |
//! |------------------|-------------|
//! | `std`            | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `isr` (default)  | Shared ring buffer helpers built on `critical_section::with` |
//! | `defmt-0-3`      | Uses `defmt` logging |
//! | `log`            | Uses `log` logging |
//!
//! ## Wire Format
//!
//! ```text
//! 7E | 00 LL | 01 | ID | AH AL | OP | payload ... | CS
//! ```
//!
//! Everything after the leading `0x7E` is escaped: `0x7E`, `0x7D`, `0x11` and
//! `0x13` are sent as `0x7D` followed by the byte XOR `0x20`. The checksum is
//! `0xFF` minus the low byte of the sum of everything from the frame type to
//! the end of the payload.
//!
//! ## Usage
//!
//! ```rust
//! use xbee_api::consts::MAX_WIRE_FRAME_LEN;
//! use xbee_api::frame::send;
//! use xbee_api::queue::RingBuffer;
//! use xbee_api::reader::FrameReader;
//!
//! // Transmit: build the escaped frame and hand it to the UART.
//! let mut wire = [0u8; MAX_WIRE_FRAME_LEN];
//! let len = send(b"Hello World", 0x0001, &mut wire).unwrap();
//!
//! // Receive: push bytes as they arrive, then pull whole frames out.
//! let mut rx: RingBuffer = RingBuffer::new();
//! for &byte in &wire[..len] {
//!     rx.enqueue(byte).unwrap();
//! }
//! let mut reader = FrameReader::new();
//! let frame = reader.poll(&mut rx).unwrap();
//! assert_eq!(frame.payload(), Some(&b"Hello World"[..]));
//! ```
//!
//! ## Integration Notes
//!
//! - Nothing here blocks; [`reader::FrameReader::poll`] returns
//!   `nb::Error::WouldBlock` until a whole frame is buffered
//! - No acknowledgment or retransmission: transmit requests disable the
//!   radio acknowledgment by default
//! - Only one execution context may touch a [`queue::RingBuffer`] at a time;
//!   use the [`isr`] helpers when an interrupt handler feeds it
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub use embedded_io;
pub use nb;

#[macro_use]
mod fmt;

pub(crate) mod checksum;
pub mod consts;
pub mod error;
pub mod escape;
pub mod frame;
#[cfg(feature = "isr")]
pub mod isr;
pub mod queue;
pub mod reader;
pub mod serial;

pub use error::{Error, Result};
