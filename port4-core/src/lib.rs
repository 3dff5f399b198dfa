//! Platform-agnostic measurement pipeline: sources, sinks, and the encoder bridge.
//!
//! This crate provides the abstractions that connect a measurement producer
//! to a message transport without any platform-specific dependencies. It can
//! be used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`input`]: Measurement source trait ([`InputSource`])
//! - [`output`]: Encoded message sink trait ([`OutputSink`])
//! - [`bridge`]: Receives, encodes, and forwards ([`EncoderBridge`])
//!
//! The measurement types and the encoder itself live in [`port4_proto`] and
//! are re-exported here.
//!
//! # Example
//!
//! ```rust
//! use port4_core::{MeasurementRecord, Serialize, MAX_MESSAGE_SIZE};
//!
//! let record = MeasurementRecord {
//!     boot_count: Some(7),
//!     ..MeasurementRecord::new()
//! };
//!
//! let mut buf = [0u8; MAX_MESSAGE_SIZE];
//! let len = record.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0x04, 0x07]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Enable `serialize_io()` in the protocol crate
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod input;
pub mod output;

// Re-export main types at crate root
pub use bridge::{BridgeError, EncoderBridge};
pub use input::{InputError, InputSource};
pub use output::{OutputError, OutputSink};
pub use port4_proto::{
    EnvironmentReading, Flags, MeasurementRecord, ParseError, RecordParser, RegisterBank,
    Serialize, SerializeError, MAX_MESSAGE_SIZE, MAX_REGISTERS,
};
