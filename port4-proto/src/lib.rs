//! Port 0x04 measurement messages: types, fixed-point codecs, and serialization.
//!
//! This crate provides everything needed to produce port 0x04 telemetry
//! messages for a battery-powered environmental/metering device:
//!
//! - **Types**: the in-memory measurement record
//!   - [`MeasurementRecord`] - Five independently optional fields
//!   - [`EnvironmentReading`] - Temperature and humidity pair
//!   - [`RegisterBank`] - Up to [`MAX_REGISTERS`] raw register values
//!   - [`MeasurementField`] - Single field assignment
//!
//! - **Codecs**: quantize physical values into 16-bit wire integers
//!   - [`codec`] - Rounding, saturating fixed-point encoders
//!   - [`flt16`] - LoRaWAN `uflt16`/`sflt16` encoders (not used by port 0x04)
//!
//! - **Serialization**: turn a record into bytes
//!   - [`Serialize`] trait - Serialize into slices, `heapless` vectors, writers
//!   - [`encode()`] - Encode into a growable [`MessageBuffer`] (`alloc` feature)
//!   - [`MeasurementBuilder`] - Fluent builder API
//!
//! - **Text**: the line-oriented tooling around the encoder
//!   - [`RecordParser`] - Build records from `key value` tokens
//!   - [`HexDump`] - Display encoded bytes as `01 34 cd`
//!
//! # Message Format
//!
//! ```text
//! <flags> [vbat:2] [vsys:2] [boot:1] [temp:2 rh:2] [reg:2]...
//! ```
//!
//! | Offset | Field | Condition | Size |
//! |--------|-------|-----------|------|
//! | 0 | Flags | always | 1 |
//! | +0 | Battery voltage | bit 0 | 2, big-endian, V × 4096 |
//! | +0/2 | System voltage | bit 1 | 2, big-endian, V × 4096 |
//! | +0/2 | Boot count | bit 2 | 1, raw |
//! | +0/2 | Temperature, humidity | bit 3 | 2 + 2, big-endian, °C × 256, %RH × 65535 / 100 |
//! | tail | Registers | field present | 2 each, big-endian, unsigned |
//!
//! Registers have no flag bit and no count: when present they always trail
//! the message and their number is implied by the message length.
//!
//! # Examples
//!
//! ## Serializing a Record
//!
//! ```
//! use port4_proto::{MeasurementRecord, Serialize};
//!
//! let record = MeasurementRecord {
//!     battery_voltage: Some(3.3),
//!     ..MeasurementRecord::new()
//! };
//!
//! let mut buf = [0u8; 16];
//! let len = record.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0x01, 0x34, 0xCD]);
//! ```
//!
//! ## Serializing with the Builder API
//!
//! ```
//! use port4_proto::MeasurementBuilder;
//!
//! let mut buf = [0u8; 16];
//! let len = MeasurementBuilder::new()
//!     .boot_count(7)
//!     .environment(22.5, 45.0)
//!     .serialize(&mut buf)
//!     .unwrap();
//! assert_eq!(&buf[..len], &[0x0C, 0x07, 0x16, 0x80, 0x73, 0x33]);
//! ```
//!
//! ## Parsing Text Input
//!
//! ```
//! use port4_proto::RecordParser;
//!
//! let mut parser = RecordParser::new();
//! let mut records = Vec::new();
//! for token in "Vbat 3.3 Modbus [ 100 200 ] .".split_whitespace() {
//!     if let Some(record) = parser.push_token(token).unwrap() {
//!         records.push(record);
//!     }
//! }
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].registers.as_ref().unwrap().count(), 2);
//! ```
//!
//! # Features
//!
//! - **`alloc`** (default): Enable [`MessageBuffer`] and [`encode()`]
//! - **`std`**: Enable standard library support (for host tools and testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Enable `serialize_io()` methods for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default. Without the `alloc` feature it
//! performs no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod buffer;
pub mod builder;
pub mod codec;
pub mod flt16;
pub mod fmt;
pub mod parser;
pub mod serialize;
pub mod types;

// Re-export types at crate root for convenience
#[cfg(feature = "alloc")]
pub use buffer::MessageBuffer;
pub use builder::MeasurementBuilder;
pub use codec::{
    encode_humidity, encode_register, encode_temperature, encode_voltage, round_saturate_i16,
    round_saturate_u16,
};
pub use flt16::{f2sflt16, f2uflt16};
pub use fmt::HexDump;
pub use parser::{ParseError, RecordParser};
#[cfg(feature = "alloc")]
pub use serialize::encode;
pub use serialize::{Serialize, SerializeError, MAX_MESSAGE_SIZE};
pub use types::{
    CapacityError, EnvironmentReading, FieldKey, Flags, MeasurementField, MeasurementRecord,
    RegisterBank, MAX_REGISTERS,
};
