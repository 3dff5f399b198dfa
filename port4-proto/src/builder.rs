//! Builder pattern API for constructing measurement messages.
//!
//! # Example
//!
//! ```
//! use port4_proto::MeasurementBuilder;
//!
//! let mut buf = [0u8; 64];
//! let len = MeasurementBuilder::new()
//!     .battery_voltage(3.3)
//!     .system_voltage(3.1)
//!     .boot_count(42)
//!     .serialize(&mut buf)
//!     .unwrap();
//! assert_eq!(buf[0], 0x07);
//! assert_eq!(len, 6);
//! ```

#[cfg(feature = "alloc")]
use crate::buffer::MessageBuffer;
use crate::serialize::{Serialize, SerializeError};
use crate::types::{EnvironmentReading, MeasurementField, MeasurementRecord, RegisterBank};

/// Fluent builder for a [`MeasurementRecord`].
///
/// Starts with every field absent; each setter marks its field present.
#[derive(Debug, Clone, Default)]
pub struct MeasurementBuilder {
    record: MeasurementRecord,
}

impl MeasurementBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            record: MeasurementRecord::new(),
        }
    }

    /// Set the battery voltage (V).
    #[must_use]
    pub fn battery_voltage(mut self, volts: f32) -> Self {
        self.record.battery_voltage = Some(volts);
        self
    }

    /// Set the system voltage (V).
    #[must_use]
    pub fn system_voltage(mut self, volts: f32) -> Self {
        self.record.system_voltage = Some(volts);
        self
    }

    /// Set the boot counter.
    #[must_use]
    pub fn boot_count(mut self, count: u8) -> Self {
        self.record.boot_count = Some(count);
        self
    }

    /// Set temperature (°C) and relative humidity (%).
    #[must_use]
    pub fn environment(mut self, temperature: f32, humidity: f32) -> Self {
        self.record.environment = Some(EnvironmentReading::new(temperature, humidity));
        self
    }

    /// Set the register bank.
    #[must_use]
    pub fn registers(mut self, bank: RegisterBank) -> Self {
        self.record.registers = Some(bank);
        self
    }

    /// Apply a single field assignment.
    #[must_use]
    pub fn field(mut self, field: MeasurementField) -> Self {
        self.record.apply(field);
        self
    }

    /// Get the built record without serializing.
    #[must_use]
    pub fn build(self) -> MeasurementRecord {
        self.record
    }

    /// Serialize the message to the provided buffer.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is too small.
    pub fn serialize(self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        self.record.serialize(buf)
    }

    /// Serialize to a `heapless::Vec`.
    pub fn serialize_to_vec<const N: usize>(self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        self.record.serialize_to_vec()
    }

    /// Write the message as a hex dump to a `core::fmt::Write` implementation.
    pub fn serialize_fmt<W: core::fmt::Write>(self, writer: &mut W) -> Result<(), SerializeError> {
        self.record.serialize_fmt(writer)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    #[cfg(feature = "embedded-io")]
    pub fn serialize_io<W: embedded_io::Write>(self, writer: &mut W) -> Result<(), SerializeError> {
        self.record.serialize_io(writer)
    }

    /// Encode into a new [`MessageBuffer`].
    #[cfg(feature = "alloc")]
    #[must_use]
    pub fn encode(self) -> MessageBuffer {
        crate::serialize::encode(&self.record)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_builder_starts_empty() {
        let record = MeasurementBuilder::new().build();
        assert!(record.is_empty());
        assert_eq!(record, MeasurementRecord::new());
    }

    #[test]
    fn test_builder_sets_fields() {
        let record = MeasurementBuilder::new()
            .battery_voltage(3.3)
            .environment(21.0, 40.0)
            .build();

        assert_eq!(record.battery_voltage, Some(3.3));
        assert_eq!(record.system_voltage, None);
        assert_eq!(
            record.environment,
            Some(EnvironmentReading::new(21.0, 40.0))
        );
    }

    #[test]
    fn test_builder_field() {
        let record = MeasurementBuilder::new()
            .field(MeasurementField::BootCount(3))
            .build();
        assert_eq!(record.boot_count, Some(3));
    }

    #[test]
    fn test_builder_serialize() {
        let mut buf = [0u8; 16];
        let len = MeasurementBuilder::new()
            .boot_count(7)
            .environment(22.5, 45.0)
            .serialize(&mut buf)
            .unwrap();
        assert_eq!(&buf[..len], &[0x0C, 0x07, 0x16, 0x80, 0x73, 0x33]);
    }

    #[test]
    fn test_builder_serialize_registers() {
        let bank = RegisterBank::from_slice(&[100.0, 200.0]).unwrap();
        let vec = MeasurementBuilder::new()
            .registers(bank)
            .serialize_to_vec::<8>()
            .unwrap();
        assert_eq!(&vec[..], &[0x00, 0x00, 0x64, 0x00, 0xC8]);
    }

    #[test]
    fn test_builder_serialize_fmt() {
        let mut s = std::string::String::new();
        MeasurementBuilder::new()
            .system_voltage(1.0)
            .serialize_fmt(&mut s)
            .unwrap();
        assert_eq!(s, "02 10 00");
    }

    #[cfg(feature = "embedded-io")]
    #[test]
    fn test_builder_serialize_io() {
        let mut out = [0u8; 8];
        let mut writer = &mut out[..];
        MeasurementBuilder::new()
            .boot_count(7)
            .environment(22.5, 45.0)
            .serialize_io(&mut writer)
            .unwrap();
        assert_eq!(&out[..6], &[0x0C, 0x07, 0x16, 0x80, 0x73, 0x33]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_builder_encode() {
        let message = MeasurementBuilder::new().battery_voltage(3.3).encode();
        assert_eq!(message.as_slice(), &[0x01, 0x34, 0xCD]);
    }
}
