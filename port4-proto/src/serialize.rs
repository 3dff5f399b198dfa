//! Port 0x04 message serialization.
//!
//! This module provides the [`Serialize`] trait for [`MeasurementRecord`]
//! and, with the `alloc` feature, the [`encode()`] function.
//!
//! # Message Layout
//!
//! ```text
//! <flags> [vbat:2] [vsys:2] [boot:1] [temp:2 rh:2] [reg:2]...
//! ```
//!
//! The flag byte is written first as a placeholder and patched once every
//! present field has been appended. Registers are appended last with no
//! flag bit.
//!
//! # Example
//!
//! ```
//! use port4_proto::{MeasurementRecord, RegisterBank, Serialize};
//!
//! let record = MeasurementRecord {
//!     registers: Some(RegisterBank::from_slice(&[100.0, 200.0]).unwrap()),
//!     ..MeasurementRecord::new()
//! };
//! let mut buf = [0u8; 16];
//! let len = record.serialize(&mut buf).unwrap();
//!
//! assert_eq!(&buf[..len], &[0x00, 0x00, 0x64, 0x00, 0xC8]);
//! ```

#[cfg(feature = "alloc")]
use crate::buffer::MessageBuffer;
use crate::buffer::ByteSink;
use crate::codec::{encode_humidity, encode_register, encode_temperature, encode_voltage};
use crate::fmt::HexDump;
use crate::types::{Flags, MeasurementRecord, MAX_REGISTERS};

/// Largest message a record can produce.
///
/// Breakdown: flags(1) + vbat(2) + vsys(2) + boot(1) + env(4) + 113 registers(226) = 236
pub const MAX_MESSAGE_SIZE: usize = 1 + 2 + 2 + 1 + 4 + 2 * MAX_REGISTERS;

/// Error type for serialization operations.
///
/// Encoding itself never fails; these come from the output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized message.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SerializeError {}

/// Writes into a borrowed slice, tracking the fill position.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl ByteSink for SliceWriter<'_> {
    type Error = SerializeError;

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), SerializeError> {
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(SerializeError::BufferTooSmall)?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    #[inline]
    fn overwrite(&mut self, index: usize, byte: u8) {
        self.buf[..self.pos][index] = byte;
    }
}

/// Write `record` to `out` in wire order.
fn encode_into<S: ByteSink>(record: &MeasurementRecord, out: &mut S) -> Result<(), S::Error> {
    let mut flags = Flags::NONE;

    let flags_index = out.position();
    out.put(0)?;

    if let Some(v) = record.battery_voltage {
        flags |= Flags::BATTERY_VOLTAGE;
        out.put_be16(encode_voltage(v))?;
    }

    if let Some(v) = record.system_voltage {
        flags |= Flags::SYSTEM_VOLTAGE;
        out.put_be16(encode_voltage(v))?;
    }

    if let Some(n) = record.boot_count {
        flags |= Flags::BOOT_COUNT;
        out.put(n)?;
    }

    if let Some(env) = &record.environment {
        flags |= Flags::ENVIRONMENT;
        out.put_be16(encode_temperature(env.temperature))?;
        out.put_be16(encode_humidity(env.humidity))?;
    }

    // No flag bit: registers trail the message.
    if let Some(bank) = &record.registers {
        for &value in bank {
            out.put_be16(encode_register(value))?;
        }
    }

    out.overwrite(flags_index, flags.raw());
    Ok(())
}

/// Encode a record into a new [`MessageBuffer`].
///
/// # Example
///
/// ```
/// use port4_proto::{encode, MeasurementRecord};
///
/// let message = encode(&MeasurementRecord::new());
/// assert_eq!(&message[..], &[0x00]);
/// ```
#[cfg(feature = "alloc")]
#[must_use]
pub fn encode(record: &MeasurementRecord) -> MessageBuffer {
    let mut buf = MessageBuffer::with_capacity(record.encoded_len());
    match encode_into(record, &mut buf) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    log::trace!("encoded port 0x04 message: {} bytes", buf.len());
    buf
}

/// Extension trait for serializing port 0x04 messages.
///
/// Implemented for [`MeasurementRecord`].
///
/// # Example
///
/// ```
/// use port4_proto::{MeasurementRecord, Serialize};
///
/// let record = MeasurementRecord::new();
/// let mut buf = [0u8; 8];
/// let len = record.serialize(&mut buf).unwrap();
/// assert_eq!(len, 1);
/// ```
pub trait Serialize {
    /// Exact number of bytes [`serialize`](Self::serialize) will write.
    fn encoded_len(&self) -> usize;

    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        // Resize to full capacity to allow serialize() to write
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Write the message as a hex dump (`01 34 cd`) to a `core::fmt::Write`.
    ///
    /// This can be used with types like `heapless::String`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// This can be used with a radio modem UART or other I/O peripherals.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;
}

impl Serialize for MeasurementRecord {
    fn encoded_len(&self) -> usize {
        let mut len = 1;
        if self.battery_voltage.is_some() {
            len += 2;
        }
        if self.system_voltage.is_some() {
            len += 2;
        }
        if self.boot_count.is_some() {
            len += 1;
        }
        if self.environment.is_some() {
            len += 4;
        }
        if let Some(bank) = &self.registers {
            len += 2 * bank.count();
        }
        len
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < self.encoded_len() {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut writer = SliceWriter::new(buf);
        encode_into(self, &mut writer)?;
        Ok(writer.position())
    }

    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_MESSAGE_SIZE];
        let len = self.serialize(&mut buf)?;

        write!(writer, "{}", HexDump(&buf[..len])).map_err(|_| SerializeError::WriteError)
    }

    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_MESSAGE_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}
