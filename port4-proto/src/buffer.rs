//! Byte buffers that encoded messages are written into.
//!
//! [`MessageBuffer`] owns a growable byte sequence and exposes only the
//! append and overwrite operations the encoder needs. The crate-internal
//! [`ByteSink`] trait lets the encoder write into either a `MessageBuffer`
//! or a caller-provided slice with the same code.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Append-with-overwrite target for the encoder.
pub(crate) trait ByteSink {
    type Error;

    /// Number of bytes written so far.
    fn position(&self) -> usize;

    /// Append one byte.
    fn put(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Rewrite a byte that has already been appended.
    fn overwrite(&mut self, index: usize, byte: u8);

    /// Append a 16-bit value, most significant byte first.
    #[inline]
    fn put_be16(&mut self, value: u16) -> Result<(), Self::Error> {
        for byte in value.to_be_bytes() {
            self.put(byte)?;
        }
        Ok(())
    }
}

/// Growable, append-only byte sequence with big-endian write helpers.
///
/// # Example
///
/// ```
/// use port4_proto::MessageBuffer;
///
/// let mut buf = MessageBuffer::new();
/// buf.push(0);
/// buf.push_be16(0x1234);
/// buf.push_be32(0xDEAD_BEEF);
/// buf.set(0, 0x80);
/// assert_eq!(&buf[..], &[0x80, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF]);
/// ```
#[cfg(feature = "alloc")]
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct MessageBuffer {
    bytes: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl MessageBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append 2 bytes, most significant first.
    #[inline]
    pub fn push_be16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Append 4 bytes, most significant first.
    #[inline]
    pub fn push_be32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Overwrite a previously appended byte.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize, byte: u8) {
        self.bytes[index] = byte;
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning the bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(feature = "alloc")]
impl core::ops::Deref for MessageBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "alloc")]
impl AsRef<[u8]> for MessageBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "alloc")]
impl From<MessageBuffer> for Vec<u8> {
    fn from(buf: MessageBuffer) -> Self {
        buf.bytes
    }
}

#[cfg(all(feature = "alloc", feature = "defmt"))]
impl defmt::Format for MessageBuffer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:02x}", self.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl ByteSink for MessageBuffer {
    type Error = core::convert::Infallible;

    #[inline]
    fn position(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte);
        Ok(())
    }

    #[inline]
    fn overwrite(&mut self, index: usize, byte: u8) {
        self.set(index, byte);
    }
}
