//! No-std hex formatting for encoded messages.

use core::fmt::{self, Write};

/// Hex digits lookup table for fast conversion.
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Displays bytes as lowercase hex pairs separated by single spaces.
///
/// This is the format used for test vectors:
///
/// ```
/// use port4_proto::HexDump;
///
/// assert_eq!(HexDump(&[0x01, 0x34, 0xCD]).to_string(), "01 34 cd");
/// assert_eq!(HexDump(&[]).to_string(), "");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_char(HEX_DIGITS[(byte >> 4) as usize] as char)?;
            f.write_char(HEX_DIGITS[(byte & 0xF) as usize] as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_hex_dump_single_byte() {
        assert_eq!(HexDump(&[0x00]).to_string(), "00");
        assert_eq!(HexDump(&[0xFF]).to_string(), "ff");
    }

    #[test]
    fn test_hex_dump_separators() {
        let bytes = [0x0C, 0x07, 0x16, 0x80, 0x73, 0x33];
        assert_eq!(HexDump(&bytes).to_string(), "0c 07 16 80 73 33");
    }

    #[test]
    fn test_hex_dump_every_byte() {
        for byte in 0..=u8::MAX {
            assert_eq!(HexDump(&[byte]).to_string(), std::format!("{:02x}", byte));
        }
    }

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(HexDump(&[]).to_string(), "");
    }

    #[test]
    fn test_hex_dump_into_heapless_string() {
        let mut s: heapless::String<16> = heapless::String::new();
        write!(s, "{}", HexDump(&[0xAB, 0x01])).unwrap();
        assert_eq!(s.as_str(), "ab 01");
    }
}
