//! Fixed-point quantization of physical values into port 0x04 wire integers.
//!
//! Every conversion rounds half up (`floor(x + 0.5)`, not ties-to-even) and
//! saturates to the range of its 16-bit encoding. Out-of-range inputs clamp
//! to the nearest extremum instead of wrapping. NaN quantizes to zero.
//!
//! | Quantity | Scale | Wire type | Range |
//! |----------|-------|-----------|-------|
//! | Voltage | × 4096 | `i16` | ±8 V |
//! | Temperature | × 256 | `i16` | ±128 °C |
//! | Humidity | × 65535 / 100 | `u16` | 0–100 %RH |
//! | Register | × 1 | `u16` | 0–65535 |

use fixed::types::{I4F12, I8F8};

/// Voltage scale: 1 LSB = 1/4096 V.
pub const VOLTAGE_SCALE: f32 = 4096.0;

/// Temperature scale: 1 LSB = 1/256 °C.
pub const TEMPERATURE_SCALE: f32 = 256.0;

/// Wire value of 100 %RH.
pub const HUMIDITY_FULL_SCALE: f32 = 65535.0;

/// `floor(x + 0.5)`, saturating at the `i32` range.
#[inline]
fn round_half_up(x: f32) -> i32 {
    let n = x + 0.5;
    // `as` truncates toward zero and saturates; step down for negative fractions.
    let t = n as i32;
    if (t as f32) > n {
        t.saturating_sub(1)
    } else {
        t
    }
}

/// Round half up and saturate to `[-32768, 32767]`.
#[inline]
#[must_use]
pub fn round_saturate_i16(x: f32) -> i16 {
    round_half_up(x).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Round half up and saturate to `[0, 65535]`.
#[inline]
#[must_use]
pub fn round_saturate_u16(x: f32) -> u16 {
    round_half_up(x).clamp(0, i32::from(u16::MAX)) as u16
}

/// Quantize a voltage to Q4.12.
#[inline]
#[must_use]
pub fn voltage_fixed(volts: f32) -> I4F12 {
    I4F12::from_bits(round_saturate_i16(volts * VOLTAGE_SCALE))
}

/// Quantize a temperature to Q8.8.
#[inline]
#[must_use]
pub fn temperature_fixed(celsius: f32) -> I8F8 {
    I8F8::from_bits(round_saturate_i16(celsius * TEMPERATURE_SCALE))
}

/// Encode a voltage for the wire (two's complement, 1/4096 V per LSB).
#[inline]
#[must_use]
pub fn encode_voltage(volts: f32) -> u16 {
    voltage_fixed(volts).to_bits() as u16
}

/// Encode a temperature for the wire (two's complement, 1/256 °C per LSB).
#[inline]
#[must_use]
pub fn encode_temperature(celsius: f32) -> u16 {
    temperature_fixed(celsius).to_bits() as u16
}

/// Encode relative humidity, mapping `[0, 100]` onto the full `u16` span.
#[inline]
#[must_use]
pub fn encode_humidity(percent: f32) -> u16 {
    round_saturate_u16(percent * HUMIDITY_FULL_SCALE / 100.0)
}

/// Encode a raw register value. No scaling.
#[inline]
#[must_use]
pub fn encode_register(value: f32) -> u16 {
    round_saturate_u16(value)
}
