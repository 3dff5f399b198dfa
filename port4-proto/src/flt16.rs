//! LoRaWAN 16-bit normalized float encoders.
//!
//! These are the `uflt16` and `sflt16` formats used by other LoRaWAN
//! message types. Port 0x04 does not use them; they are kept so that a
//! device can mix message types with one codec crate.
//!
//! ## `uflt16`
//!
//! Encodes a value in `[0, 1)`:
//!
//! ```text
//! bits 15..12  exponent (biased by 15)
//! bits 11..0   fraction
//! ```
//!
//! ## `sflt16`
//!
//! Encodes a value in `(-1, 1)` in sign/magnitude form (not two's complement):
//!
//! ```text
//! bit 15       sign
//! bits 14..11  exponent (biased by 15)
//! bits 10..0   fraction
//! ```
//!
//! Both formats round the fraction half up and saturate on overflow.

const EXPONENT_BIAS: i32 = 15;
const MAX_EXPONENT: i32 = 15;

/// Split a float into a mantissa in `[0.5, 1)` (sign preserved) and a power of two.
///
/// Matches C `frexpf`: zero, infinities and NaN come back unchanged with exponent 0.
fn frexp(f: f32) -> (f32, i32) {
    if f == 0.0 || !f.is_finite() {
        return (f, 0);
    }

    let mut bits = f.to_bits();
    let mut exp = ((bits >> 23) & 0xFF) as i32;
    if exp == 0 {
        // Subnormal: normalize by 2^25 first.
        bits = (f * f32::from_bits(0x4C00_0000)).to_bits();
        exp = ((bits >> 23) & 0xFF) as i32 - 25;
    }

    let mantissa = f32::from_bits((bits & 0x807F_FFFF) | (126 << 23));
    (mantissa, exp - 126)
}

/// Encode a value in `[0, 1)` as LoRaWAN `uflt16`.
///
/// Returns `0` for negative values and `0xFFFF` for values `>= 1.0` or
/// values that round up past the largest exponent.
#[must_use]
pub fn f2uflt16(f: f32) -> u16 {
    if f < 0.0 {
        return 0;
    }
    if f >= 1.0 {
        return 0xFFFF;
    }

    let (normal, exp) = frexp(f);

    // Useful exponents are [0, -15]; anything smaller underflows to 0.
    let mut exp = (exp + EXPONENT_BIAS).max(0);

    let mut fraction = (normal * 4096.0 + 0.5) as u16;
    if fraction >= 1 << 12 {
        fraction = 1 << 11;
        exp += 1;
    }

    if exp > MAX_EXPONENT {
        return 0xFFFF;
    }

    ((exp as u16) << 12) | fraction
}

/// Encode a value in `(-1, 1)` as LoRaWAN `sflt16`.
///
/// Returns `0xFFFF` for values `<= -1.0` and `0x7FFF` for values `>= 1.0`.
#[must_use]
pub fn f2sflt16(f: f32) -> u16 {
    if f <= -1.0 {
        return 0xFFFF;
    }
    if f >= 1.0 {
        return 0x7FFF;
    }

    let (mut normal, exp) = frexp(f);

    let mut sign = 0u16;
    if normal < 0.0 {
        sign = 0x8000;
        normal = -normal;
    }

    let mut exp = (exp + EXPONENT_BIAS).max(0);

    let mut fraction = (normal * 2048.0 + 0.5) as u16;
    if fraction >= 1 << 11 {
        fraction = 1 << 10;
        exp += 1;
    }

    if exp > MAX_EXPONENT {
        return 0x7FFF | sign;
    }

    sign | ((exp as u16) << 11) | fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp() {
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(0.75), (0.75, 0));
        assert_eq!(frexp(0.25), (0.5, -1));
        assert_eq!(frexp(-3.0), (-0.75, 2));
        assert_eq!(frexp(0.0), (0.0, 0));
    }

    #[test]
    fn test_frexp_subnormal() {
        let tiny = f32::from_bits(1); // 2^-149
        assert_eq!(frexp(tiny), (0.5, -148));
    }

    #[test]
    fn test_uflt16_values() {
        assert_eq!(f2uflt16(0.5), 0xF800);
        assert_eq!(f2uflt16(0.75), 0xFC00);
        assert_eq!(f2uflt16(0.25), 0xE800);
        assert_eq!(f2uflt16(0.125), 0xD800);
    }

    #[test]
    fn test_uflt16_zero_has_top_exponent() {
        // frexp(0) yields exponent 0, so zero lands in exponent field 15 with
        // a zero fraction, which still decodes to 0.
        assert_eq!(f2uflt16(0.0), 0xF000);
    }

    #[test]
    fn test_uflt16_saturates() {
        assert_eq!(f2uflt16(-0.1), 0);
        assert_eq!(f2uflt16(1.0), 0xFFFF);
        assert_eq!(f2uflt16(5.0), 0xFFFF);
        // Rounds up past 1.0
        assert_eq!(f2uflt16(0.99999), 0xFFFF);
    }

    #[test]
    fn test_uflt16_fraction_carry() {
        // 0.4999999 rounds its fraction up to 4096, carrying into the exponent.
        assert_eq!(f2uflt16(0.499_999_9), 0xF800);
    }

    #[test]
    fn test_uflt16_underflow() {
        // 2^-20 is below the smallest exponent; the exponent field clamps to 0
        // and the mantissa is kept.
        let tiny = 1.0 / 1_048_576.0;
        assert_eq!(f2uflt16(tiny), 0x0800);
        assert_eq!(f2uflt16(0.75 / 1_048_576.0), 0x0C00);
    }

    #[test]
    fn test_sflt16_underflow() {
        let tiny = 1.0 / 1_048_576.0;
        assert_eq!(f2sflt16(tiny), 0x0400);
        assert_eq!(f2sflt16(-tiny), 0x8400);
    }

    #[test]
    fn test_sflt16_values() {
        assert_eq!(f2sflt16(0.5), 0x7C00);
        assert_eq!(f2sflt16(-0.5), 0xFC00);
        assert_eq!(f2sflt16(0.25), 0x7400);
        assert_eq!(f2sflt16(-0.25), 0xF400);
    }

    #[test]
    fn test_sflt16_saturates() {
        assert_eq!(f2sflt16(1.0), 0x7FFF);
        assert_eq!(f2sflt16(2.0), 0x7FFF);
        assert_eq!(f2sflt16(-1.0), 0xFFFF);
        assert_eq!(f2sflt16(-2.0), 0xFFFF);
        assert_eq!(f2sflt16(0.9999), 0x7FFF);
        assert_eq!(f2sflt16(-0.9999), 0xFFFF);
    }
}
