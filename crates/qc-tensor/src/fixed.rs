use std::fmt;

/// A Q8.8 fixed-point word: 8 integer bits and 8 fractional bits in a
/// signed 16-bit integer.
///
/// The representable range is `[-128.0, 128.0 - 1/256]` with a resolution
/// of `1/256`. Every operation on this type is modular over the 16-bit
/// two's-complement domain, the way a width-constrained datapath behaves:
/// conversion truncates instead of rounding, and overflow wraps instead of
/// saturating.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Q8_8(i16);

impl Q8_8 {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 8;
    /// `2^FRAC_BITS`, the value of 1.0 in raw units.
    pub const SCALE: i32 = 1 << Self::FRAC_BITS;

    pub const ZERO: Q8_8 = Q8_8(0);
    pub const ONE: Q8_8 = Q8_8(1 << Self::FRAC_BITS);
    pub const MIN: Q8_8 = Q8_8(i16::MIN);
    pub const MAX: Q8_8 = Q8_8(i16::MAX);

    /// Wrap a raw 16-bit word.
    pub const fn from_raw(raw: i16) -> Self {
        Q8_8(raw)
    }

    /// The underlying 16-bit word.
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Encode a real value.
    ///
    /// The value is scaled by 256 and truncated toward zero. The result is
    /// then reduced modulo 2^16 and read as a two's-complement word, so
    /// out-of-range inputs wrap around at any magnitude (e.g. `128.0` encodes
    /// to `-128.0`). NaN and infinities encode to zero.
    pub fn from_f32(real: f32) -> Self {
        // Every finite f32 times 256 is exact in f64.
        let scaled = (f64::from(real) * f64::from(Self::SCALE)).trunc();
        Q8_8(scaled.rem_euclid(65536.0) as u16 as i16)
    }

    /// Decode to a real value: `raw / 256`.
    pub fn to_f32(self) -> f32 {
        f32::from(self.0) / Self::SCALE as f32
    }

    /// Modular addition of two words.
    pub const fn wrapping_add(self, rhs: Q8_8) -> Q8_8 {
        Q8_8(self.0.wrapping_add(rhs.0))
    }

    /// Multiply-accumulate on raw words: `self + a * b (mod 2^16)`.
    ///
    /// This is the accelerator's MAC: the product of the two 16-bit words is
    /// folded into the 16-bit accumulator without rescaling or widening.
    /// Keeping only the low word of each product and of the running sum
    /// gives the same bits as accumulating the full products and truncating
    /// once at the end.
    pub const fn mac(self, a: Q8_8, b: Q8_8) -> Q8_8 {
        Q8_8(self.0.wrapping_add(a.0.wrapping_mul(b.0)))
    }
}

impl From<i16> for Q8_8 {
    fn from(raw: i16) -> Self {
        Q8_8::from_raw(raw)
    }
}

impl fmt::Display for Q8_8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_encode_exact_values() {
        assert_eq!(Q8_8::from_f32(1.0), Q8_8::ONE);
        assert_eq!(Q8_8::from_f32(0.0), Q8_8::ZERO);
        assert_eq!(Q8_8::from_f32(-0.5).raw(), -128);
        assert_eq!(Q8_8::from_f32(1.0 / 256.0).raw(), 1);
    }

    #[test]
    fn test_encode_truncates_toward_zero() {
        // 0.1 * 256 = 25.6
        assert_eq!(Q8_8::from_f32(0.1).raw(), 25);
        assert_eq!(Q8_8::from_f32(-0.1).raw(), -25);
        assert_eq!(Q8_8::from_f32(0.999 / 256.0).raw(), 0);
    }

    #[test]
    fn test_encode_wraps_instead_of_saturating() {
        assert_eq!(Q8_8::from_f32(128.0), Q8_8::MIN);
        assert_abs_diff_eq!(Q8_8::from_f32(200.0).to_f32(), -56.0);
        assert_abs_diff_eq!(Q8_8::from_f32(-129.0).to_f32(), 127.0);
    }

    #[test]
    fn test_encode_wraps_far_out_of_range() {
        // 257 + 1/256 scales to 65793 = 65536 + 257.
        assert_eq!(Q8_8::from_f32(257.0 + 1.0 / 256.0).raw(), 257);
        assert_eq!(Q8_8::from_f32(-256.5).raw(), -128);
        // 1e30 as f32 is a multiple of 2^76, so its low 16 bits after
        // scaling are all zero. A saturating cast would give -1 here.
        assert_eq!(Q8_8::from_f32(1e30), Q8_8::ZERO);
        assert_eq!(Q8_8::from_f32(-1e30), Q8_8::ZERO);
        assert_eq!(Q8_8::from_f32(f32::MAX), Q8_8::ZERO);
    }

    #[test]
    fn test_encode_nan_and_infinity_are_zero() {
        assert_eq!(Q8_8::from_f32(f32::NAN), Q8_8::ZERO);
        assert_eq!(Q8_8::from_f32(f32::INFINITY), Q8_8::ZERO);
        assert_eq!(Q8_8::from_f32(f32::NEG_INFINITY), Q8_8::ZERO);
    }

    #[test]
    fn test_decode() {
        assert_abs_diff_eq!(Q8_8::from_raw(384).to_f32(), 1.5);
        assert_abs_diff_eq!(Q8_8::MIN.to_f32(), -128.0);
        assert_abs_diff_eq!(Q8_8::MAX.to_f32(), 128.0 - 1.0 / 256.0);
    }

    #[test]
    fn test_wrapping_add() {
        let a = Q8_8::from_f32(100.0);
        let b = Q8_8::from_f32(50.0);
        assert_abs_diff_eq!(a.wrapping_add(b).to_f32(), -106.0);
        assert_eq!(Q8_8::ONE.wrapping_add(Q8_8::ONE).raw(), 512);
    }

    #[test]
    fn test_mac_keeps_low_word() {
        // 256 * 256 = 65536, which is 0 mod 2^16.
        let acc = Q8_8::from_raw(7);
        assert_eq!(acc.mac(Q8_8::ONE, Q8_8::ONE), acc);

        // 200 * 200 = 40000 -> 40000 - 65536
        let r = Q8_8::ZERO.mac(Q8_8::from_raw(200), Q8_8::from_raw(200));
        assert_eq!(r.raw(), -25536);
    }

    #[test]
    fn test_mac_matches_wide_accumulation() {
        let pairs = [(1200i16, -3000i16), (32000, 17), (-128, -128), (25, 76)];
        let mut acc = Q8_8::ZERO;
        let mut wide: i64 = 0;
        for &(a, b) in &pairs {
            acc = acc.mac(Q8_8::from_raw(a), Q8_8::from_raw(b));
            wide += i64::from(a) * i64::from(b);
        }
        assert_eq!(acc.raw(), wide as i16);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Q8_8::from_f32(-0.5).to_string(), "-0.50");
        assert_eq!(Q8_8::from_raw(25).to_string(), "0.10");
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_one_lsb(x in -128.0f32..127.99) {
            let back = Q8_8::from_f32(x).to_f32();
            prop_assert!((back - x).abs() <= 1.0 / 256.0, "x={} back={}", x, back);
        }

        #[test]
        fn prop_decode_encode_is_identity(raw in any::<i16>()) {
            let q = Q8_8::from_raw(raw);
            prop_assert_eq!(Q8_8::from_f32(q.to_f32()), q);
        }
    }
}
