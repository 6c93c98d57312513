//! Minimal decimal conversion for typed lookups.
//!
//! The grammar is an optional `-`, decimal digits, and for floating point an
//! optional `.` followed by fraction digits. Parsing stops at the first byte
//! outside that grammar, so `"12px"` reads as 12 and `"px"` as 0. There is no
//! exponent syntax and no overflow detection: integers wrap.

/// Types a configuration value can be converted to.
pub trait FromValue: Sized {
    /// Converts `value`; anything unparseable yields zero.
    fn from_value(value: &[u8]) -> Self;
}

fn split_sign(value: &[u8]) -> (bool, &[u8]) {
    match value.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, value),
    }
}

fn leading_digits(value: &[u8]) -> impl Iterator<Item = u8> + '_ {
    value
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| b - b'0')
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
            fn from_value(value: &[u8]) -> Self {
                let (negative, digits) = split_sign(value);
                let magnitude = leading_digits(digits)
                    .fold(0 as $ty, |acc, d| acc.wrapping_mul(10).wrapping_add(d as $ty));
                if negative { magnitude.wrapping_neg() } else { magnitude }
            }
        }
    )*};
}

impl_from_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_value_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: &[u8]) -> Self {
                let (negative, rest) = split_sign(value);
                let whole_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
                let mut result = leading_digits(rest).fold(0.0, |acc: $ty, d| acc * 10.0 + <$ty>::from(d));
                if let Some((b'.', fraction)) = rest[whole_len..].split_first() {
                    let mut scale: $ty = 0.1;
                    for d in leading_digits(fraction) {
                        result += <$ty>::from(d) * scale;
                        scale /= 10.0;
                    }
                }
                if negative { -result } else { result }
            }
        }
    )*};
}

impl_from_value_float!(f32, f64);
