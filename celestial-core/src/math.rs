//! Small numeric helpers.
//!
//! Floating point goes through `libm` so results do not depend on the host
//! platform's libm; integer helpers use Euclidean division so that negative
//! day counts floor instead of truncating toward zero.

#[inline]
pub fn sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Rounds to the nearest integer, ties to even.
#[inline]
pub fn rint(x: f64) -> f64 {
    libm::rint(x)
}

/// Splits `value` into a floored quotient and a non-negative remainder.
///
/// `divisor` must be positive.
#[inline]
pub fn floor_div_rem(value: i64, divisor: i64) -> (i64, i64) {
    (value.div_euclid(divisor), value.rem_euclid(divisor))
}

/// `10^exp` for `exp <= 18`.
#[inline]
pub const fn pow10(exp: u32) -> i64 {
    let mut result = 1_i64;
    let mut i = 0;
    while i < exp {
        result *= 10;
        i += 1;
    }
    result
}
