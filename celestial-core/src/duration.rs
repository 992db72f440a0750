//! Exact fixed-point durations with attosecond resolution.
//!
//! [`FixedDuration`] stores a signed number of whole seconds plus a
//! non-negative fraction of a second counted in attoseconds (10⁻¹⁸ s). Every
//! value is kept normalized so the fraction lies in `[0, 10¹⁸)` and the sign
//! lives entirely in the seconds field:
//!
//! ```text
//!  +1.25 s  ->  seconds =  1, attoseconds = 250_000_000_000_000_000
//!  -1.25 s  ->  seconds = -2, attoseconds = 750_000_000_000_000_000
//! ```
//!
//! This makes ordering a plain lexicographic comparison of the two fields and
//! keeps addition and subtraction exact over the whole `i64` range of seconds,
//! which is roughly ±292 billion years.
//!
//! # Usage
//!
//! ```
//! use celestial_core::FixedDuration;
//!
//! let a = FixedDuration::from_millis(1_250);
//! let b = FixedDuration::new(-1, 250_000_000_000_000_000).unwrap();
//! assert_eq!((a + b).to_f64(), 0.5);
//! assert_eq!(a.multiply(4).unwrap(), FixedDuration::from_seconds(5));
//! assert_eq!("-0.75".parse::<FixedDuration>().unwrap(), b);
//! ```
//!
//! # Wide intermediates
//!
//! Multiplication and division expand the value to a total attosecond count in
//! `i128` before splitting it back into two fields. An `i64` seconds field
//! times 10¹⁸ fits comfortably in 128 bits; products that do not are reported
//! as [`MathErrorKind::Overflow`] rather than wrapping.

use crate::constants::{
    ATTOSECONDS_PER_MILLISECOND, ATTOSECONDS_PER_SECOND, ATTOSECOND_DIGITS, SECONDS_PER_DAY,
    SECONDS_PER_HALF_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::errors::{AstroError, AstroResult, MathErrorKind};
use crate::math::{pow10, rint};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

const ATTOS: i128 = ATTOSECONDS_PER_SECOND as i128;

/// A signed duration of whole seconds plus attoseconds.
///
/// Field order matters: the derived `Ord` compares seconds first, then the
/// always non-negative attosecond fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedDuration {
    seconds: i64,
    attoseconds: i64,
}

impl FixedDuration {
    pub const ZERO: Self = Self::from_parts(0, 0);
    pub const ATTOSECOND: Self = Self::from_parts(0, 1);
    pub const MILLISECOND: Self = Self::from_parts(0, ATTOSECONDS_PER_MILLISECOND);
    pub const SECOND: Self = Self::from_parts(1, 0);
    pub const MINUTE: Self = Self::from_parts(SECONDS_PER_MINUTE, 0);
    pub const HOUR: Self = Self::from_parts(SECONDS_PER_HOUR, 0);
    pub const HALF_DAY: Self = Self::from_parts(SECONDS_PER_HALF_DAY, 0);
    pub const DAY: Self = Self::from_parts(SECONDS_PER_DAY, 0);

    const fn from_parts(seconds: i64, attoseconds: i64) -> Self {
        Self {
            seconds,
            attoseconds,
        }
    }

    /// Creates a duration, normalizing the fraction into `[0, 10¹⁸)`.
    ///
    /// `attoseconds` may be negative or equal to a full second; it is carried
    /// into `seconds`. A fraction whose magnitude exceeds one second is a caller
    /// error and fails with [`MathErrorKind::InvalidInput`].
    pub fn new(seconds: i64, attoseconds: i64) -> AstroResult<Self> {
        if attoseconds.unsigned_abs() > ATTOSECONDS_PER_SECOND as u64 {
            return Err(AstroError::math_error(
                "FixedDuration::new",
                MathErrorKind::InvalidInput,
                "attosecond fraction exceeds one second",
            ));
        }
        Self::carry("FixedDuration::new", seconds, attoseconds)
    }

    /// Moves one second between the fields when `attoseconds` lies in
    /// `(-10¹⁸, 2·10¹⁸)` but outside `[0, 10¹⁸)`.
    fn carry(operation: &str, seconds: i64, attoseconds: i64) -> AstroResult<Self> {
        let overflow = || AstroError::overflow(operation, "seconds out of range");
        if attoseconds < 0 {
            let seconds = seconds.checked_sub(1).ok_or_else(overflow)?;
            Ok(Self::from_parts(seconds, attoseconds + ATTOSECONDS_PER_SECOND))
        } else if attoseconds >= ATTOSECONDS_PER_SECOND {
            let seconds = seconds.checked_add(1).ok_or_else(overflow)?;
            Ok(Self::from_parts(seconds, attoseconds - ATTOSECONDS_PER_SECOND))
        } else {
            Ok(Self::from_parts(seconds, attoseconds))
        }
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_parts(seconds, 0)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self::from_parts(
            millis.div_euclid(1_000),
            millis.rem_euclid(1_000) * ATTOSECONDS_PER_MILLISECOND,
        )
    }

    pub const fn from_attoseconds(attoseconds: i64) -> Self {
        Self::from_parts(
            attoseconds.div_euclid(ATTOSECONDS_PER_SECOND),
            attoseconds.rem_euclid(ATTOSECONDS_PER_SECOND),
        )
    }

    /// Builds a duration from a total attosecond count.
    ///
    /// Fails with [`MathErrorKind::Overflow`] when the whole-second part does not
    /// fit in `i64`.
    pub fn from_total_attoseconds(total: i128) -> AstroResult<Self> {
        let seconds = i64::try_from(total.div_euclid(ATTOS)).map_err(|_| {
            AstroError::overflow(
                "FixedDuration::from_total_attoseconds",
                "seconds component does not fit in 64 bits",
            )
        })?;
        Ok(Self::from_parts(seconds, total.rem_euclid(ATTOS) as i64))
    }

    /// Converts an approximate floating-point number of seconds.
    ///
    /// The value is rounded to the nearest whole second and the residual is
    /// scaled to attoseconds. A negative residual borrows one second so that the
    /// fraction stays non-negative: `-1e-17` becomes
    /// `(-1, 999_999_999_999_999_990)`.
    pub fn from_f64(seconds: f64) -> AstroResult<Self> {
        if !seconds.is_finite() {
            return Err(AstroError::math_error(
                "FixedDuration::from_f64",
                MathErrorKind::NotFinite,
                "seconds must be finite",
            ));
        }
        let whole = rint(seconds);
        if whole >= i64::MAX as f64 || whole < i64::MIN as f64 {
            return Err(AstroError::overflow(
                "FixedDuration::from_f64",
                "seconds out of range",
            ));
        }
        let residual = seconds - whole;
        let attoseconds = rint(residual * ATTOSECONDS_PER_SECOND as f64) as i64;
        Self::new(whole as i64, attoseconds)
    }

    /// Whole seconds, floored.
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Fraction of a second in attoseconds, always in `[0, 10¹⁸)`.
    pub const fn attoseconds(&self) -> i64 {
        self.attoseconds
    }

    pub const fn total_attoseconds(&self) -> i128 {
        self.seconds as i128 * ATTOS + self.attoseconds as i128
    }

    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.attoseconds == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub const fn signum(&self) -> i32 {
        if self.seconds < 0 {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// Nearest `f64` number of seconds. Loses precision beyond ~15 digits.
    pub fn to_f64(&self) -> f64 {
        self.seconds as f64 + self.attoseconds as f64 / ATTOSECONDS_PER_SECOND as f64
    }

    pub fn checked_add(self, other: Self) -> AstroResult<Self> {
        let seconds = self
            .seconds
            .checked_add(other.seconds)
            .ok_or_else(|| AstroError::overflow("FixedDuration::add", "seconds out of range"))?;
        Self::carry("FixedDuration::add", seconds, self.attoseconds + other.attoseconds)
    }

    pub fn checked_sub(self, other: Self) -> AstroResult<Self> {
        let seconds = self
            .seconds
            .checked_sub(other.seconds)
            .ok_or_else(|| AstroError::overflow("FixedDuration::sub", "seconds out of range"))?;
        Self::carry("FixedDuration::sub", seconds, self.attoseconds - other.attoseconds)
    }

    pub fn negate(self) -> AstroResult<Self> {
        if self.attoseconds == 0 {
            let seconds = self.seconds.checked_neg().ok_or_else(|| {
                AstroError::overflow("FixedDuration::negate", "seconds out of range")
            })?;
            Ok(Self::from_parts(seconds, 0))
        } else {
            Ok(Self::from_parts(
                -(self.seconds + 1),
                ATTOSECONDS_PER_SECOND - self.attoseconds,
            ))
        }
    }

    pub fn abs(self) -> AstroResult<Self> {
        if self.is_negative() {
            self.negate()
        } else {
            Ok(self)
        }
    }

    /// Multiplies by a non-negative integer, exactly.
    pub fn multiply(self, factor: i64) -> AstroResult<Self> {
        if factor < 0 {
            return Err(AstroError::math_error(
                "FixedDuration::multiply",
                MathErrorKind::InvalidInput,
                "factor must be non-negative",
            ));
        }
        let product = self
            .total_attoseconds()
            .checked_mul(factor as i128)
            .ok_or_else(|| {
                AstroError::overflow("FixedDuration::multiply", "product exceeds 128 bits")
            })?;
        Self::from_total_attoseconds(product)
    }

    /// Divides by a positive integer, rounding toward negative infinity at
    /// attosecond resolution.
    pub fn divide(self, divisor: i64) -> AstroResult<Self> {
        if divisor == 0 {
            return Err(AstroError::math_error(
                "FixedDuration::divide",
                MathErrorKind::DivisionByZero,
                "divisor is zero",
            ));
        }
        if divisor < 0 {
            return Err(AstroError::math_error(
                "FixedDuration::divide",
                MathErrorKind::InvalidInput,
                "divisor must be positive",
            ));
        }
        Self::from_total_attoseconds(self.total_attoseconds().div_euclid(divisor as i128))
    }

    /// Computes `floor(self * numerator / denominator)` exactly.
    ///
    /// The seconds field is multiplied first and divided with remainder; the
    /// remainder is then carried into the attosecond fraction. No intermediate
    /// exceeds 128 bits for any `i64` inputs.
    pub fn mul_div(self, numerator: i64, denominator: i64) -> AstroResult<Self> {
        if denominator == 0 {
            return Err(AstroError::math_error(
                "FixedDuration::mul_div",
                MathErrorKind::DivisionByZero,
                "denominator is zero",
            ));
        }
        if numerator < 0 || denominator < 0 {
            return Err(AstroError::math_error(
                "FixedDuration::mul_div",
                MathErrorKind::InvalidInput,
                "numerator must be non-negative and denominator positive",
            ));
        }
        let n = numerator as i128;
        let d = denominator as i128;
        let product = self.seconds as i128 * n;
        let quotient = product.div_euclid(d);
        let remainder = product.rem_euclid(d);
        let fraction = (remainder * ATTOS + self.attoseconds as i128 * n) / d;
        let seconds = i64::try_from(quotient + fraction / ATTOS).map_err(|_| {
            AstroError::overflow("FixedDuration::mul_div", "seconds out of range")
        })?;
        Ok(Self::from_parts(seconds, (fraction % ATTOS) as i64))
    }

    /// Rounds to `digits` decimal places of a second.
    ///
    /// Ties round away from zero, symmetrically for negative durations, so
    /// `-1.2345` at three digits becomes `-1.235`. `digits >= 18` returns the
    /// value unchanged.
    pub fn round_to_precision(self, digits: u32) -> AstroResult<Self> {
        if digits >= ATTOSECOND_DIGITS {
            return Ok(self);
        }
        let unit = pow10(ATTOSECOND_DIGITS - digits) as i128;
        let half = unit / 2;
        let total = self.total_attoseconds();
        let rounded = if total >= 0 {
            (total + half) / unit * unit
        } else {
            -((-total + half) / unit * unit)
        };
        Self::from_total_attoseconds(rounded)
    }
}

impl Add for FixedDuration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the sum overflows the seconds field. Use
    /// [`checked_add`](FixedDuration::checked_add) to handle that case.
    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs).expect("adding durations overflowed")
    }
}

impl Sub for FixedDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(rhs).expect("subtracting durations overflowed")
    }
}

impl Neg for FixedDuration {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate().expect("negating duration overflowed")
    }
}

impl AddAssign for FixedDuration {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FixedDuration {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for FixedDuration {
    /// Renders `[-]S.FFFFFFFFFFFFFFFFFF`; a precision (`{:.3}`) truncates the
    /// fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_attoseconds();
        let sign = if total < 0 { "-" } else { "" };
        let magnitude = total.unsigned_abs();
        let whole = magnitude / ATTOS as u128;
        let fraction = format!("{:018}", magnitude % ATTOS as u128);
        match f.precision().map(|p| p.min(ATTOSECOND_DIGITS as usize)) {
            Some(0) => write!(f, "{}{}", sign, whole),
            Some(p) => write!(f, "{}{}.{}", sign, whole, &fraction[..p]),
            None => write!(f, "{}{}.{}", sign, whole, fraction),
        }
    }
}

impl FromStr for FixedDuration {
    type Err = AstroError;

    /// Parses an exact decimal number of seconds such as `-12.000000000000000001`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            AstroError::math_error("FixedDuration::from_str", MathErrorKind::InvalidInput, reason)
        };
        let s = s.trim();
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected decimal digits"));
        }
        if frac_part.len() > ATTOSECOND_DIGITS as usize {
            return Err(invalid("more than 18 fractional digits"));
        }
        // i64::MAX has 19 digits; anything longer cannot fit.
        if int_part.len() > 19 {
            return Err(AstroError::overflow(
                "FixedDuration::from_str",
                "seconds out of range",
            ));
        }
        let mut whole: i128 = 0;
        for b in int_part.bytes() {
            whole = whole * 10 + i128::from(b - b'0');
        }
        let mut fraction: i128 = 0;
        for b in frac_part.bytes() {
            fraction = fraction * 10 + i128::from(b - b'0');
        }
        fraction *= pow10(ATTOSECOND_DIGITS - frac_part.len() as u32) as i128;
        let total = whole * ATTOS + fraction;
        Self::from_total_attoseconds(if negative { -total } else { total })
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for FixedDuration {
    fn arbitrary(g: &mut quickcheck::Gen) -> FixedDuration {
        // Keep seconds well inside i64 so sums and small products stay valid.
        let seconds = i64::from(i32::arbitrary(g)) * 1_000;
        let attoseconds = (u64::arbitrary(g) % ATTOSECONDS_PER_SECOND as u64) as i64;
        FixedDuration::from_parts(seconds, attoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_normalizes_negative_fraction() {
        let d = FixedDuration::new(0, -250_000_000_000_000_000).unwrap();
        assert_eq!(d.seconds(), -1);
        assert_eq!(d.attoseconds(), 750_000_000_000_000_000);
    }

    #[test]
    fn test_new_carries_full_second() {
        let d = FixedDuration::new(3, ATTOSECONDS_PER_SECOND).unwrap();
        assert_eq!(d, FixedDuration::from_seconds(4));
    }

    #[test]
    fn test_new_rejects_oversized_fraction() {
        let err = FixedDuration::new(0, ATTOSECONDS_PER_SECOND + 1).unwrap_err();
        assert!(matches!(
            err,
            AstroError::MathError {
                kind: MathErrorKind::InvalidInput,
                ..
            }
        ));
        assert!(FixedDuration::new(0, -ATTOSECONDS_PER_SECOND - 1).is_err());
    }

    #[test]
    fn test_new_overflow() {
        assert!(FixedDuration::new(i64::MIN, -1).unwrap_err().is_overflow());
    }

    #[test]
    fn test_from_f64_tiny_negative() {
        let d = FixedDuration::from_f64(-1e-17).unwrap();
        assert_eq!(d.seconds(), -1);
        assert_eq!(d.attoseconds(), 999_999_999_999_999_990);
    }

    #[test]
    fn test_from_f64_values() {
        assert_eq!(
            FixedDuration::from_f64(32.184).unwrap().seconds(),
            32
        );
        assert_eq!(
            FixedDuration::from_f64(-19.0).unwrap(),
            FixedDuration::from_seconds(-19)
        );
        assert_eq!(
            FixedDuration::from_f64(0.625).unwrap(),
            FixedDuration::from_millis(625)
        );
        assert!(FixedDuration::from_f64(f64::NAN).is_err());
        assert!(FixedDuration::from_f64(1e300).unwrap_err().is_overflow());
    }

    #[test]
    fn test_to_f64() {
        assert_abs_diff_eq!(FixedDuration::from_millis(-1_500).to_f64(), -1.5);
        assert_abs_diff_eq!(
            FixedDuration::from_f64(32.184).unwrap().to_f64(),
            32.184,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = FixedDuration::from_millis(-1_500);
        let b = FixedDuration::from_millis(-500);
        let c = FixedDuration::from_millis(500);
        assert!(a < b && b < c);
        assert!(FixedDuration::ATTOSECOND > FixedDuration::ZERO);
    }

    #[test]
    fn test_add_sub_carry() {
        let a = FixedDuration::from_millis(750);
        let b = FixedDuration::from_millis(500);
        assert_eq!(a + b, FixedDuration::from_millis(1_250));
        assert_eq!(b - a, FixedDuration::from_millis(-250));
        assert!(FixedDuration::from_seconds(i64::MAX)
            .checked_add(FixedDuration::SECOND)
            .unwrap_err()
            .is_overflow());
    }

    #[test]
    fn test_negate() {
        let d = FixedDuration::from_millis(1_250);
        assert_eq!(-d, FixedDuration::from_millis(-1_250));
        assert_eq!(-FixedDuration::ZERO, FixedDuration::ZERO);
        assert!(FixedDuration::from_seconds(i64::MIN).negate().is_err());
        assert_eq!(
            FixedDuration::from_millis(-3_001).abs().unwrap(),
            FixedDuration::from_millis(3_001)
        );
    }

    #[test]
    fn test_multiply_overflow() {
        let d = FixedDuration::new(10_000_000_000, 1).unwrap();
        assert!(d.multiply(123_456_789_012).unwrap_err().is_overflow());
    }

    #[test]
    fn test_multiply_and_divide() {
        let d = FixedDuration::from_millis(1_001);
        assert_eq!(d.multiply(1_000).unwrap(), FixedDuration::from_seconds(1_001));
        assert_eq!(FixedDuration::SECOND.divide(3).unwrap().attoseconds(), 333_333_333_333_333_333);
        assert_eq!(
            FixedDuration::from_seconds(-1).divide(3).unwrap(),
            FixedDuration::new(-1, 666_666_666_666_666_666).unwrap()
        );
    }

    #[test]
    fn test_multiply_divide_reject_bad_scalars() {
        assert!(!FixedDuration::SECOND.multiply(-1).unwrap_err().is_overflow());
        assert!(matches!(
            FixedDuration::SECOND.divide(0).unwrap_err(),
            AstroError::MathError {
                kind: MathErrorKind::DivisionByZero,
                ..
            }
        ));
        assert!(matches!(
            FixedDuration::SECOND.divide(-2).unwrap_err(),
            AstroError::MathError {
                kind: MathErrorKind::InvalidInput,
                ..
            }
        ));
    }

    #[test]
    fn test_mul_div_drift_rate() {
        // 0.001296 s/day over 365 days.
        let elapsed = FixedDuration::from_seconds(365 * SECONDS_PER_DAY);
        let drift = elapsed.mul_div(1_296_000, 1_000_000_000 * SECONDS_PER_DAY).unwrap();
        assert_eq!(drift, FixedDuration::new(0, 473_040_000_000_000_000).unwrap());
    }

    #[test]
    fn test_mul_div_large_operands() {
        let d = FixedDuration::from_seconds(i64::MAX / 2);
        assert_eq!(d.mul_div(i64::MAX, i64::MAX).unwrap(), d);
        assert!(d.mul_div(4, 1).unwrap_err().is_overflow());
        assert!(matches!(
            d.mul_div(1, 0).unwrap_err(),
            AstroError::MathError {
                kind: MathErrorKind::DivisionByZero,
                ..
            }
        ));
        assert!(d.mul_div(1, -1).is_err());
    }

    #[test]
    fn test_round_to_precision_positive() {
        let d: FixedDuration = "1.2345".parse().unwrap();
        assert_eq!(d.round_to_precision(3).unwrap(), "1.235".parse().unwrap());
        assert_eq!(d.round_to_precision(2).unwrap(), "1.23".parse().unwrap());
        assert_eq!(d.round_to_precision(18).unwrap(), d);
    }

    #[test]
    fn test_round_to_precision_negative() {
        let d: FixedDuration = "-1.2345".parse().unwrap();
        assert_eq!(d.round_to_precision(3).unwrap(), "-1.235".parse().unwrap());
        let tiny = FixedDuration::from_f64(-1e-17).unwrap();
        assert_eq!(tiny.round_to_precision(3).unwrap(), FixedDuration::ZERO);
        let d: FixedDuration = "-0.0006".parse().unwrap();
        assert_eq!(d.round_to_precision(3).unwrap(), "-0.001".parse().unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FixedDuration::from_millis(-1_250).to_string(),
            "-1.250000000000000000"
        );
        assert_eq!(format!("{:.3}", FixedDuration::from_millis(37_125)), "37.125");
        assert_eq!(format!("{:.0}", FixedDuration::HOUR), "3600");
    }

    #[test]
    fn test_from_str() {
        let d: FixedDuration = "-0.000000000000000001".parse().unwrap();
        assert_eq!(d, FixedDuration::new(-1, ATTOSECONDS_PER_SECOND - 1).unwrap());
        assert_eq!("32.184".parse::<FixedDuration>().unwrap().attoseconds(), 184_000_000_000_000_000);
        assert_eq!(".5".parse::<FixedDuration>().unwrap(), FixedDuration::from_millis(500));
        assert!("".parse::<FixedDuration>().is_err());
        assert!("1.2.3".parse::<FixedDuration>().is_err());
        assert!("0.0000000000000000001".parse::<FixedDuration>().is_err());
        assert!("99999999999999999999".parse::<FixedDuration>().unwrap_err().is_overflow());
    }

    #[test]
    fn test_signum() {
        assert_eq!(FixedDuration::from_millis(-1).signum(), -1);
        assert_eq!(FixedDuration::ZERO.signum(), 0);
        assert_eq!(FixedDuration::ATTOSECOND.signum(), 1);
    }

    quickcheck::quickcheck! {
        fn prop_add_negation_is_zero(d: FixedDuration) -> bool {
            (d + (-d)).is_zero()
        }

        fn prop_multiply_then_divide_is_exact(d: FixedDuration, n: u16) -> quickcheck::TestResult {
            if n == 0 {
                return quickcheck::TestResult::discard();
            }
            let n = i64::from(n);
            let got = d.multiply(n).and_then(|p| p.divide(n)).unwrap();
            quickcheck::TestResult::from_bool(got == d)
        }

        fn prop_display_parses_back(d: FixedDuration) -> bool {
            d.to_string().parse::<FixedDuration>().unwrap() == d
        }
    }
}
