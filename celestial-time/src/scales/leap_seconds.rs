//! The TAI-UTC history.
//!
//! Each entry gives TAI-UTC from its start date on as a linear function of the
//! UTC Modified Julian Date:
//!
//! ```text
//! TAI-UTC = offset + (MJD - mjd_reference) × drift
//! ```
//!
//! Between 1961 and 1972 UTC was steered by rate offsets as well as steps, so
//! `drift` is non-zero and most steps are fractions of a second. From 1972 on
//! the drift is zero and every step is a whole leap second.
//!
//! The built-in history ends with the 2017-01-01 leap second. A newer table
//! published by the USNO as `tai-utc.dat` can be read with
//! [`parse_tai_utc_dat`] and passed to
//! [`UtcScale::from_entries`](super::UtcScale::from_entries).

use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::{TimeError, TimeResult};
use celestial_core::constants::SECONDS_PER_DAY;
use celestial_core::math::pow10;
use celestial_core::FixedDuration;

/// A linear drift of `numerator / denominator` seconds per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriftRate {
    numerator: i64,
    denominator: i64,
}

impl DriftRate {
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Fails unless `denominator > 0`, `numerator >= 0` and the rate can be
    /// re-expressed per second without overflowing `i64`.
    pub fn new(numerator: i64, denominator: i64) -> TimeResult<Self> {
        if denominator <= 0 || numerator < 0 {
            return Err(TimeError::invalid_argument(format!(
                "drift rate {}/{} s/day must be non-negative with a positive denominator",
                numerator, denominator
            )));
        }
        denominator
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|d| d.checked_add(numerator))
            .ok_or_else(|| {
                TimeError::overflow(format!(
                    "drift rate {}/{} s/day out of range",
                    numerator, denominator
                ))
            })?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Seconds per day as a float, for display.
    pub fn seconds_per_day(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Denominator of the drift per elapsed UTC second.
    pub(crate) const fn per_utc_second(&self) -> i64 {
        self.denominator * SECONDS_PER_DAY
    }

    /// Denominator of the drift per elapsed TAI second. UTC runs slow by the
    /// drift, so a TAI second is `1 + drift` UTC seconds.
    pub(crate) const fn per_tai_second(&self) -> i64 {
        self.denominator * SECONDS_PER_DAY + self.numerator
    }
}

/// One row of the TAI-UTC history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeapSecondEntry {
    start: CalendarDate,
    mjd_reference: i64,
    offset: FixedDuration,
    drift: DriftRate,
}

impl LeapSecondEntry {
    pub const fn new(
        start: CalendarDate,
        mjd_reference: i64,
        offset: FixedDuration,
        drift: DriftRate,
    ) -> Self {
        Self {
            start,
            mjd_reference,
            offset,
            drift,
        }
    }

    /// UTC date from which this entry applies, at 00:00.
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn mjd_reference(&self) -> i64 {
        self.mjd_reference
    }

    /// TAI-UTC at the reference MJD.
    pub const fn offset(&self) -> FixedDuration {
        self.offset
    }

    pub const fn drift(&self) -> DriftRate {
        self.drift
    }

    /// TAI-UTC at a UTC date and clock reading.
    ///
    /// The drift is rounded toward negative infinity to the attosecond.
    pub fn offset_at_utc(&self, date: CalendarDate, time: ClockTime) -> TimeResult<FixedDuration> {
        if self.drift.is_zero() {
            return Ok(self.offset);
        }
        let days = date.mjd() - self.mjd_reference;
        let elapsed = FixedDuration::from_seconds(days * SECONDS_PER_DAY)
            .checked_add(time.seconds_in_utc_day())?;
        let drift = elapsed.mul_div(self.drift.numerator, self.drift.per_utc_second())?;
        Ok(self.offset.checked_add(drift)?)
    }
}

/// `(year, month, TAI-UTC in 1e-7 s, reference MJD, drift in 1e-7 s/day)`,
/// every entry starting on the first of the month.
const TAI_UTC_HISTORY: [(i32, u8, i64, i64, i64); 41] = [
    (1961, 1, 14_228_180, 37_300, 12_960),
    (1961, 8, 13_728_180, 37_300, 12_960),
    (1962, 1, 18_458_580, 37_665, 11_232),
    (1963, 11, 19_458_580, 37_665, 11_232),
    (1964, 1, 32_401_300, 38_761, 12_960),
    (1964, 4, 33_401_300, 38_761, 12_960),
    (1964, 9, 34_401_300, 38_761, 12_960),
    (1965, 1, 35_401_300, 38_761, 12_960),
    (1965, 3, 36_401_300, 38_761, 12_960),
    (1965, 7, 37_401_300, 38_761, 12_960),
    (1965, 9, 38_401_300, 38_761, 12_960),
    (1966, 1, 43_131_700, 39_126, 25_920),
    (1968, 2, 42_131_700, 39_126, 25_920),
    (1972, 1, 100_000_000, 41_317, 0),
    (1972, 7, 110_000_000, 41_317, 0),
    (1973, 1, 120_000_000, 41_317, 0),
    (1974, 1, 130_000_000, 41_317, 0),
    (1975, 1, 140_000_000, 41_317, 0),
    (1976, 1, 150_000_000, 41_317, 0),
    (1977, 1, 160_000_000, 41_317, 0),
    (1978, 1, 170_000_000, 41_317, 0),
    (1979, 1, 180_000_000, 41_317, 0),
    (1980, 1, 190_000_000, 41_317, 0),
    (1981, 7, 200_000_000, 41_317, 0),
    (1982, 7, 210_000_000, 41_317, 0),
    (1983, 7, 220_000_000, 41_317, 0),
    (1985, 7, 230_000_000, 41_317, 0),
    (1988, 1, 240_000_000, 41_317, 0),
    (1990, 1, 250_000_000, 41_317, 0),
    (1991, 1, 260_000_000, 41_317, 0),
    (1992, 7, 270_000_000, 41_317, 0),
    (1993, 7, 280_000_000, 41_317, 0),
    (1994, 7, 290_000_000, 41_317, 0),
    (1996, 1, 300_000_000, 41_317, 0),
    (1997, 7, 310_000_000, 41_317, 0),
    (1999, 1, 320_000_000, 41_317, 0),
    (2006, 1, 330_000_000, 41_317, 0),
    (2009, 1, 340_000_000, 41_317, 0),
    (2012, 7, 350_000_000, 41_317, 0),
    (2015, 7, 360_000_000, 41_317, 0),
    (2017, 1, 370_000_000, 41_317, 0),
];

const ATTOSECONDS_PER_TENTH_MICROSECOND: i128 = 100_000_000_000;
const TENTH_MICROSECONDS_PER_SECOND: i64 = 10_000_000;

/// The TAI-UTC history from 1961-01-01 to the 2017-01-01 leap second.
pub fn builtin_history() -> TimeResult<Vec<LeapSecondEntry>> {
    TAI_UTC_HISTORY
        .iter()
        .map(|&(year, month, offset, mjd_reference, drift)| {
            Ok(LeapSecondEntry::new(
                CalendarDate::new(year, month, 1)?,
                mjd_reference,
                FixedDuration::from_total_attoseconds(
                    i128::from(offset) * ATTOSECONDS_PER_TENTH_MICROSECOND,
                )?,
                DriftRate::new(drift, TENTH_MICROSECONDS_PER_SECOND)?,
            ))
        })
        .collect()
}

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parses the USNO `tai-utc.dat` format.
///
/// Each non-blank line reads
///
/// ```text
///  1961 JAN  1 =JD 2437300.5  TAI-UTC=   1.4228180 S + (MJD - 37300.) X 0.001296 S
/// ```
///
/// and all numbers are kept as exact decimals.
///
/// ```
/// use celestial_time::scales::parse_tai_utc_dat;
///
/// let entries = parse_tai_utc_dat(
///     " 2017 JAN  1 =JD 2457754.5  TAI-UTC=  37.0       S + (MJD - 41317.) X 0.0      S\n",
/// ).unwrap();
/// assert_eq!(entries[0].offset().seconds(), 37);
/// ```
pub fn parse_tai_utc_dat(text: &str) -> TimeResult<Vec<LeapSecondEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_line(line).map_err(|e| {
                TimeError::parse(format!("tai-utc.dat line {}: {}", index + 1, e))
            })
        })
        .collect()
}

fn parse_line(line: &str) -> Result<LeapSecondEntry, String> {
    let mut fields = line.split_whitespace();
    let year = fields
        .next()
        .and_then(|f| f.parse::<i32>().ok())
        .ok_or("missing year")?;
    let month_name = fields.next().ok_or("missing month")?;
    let month = MONTHS
        .iter()
        .position(|m| month_name.eq_ignore_ascii_case(m))
        .ok_or_else(|| format!("unknown month '{}'", month_name))? as u8
        + 1;
    let day = fields
        .next()
        .and_then(|f| f.parse::<u8>().ok())
        .ok_or("missing day")?;
    let start = CalendarDate::new(year, month, day).map_err(|e| e.to_string())?;

    let offset = field_between(line, "TAI-UTC=", "S")?
        .parse::<FixedDuration>()
        .map_err(|e| format!("bad TAI-UTC offset: {}", e))?;

    let reference = field_between(line, "MJD", ")")?;
    let reference = reference.trim_start_matches(['-', ' ']);
    let (whole, fraction) = reference.split_once('.').unwrap_or((reference, ""));
    if !fraction.bytes().all(|b| b == b'0') {
        return Err(format!("fractional reference MJD '{}'", reference));
    }
    let mjd_reference = whole
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("bad reference MJD '{}'", reference))?;

    let drift = line
        .rsplit_once('X')
        .map(|(_, rest)| rest.trim().trim_end_matches('S').trim())
        .ok_or("missing drift rate")?;
    let drift = parse_drift(drift)?;

    Ok(LeapSecondEntry::new(start, mjd_reference, offset, drift))
}

fn field_between<'a>(line: &'a str, after: &str, until: &str) -> Result<&'a str, String> {
    let start = line
        .find(after)
        .map(|p| p + after.len())
        .ok_or_else(|| format!("missing '{}'", after))?;
    let rest = &line[start..];
    let end = rest
        .find(until)
        .ok_or_else(|| format!("unterminated '{}' field", after))?;
    Ok(rest[..end].trim())
}

/// Reads a decimal like `0.0011232` as the exact fraction `11232 / 10^7`.
fn parse_drift(text: &str) -> Result<DriftRate, String> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits_ok(whole) || !digits_ok(fraction) || fraction.len() > 12 {
        return Err(format!("bad drift rate '{}'", text));
    }
    let scale = pow10(fraction.len() as u32);
    let whole: i64 = whole.parse().map_err(|_| format!("bad drift rate '{}'", text))?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        fraction
            .parse()
            .map_err(|_| format!("bad drift rate '{}'", text))?
    };
    let numerator = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| format!("drift rate '{}' out of range", text))?;
    DriftRate::new(numerator, scale).map_err(|e| e.to_string())
}
