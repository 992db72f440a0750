//! Time of day with leap-second awareness.
//!
//! A [`ClockTime`] is an hour, a minute and an exact [`FixedDuration`] of
//! seconds within that minute, plus a fixed offset from UTC in minutes. The
//! seconds field may reach into `[60, 62)` so that an inserted leap second can
//! be written as `23:59:60.5`.
//!
//! # Leap seconds
//!
//! Converting an instant to a clock reading normally splits a seconds-of-day
//! value into `h:m:s`. Inside a leap second that value repeats the last second
//! of the day, so the leap-aware constructor adds the leap back onto the
//! seconds of the minute and clamps the result below the minute's length:
//!
//! ```text
//! seconds of day 86399.25, leap +1 s, minute of 61 s  ->  23:59:60.25
//! ```
//!
//! # Formatting
//!
//! | Method | Example |
//! |--------|---------|
//! | [`to_iso8601(3)`](ClockTime::to_iso8601) | `23:59:60.250` |
//! | [`to_trimmed_iso8601`](ClockTime::to_trimmed_iso8601) | `23:59:60.250` or 18 digits |
//! | `Display` | `23:59:60.250+00:00` |

use crate::errors::{TimeError, TimeResult};
use crate::parsing;
use celestial_core::constants::{ATTOSECOND_DIGITS, ATTOSECONDS_PER_MILLISECOND};
use celestial_core::FixedDuration;
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) on the seconds field: one minute plus a leap second.
const MAX_SECOND: FixedDuration = FixedDuration::from_seconds(62);

/// Longest day this model allows: 86400 s plus one leap second.
const MAX_SECONDS_OF_DAY: FixedDuration = FixedDuration::from_seconds(86_401);

/// An hour, minute and exact second of a day, with a UTC offset in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: FixedDuration,
    minutes_from_utc: i32,
}

impl ClockTime {
    pub const H00: Self = Self::from_parts(0, 0, FixedDuration::ZERO);
    pub const H12: Self = Self::from_parts(12, 0, FixedDuration::ZERO);

    const fn from_parts(hour: u8, minute: u8, second: FixedDuration) -> Self {
        Self {
            hour,
            minute,
            second,
            minutes_from_utc: 0,
        }
    }

    /// Creates a UTC clock reading.
    ///
    /// Fails unless `hour < 24`, `minute < 60` and `0 <= second < 62`.
    pub fn new(hour: u8, minute: u8, second: FixedDuration) -> TimeResult<Self> {
        if hour >= 24 {
            return Err(TimeError::invalid_argument(format!(
                "hour {} out of range [0, 24)",
                hour
            )));
        }
        if minute >= 60 {
            return Err(TimeError::invalid_argument(format!(
                "minute {} out of range [0, 60)",
                minute
            )));
        }
        if second.is_negative() || second >= MAX_SECOND {
            return Err(TimeError::invalid_argument(format!(
                "second {} out of range [0, 62)",
                second
            )));
        }
        Ok(Self::from_parts(hour, minute, second))
    }

    /// Creates a clock reading from `f64` seconds.
    pub fn hms(hour: u8, minute: u8, second: f64) -> TimeResult<Self> {
        Self::new(hour, minute, FixedDuration::from_f64(second)?)
    }

    /// Returns the same reading labelled with a different UTC offset.
    pub fn with_utc_offset(self, minutes_from_utc: i32) -> Self {
        Self {
            minutes_from_utc,
            ..self
        }
    }

    /// Splits a seconds-of-day value into `h:m:s`.
    ///
    /// Values in `[86400, 86401)` are the leap second `23:59:60.x`; anything
    /// outside `[0, 86401)` is rejected.
    pub fn from_seconds_of_day(seconds_of_day: FixedDuration) -> TimeResult<Self> {
        if seconds_of_day.is_negative() || seconds_of_day >= MAX_SECONDS_OF_DAY {
            return Err(TimeError::invalid_argument(format!(
                "seconds of day {} out of range [0, 86401)",
                seconds_of_day
            )));
        }
        if seconds_of_day >= FixedDuration::DAY {
            let second = seconds_of_day.checked_sub(FixedDuration::from_seconds(86_340))?;
            return Ok(Self::from_parts(23, 59, second));
        }
        let whole = seconds_of_day.seconds();
        let second = FixedDuration::new(whole % 60, seconds_of_day.attoseconds())?;
        Ok(Self::from_parts(
            (whole / 3600) as u8,
            ((whole % 3600) / 60) as u8,
            second,
        ))
    }

    /// Splits a seconds-of-day value observed inside a leap second.
    ///
    /// `seconds_of_day` is in `[0, 86400)` and `leap` is the signed leap
    /// inserted at the end of the minute, at most one second in magnitude. A
    /// positive leap needs a 61 s minute, a negative one a 59 s minute. The
    /// seconds of the minute saturate just below `minute_duration`.
    pub fn from_seconds_of_day_with_leap(
        seconds_of_day: FixedDuration,
        leap: FixedDuration,
        minute_duration: u8,
    ) -> TimeResult<Self> {
        if seconds_of_day.is_negative() || seconds_of_day >= FixedDuration::DAY {
            return Err(TimeError::invalid_argument(format!(
                "seconds of day {} out of range [0, 86400)",
                seconds_of_day
            )));
        }
        if leap.abs()? > FixedDuration::SECOND {
            return Err(TimeError::invalid_argument(format!(
                "leap {} s exceeds one second",
                leap
            )));
        }
        if !(59..=61).contains(&minute_duration)
            || (leap.signum() > 0 && minute_duration <= 60)
            || (leap.signum() < 0 && minute_duration >= 60)
        {
            return Err(TimeError::invalid_argument(format!(
                "leap {} s is inconsistent with a {} s minute",
                leap, minute_duration
            )));
        }
        let whole = seconds_of_day.seconds();
        let second = FixedDuration::new(whole % 60, seconds_of_day.attoseconds())?
            .checked_add(leap)?;
        if second.is_negative() {
            return Err(TimeError::invalid_argument(format!(
                "leap {} s moves the reading before the start of the minute",
                leap
            )));
        }
        let limit = FixedDuration::from_seconds(i64::from(minute_duration));
        let second = if second >= limit {
            limit.checked_sub(FixedDuration::ATTOSECOND)?
        } else {
            second
        };
        Ok(Self::from_parts(
            (whole / 3600) as u8,
            ((whole % 3600) / 60) as u8,
            second,
        ))
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Seconds within the minute, in `[0, 62)`.
    pub const fn second(&self) -> FixedDuration {
        self.second
    }

    pub const fn minutes_from_utc(&self) -> i32 {
        self.minutes_from_utc
    }

    /// Seconds since local midnight.
    pub fn seconds_in_local_day(&self) -> FixedDuration {
        let minutes = i64::from(self.hour) * 60 + i64::from(self.minute);
        FixedDuration::from_seconds(minutes * 60) + self.second
    }

    /// Seconds since UTC midnight of the same date; may be negative or exceed
    /// a day when the offset moves the reading across midnight.
    pub fn seconds_in_utc_day(&self) -> FixedDuration {
        let offset = FixedDuration::from_seconds(i64::from(self.minutes_from_utc) * 60);
        self.seconds_in_local_day() - offset
    }

    /// `HH:MM:SS` with the fraction truncated to `fraction_digits` (at most 18).
    pub fn to_iso8601(&self, fraction_digits: u32) -> String {
        let digits = fraction_digits.min(ATTOSECOND_DIGITS) as usize;
        let whole = self.second.seconds();
        if digits == 0 {
            return format!("{:02}:{:02}:{:02}", self.hour, self.minute, whole);
        }
        let fraction = format!("{:018}", self.second.attoseconds());
        format!(
            "{:02}:{:02}:{:02}.{}",
            self.hour,
            self.minute,
            whole,
            &fraction[..digits]
        )
    }

    /// `HH:MM:SS.fff` when the fraction is a whole number of milliseconds,
    /// otherwise all 18 fractional digits.
    pub fn to_trimmed_iso8601(&self) -> String {
        if self.second.attoseconds() % ATTOSECONDS_PER_MILLISECOND == 0 {
            self.to_iso8601(3)
        } else {
            self.to_iso8601(ATTOSECOND_DIGITS)
        }
    }

    fn format_utc_offset(&self) -> String {
        let sign = if self.minutes_from_utc < 0 { '-' } else { '+' };
        let magnitude = self.minutes_from_utc.unsigned_abs();
        format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.to_trimmed_iso8601(), self.format_utc_offset())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Accepts `HH:MM:SS[.f...]` or `HHMMSS[.f...]`, optionally followed by
    /// `Z`, `±HH:MM`, `±HHMM` or `±HH`.
    fn from_str(s: &str) -> TimeResult<Self> {
        parsing::parse_time(s)
    }
}
