//! Absolute instants.
//!
//! An [`AbsoluteTime`] is a [`FixedDuration`] counted in TAI from
//! 2000-01-01T12:00:00 TAI. That origin is not the J2000 epoch, which is
//! defined in TT and therefore sits at -32.184 s:
//!
//! ```text
//! AbsoluteTime::J2000_EPOCH.tai_offset() == -32.184 s
//! ```
//!
//! Since every instant is in TAI, differences and ordering never depend on a
//! time scale. Scales only come in when converting to and from a calendar
//! reading.
//!
//! # Usage
//!
//! ```
//! use celestial_time::{registry, AbsoluteTime};
//!
//! let start = AbsoluteTime::new(2005, 12, 31, 23, 59, 59.0, registry::utc()).unwrap();
//! let end = AbsoluteTime::new(2006, 1, 1, 0, 0, 1.0, registry::utc()).unwrap();
//! // One leap second was inserted in between.
//! assert_eq!(end.duration_from(start).unwrap().to_f64(), 3.0);
//! assert_eq!(start.to_string(), "2005-12-31T23:59:59.000Z");
//! ```

use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::datetime::DateTime;
use crate::errors::{TimeError, TimeResult};
use crate::parsing::parse_date_time;
use crate::registry;
use crate::scales::TimeScale;
use celestial_core::constants::{J2000_JD, J2000_MJD, SECONDS_PER_DAY, SECONDS_PER_DAY_F64};
use celestial_core::math::floor_div_rem;
use celestial_core::FixedDuration;
use std::fmt;
use std::ops::{Add, Sub};

/// An instant on the TAI timeline with attosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AbsoluteTime {
    offset: FixedDuration,
}

impl AbsoluteTime {
    /// 2000-01-01T12:00:00 TT.
    pub const J2000_EPOCH: Self = Self::from_tai_offset(FixedDuration::from_millis(-32_184));

    pub const fn from_tai_offset(offset: FixedDuration) -> Self {
        Self { offset }
    }

    /// TAI seconds since 2000-01-01T12:00:00 TAI.
    pub const fn tai_offset(&self) -> FixedDuration {
        self.offset
    }

    /// Reads a date and clock time as if they were TAI.
    pub(crate) fn from_tai_components(date: CalendarDate, time: ClockTime) -> TimeResult<Self> {
        let minutes = (i64::from(date.day_count()) * 24 + i64::from(time.hour())) * 60
            + i64::from(time.minute())
            - i64::from(time.minutes_from_utc())
            - 720;
        let offset = FixedDuration::from_seconds(minutes * 60).checked_add(time.second())?;
        Ok(Self { offset })
    }

    /// The instant at which `scale` reads `date` and `time`.
    pub fn from_components<S>(date: CalendarDate, time: ClockTime, scale: &S) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        let as_tai = Self::from_tai_components(date, time)?;
        as_tai.shifted_by(scale.local_to_tai_offset(date, time)?)
    }

    pub fn from_date_time<S>(date_time: DateTime, scale: &S) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        Self::from_components(date_time.date(), date_time.time(), scale)
    }

    /// From calendar fields with `f64` seconds.
    pub fn new<S>(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
        scale: &S,
    ) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        let date = CalendarDate::new(year, month, day)?;
        let time = ClockTime::hms(hour, minute, second)?;
        Self::from_components(date, time, scale)
    }

    /// From calendar fields with exact seconds.
    pub fn from_calendar<S>(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: FixedDuration,
        scale: &S,
    ) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        let date = CalendarDate::new(year, month, day)?;
        let time = ClockTime::new(hour, minute, second)?;
        Self::from_components(date, time, scale)
    }

    /// Midnight at the start of `date` in `scale`.
    pub fn from_date<S>(date: CalendarDate, scale: &S) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        Self::from_components(date, ClockTime::H00, scale)
    }

    pub fn from_ymd<S>(year: i32, month: u8, day: u8, scale: &S) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        Self::from_date(CalendarDate::new(year, month, day)?, scale)
    }

    /// Parses an ISO-8601 date-time read in `scale`.
    ///
    /// A trailing `Z` or `±HH:MM` is taken as the reading's offset from the
    /// scale, which only makes sense for UTC-like scales.
    pub fn parse<S>(text: &str, scale: &S) -> TimeResult<Self>
    where
        S: TimeScale + ?Sized,
    {
        Self::from_date_time(parse_date_time(text)?, scale)
    }

    /// `epoch` shifted by `offset`.
    pub fn from_epoch_offset(epoch: AbsoluteTime, offset: FixedDuration) -> TimeResult<Self> {
        epoch.shifted_by(offset)
    }

    /// `end - start` in TAI seconds.
    pub fn duration_between(start: AbsoluteTime, end: AbsoluteTime) -> TimeResult<FixedDuration> {
        end.duration_from(start)
    }

    /// `self - earlier` in TAI seconds.
    pub fn duration_from(&self, earlier: AbsoluteTime) -> TimeResult<FixedDuration> {
        Ok(self.offset.checked_sub(earlier.offset)?)
    }

    pub fn shifted_by(&self, duration: FixedDuration) -> TimeResult<Self> {
        Ok(Self {
            offset: self.offset.checked_add(duration)?,
        })
    }

    /// Shifts by an approximate number of seconds, rounded to the attosecond.
    pub fn shifted_by_seconds(&self, seconds: f64) -> TimeResult<Self> {
        self.shifted_by(FixedDuration::from_f64(seconds)?)
    }

    pub fn is_before(&self, other: AbsoluteTime) -> bool {
        *self < other
    }

    pub fn is_after(&self, other: AbsoluteTime) -> bool {
        *self > other
    }

    /// Strictly between `a` and `b`, in either order.
    pub fn is_between(&self, a: AbsoluteTime, b: AbsoluteTime) -> bool {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        low < *self && *self < high
    }

    /// Seconds since 2000-01-01T12:00 as read in `scale`, ignoring leap seconds.
    fn local_offset<S>(&self, scale: &S) -> TimeResult<FixedDuration>
    where
        S: TimeScale + ?Sized,
    {
        Ok(self.offset.checked_add(scale.offset_from_tai(*self)?)?)
    }

    /// The date and clock reading of `scale` at this instant.
    ///
    /// Inside a leap second the reading is `23:59:60.x` of the day the leap
    /// closes.
    pub fn to_local<S>(&self, scale: &S) -> TimeResult<DateTime>
    where
        S: TimeScale + ?Sized,
    {
        let local = self
            .local_offset(scale)?
            .checked_add(FixedDuration::HALF_DAY)?;
        let (day, second) = floor_div_rem(local.seconds(), SECONDS_PER_DAY);
        let day = i32::try_from(day).map_err(|_| {
            TimeError::overflow(format!("day count {} does not fit a calendar date", day))
        })?;
        let seconds_of_day = FixedDuration::new(second, local.attoseconds())?;
        let time = if scale.is_inside_leap_second(*self) {
            ClockTime::from_seconds_of_day_with_leap(
                seconds_of_day,
                scale.last_leap_second_adjustment(*self),
                scale.minute_duration(*self),
            )?
        } else {
            ClockTime::from_seconds_of_day(seconds_of_day)?
        };
        Ok(DateTime::new(CalendarDate::from_day_count(day), time))
    }

    /// Julian Date in `scale`.
    pub fn julian_date<S>(&self, scale: &S) -> TimeResult<f64>
    where
        S: TimeScale + ?Sized,
    {
        let local = self.local_offset(scale)?;
        let (days, seconds) = floor_div_rem(local.seconds(), SECONDS_PER_DAY);
        let fraction = FixedDuration::new(seconds, local.attoseconds())?.to_f64() / SECONDS_PER_DAY_F64;
        Ok(J2000_JD + days as f64 + fraction)
    }

    /// Modified Julian Date in `scale`.
    pub fn modified_julian_date<S>(&self, scale: &S) -> TimeResult<f64>
    where
        S: TimeScale + ?Sized,
    {
        let local = self.local_offset(scale)?.checked_add(FixedDuration::HALF_DAY)?;
        let (days, seconds) = floor_div_rem(local.seconds(), SECONDS_PER_DAY);
        let fraction = FixedDuration::new(seconds, local.attoseconds())?.to_f64() / SECONDS_PER_DAY_F64;
        Ok(J2000_MJD as f64 + days as f64 + fraction)
    }

    /// `YYYY-MM-DDTHH:MM:SS.fff` in `scale`, with all 18 fractional digits
    /// when the instant is not on a whole millisecond.
    pub fn format<S>(&self, scale: &S) -> TimeResult<String>
    where
        S: TimeScale + ?Sized,
    {
        let local = self.to_local(scale)?;
        Ok(format!(
            "{}T{}",
            local.date().to_iso8601(),
            local.time().to_trimmed_iso8601()
        ))
    }

    /// [`format`](Self::format) in UTC with a trailing `Z`.
    ///
    /// Instants too far from J2000 for a calendar date render as a raw TAI
    /// offset instead.
    pub fn to_utc_string(&self) -> String {
        match self.format(registry::utc()) {
            Ok(text) => format!("{}Z", text),
            Err(_) => format!("J2000 TAI{:+}s", self.offset.to_f64()),
        }
    }
}

impl fmt::Display for AbsoluteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utc_string())
    }
}

impl Add<FixedDuration> for AbsoluteTime {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the result overflows. Use
    /// [`shifted_by`](AbsoluteTime::shifted_by) to handle that case.
    fn add(self, rhs: FixedDuration) -> Self {
        self.shifted_by(rhs).expect("shifting an instant overflowed")
    }
}

impl Sub<FixedDuration> for AbsoluteTime {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the result overflows. Use
    /// [`shifted_by`](AbsoluteTime::shifted_by) with the negated duration to
    /// handle that case.
    fn sub(self, rhs: FixedDuration) -> Self {
        Self {
            offset: self.offset - rhs,
        }
    }
}

impl Sub for AbsoluteTime {
    type Output = FixedDuration;

    /// # Panics
    ///
    /// Panics if the instants are too far apart for a [`FixedDuration`]. Use
    /// [`duration_from`](AbsoluteTime::duration_from) to handle that case.
    fn sub(self, rhs: Self) -> FixedDuration {
        self.offset - rhs.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_j2000_epoch_in_tt() {
        let local = AbsoluteTime::J2000_EPOCH.to_local(registry::tt()).unwrap();
        assert_eq!(local.date(), CalendarDate::J2000_EPOCH);
        assert_eq!(local.time(), ClockTime::H12);
        assert_eq!(
            AbsoluteTime::J2000_EPOCH.format(registry::tai()).unwrap(),
            "2000-01-01T11:59:27.816"
        );
    }

    #[test]
    fn test_julian_dates() {
        let t = AbsoluteTime::J2000_EPOCH;
        assert_abs_diff_eq!(t.julian_date(registry::tt()).unwrap(), 2_451_545.0);
        assert_abs_diff_eq!(t.modified_julian_date(registry::tt()).unwrap(), 51_544.5);
        let midnight = AbsoluteTime::from_ymd(1858, 11, 17, registry::tt()).unwrap();
        assert_abs_diff_eq!(midnight.modified_julian_date(registry::tt()).unwrap(), 0.0);
    }

    #[test]
    fn test_utc_offset_in_reading() {
        let z = AbsoluteTime::parse("2020-02-02T10:00:00Z", registry::utc()).unwrap();
        let plus2 = AbsoluteTime::parse("2020-02-02T12:00:00+02:00", registry::utc()).unwrap();
        assert_eq!(z, plus2);
    }

    #[test]
    fn test_midnight_reading_stays_on_its_day() {
        let t = AbsoluteTime::from_ymd(2017, 1, 1, registry::utc()).unwrap();
        assert_eq!(t.format(registry::utc()).unwrap(), "2017-01-01T00:00:00.000");
    }

    #[test]
    fn test_shift_and_compare() {
        let a = AbsoluteTime::J2000_EPOCH;
        let b = a.shifted_by_seconds(1.5).unwrap();
        let c = b + FixedDuration::SECOND;
        assert!(a.is_before(b) && c.is_after(b));
        assert!(b.is_between(c, a));
        assert!(!a.is_between(a, c));
        assert_eq!(c - a, "2.5".parse().unwrap());
        assert_eq!(AbsoluteTime::duration_between(a, c).unwrap(), c - a);
        assert_eq!(c - FixedDuration::from_millis(2_500), a);
        assert_eq!(
            AbsoluteTime::from_epoch_offset(a, FixedDuration::from_millis(1_500)).unwrap(),
            b
        );
    }

    #[test]
    fn test_fine_fraction_formats_in_full() {
        let t = AbsoluteTime::parse("2010-01-01T00:00:00.000000000000000001", registry::tai())
            .unwrap();
        assert_eq!(
            t.format(registry::tai()).unwrap(),
            "2010-01-01T00:00:00.000000000000000001"
        );
    }

    #[test]
    fn test_far_instant_fails_to_format() {
        let far = AbsoluteTime::from_tai_offset(FixedDuration::from_seconds(i64::MAX / 2));
        let err = far.format(registry::tai()).unwrap_err();
        assert!(matches!(err, TimeError::Overflow(_)));
        assert!(far.to_string().starts_with("J2000 TAI"));
    }

    #[test]
    fn test_invalid_components_rejected() {
        assert!(AbsoluteTime::new(2021, 2, 29, 0, 0, 0.0, registry::utc()).is_err());
        assert!(AbsoluteTime::new(2021, 1, 1, 24, 0, 0.0, registry::utc()).is_err());
    }

    #[test]
    #[should_panic]
    fn test_sub_duration_panics_on_overflow() {
        let earliest = AbsoluteTime::from_tai_offset(FixedDuration::from_seconds(i64::MIN));
        let _ = earliest - FixedDuration::SECOND;
    }

    #[test]
    #[should_panic]
    fn test_sub_instants_panics_on_overflow() {
        let earliest = AbsoluteTime::from_tai_offset(FixedDuration::from_seconds(i64::MIN));
        let latest = AbsoluteTime::from_tai_offset(FixedDuration::from_seconds(i64::MAX));
        let _ = latest - earliest;
    }
}
