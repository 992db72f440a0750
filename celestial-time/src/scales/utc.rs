//! Coordinated Universal Time (UTC).
//!
//! UTC is TAI minus the offset given by the leap-second history. The history
//! is folded once into a table of TAI instants:
//!
//! ```text
//!            leap_start        validity_start
//!  ...old entry...|==== leap ====|...new entry...
//!   UTC reads the previous day's 23:59:60.x inside the leap
//! ```
//!
//! `leap_start` is when the old entry's UTC reaches midnight, `validity_start`
//! is when the new entry's UTC does. Their difference is the inserted leap, a
//! whole second from 1972 on and a fraction of a second (sometimes negative)
//! before that. A negative leap skips the end of the last minute instead of
//! inserting a 61st second.
//!
//! Before the first entry (1961-01-01) UTC is taken to equal TAI.
//!
//! # Usage
//!
//! ```
//! use celestial_time::scales::{TimeScale, UtcScale};
//! use celestial_time::AbsoluteTime;
//!
//! let utc = UtcScale::new().unwrap();
//! let t = AbsoluteTime::parse("2016-12-31T23:59:60.5", &utc).unwrap();
//! assert!(utc.is_inside_leap_second(t));
//! assert_eq!(utc.minute_duration(t), 61);
//! assert_eq!(t.format(&utc).unwrap(), "2016-12-31T23:59:60.500");
//! ```

use super::leap_seconds::{builtin_history, LeapSecondEntry};
use super::TimeScale;
use crate::absolute::AbsoluteTime;
use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::{TimeError, TimeResult};
use celestial_core::constants::MINUTES_PER_DAY;
use celestial_core::FixedDuration;
use std::fmt;

/// One folded entry of the leap-second table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UtcTaiOffset {
    entry: LeapSecondEntry,
    start_mjd: i64,
    /// First instant this entry applies to: `leap_start` for a positive leap,
    /// `validity_start` for a negative one.
    effective_start: AbsoluteTime,
    leap_start: AbsoluteTime,
    validity_start: AbsoluteTime,
    /// One minute before `leap_start`, where a 61 s minute begins.
    last_minute_start: AbsoluteTime,
    /// Length the leap adds to the last minute, in UTC seconds.
    leap: FixedDuration,
    /// The reference MJD at 00:00 UTC, as a TAI instant.
    reference: AbsoluteTime,
}

impl UtcTaiOffset {
    fn fold(previous: Option<&UtcTaiOffset>, entry: LeapSecondEntry) -> TimeResult<Self> {
        let start = entry.start();
        let midnight = AbsoluteTime::from_tai_components(start, ClockTime::H00)?;
        let offset = entry.offset_at_utc(start, ClockTime::H00)?;
        let previous_offset = match previous {
            Some(previous) => previous.entry.offset_at_utc(start, ClockTime::H00)?,
            None => offset,
        };
        // The step is taken on the TAI side. Inside it the reading advances at
        // the new entry's rate, so the reading-side leap is the step divided
        // by 1 + drift.
        let step = offset.checked_sub(previous_offset)?;
        let drift = entry.drift();
        let leap = step.mul_div(drift.per_utc_second(), drift.per_tai_second())?;
        let leap_start = midnight.shifted_by(previous_offset)?;
        let validity_start = midnight.shifted_by(offset)?;

        let reference_date = CalendarDate::from_mjd(entry.mjd_reference())?;
        let reference = AbsoluteTime::from_tai_components(reference_date, ClockTime::H00)?
            .shifted_by(entry.offset())?;

        Ok(Self {
            entry,
            start_mjd: start.mjd(),
            effective_start: leap_start.min(validity_start),
            leap_start,
            validity_start,
            last_minute_start: leap_start.shifted_by(FixedDuration::from_seconds(-60))?,
            leap,
            reference,
        })
    }

    /// TAI-UTC at a TAI instant.
    ///
    /// With TAI-UTC = o + k (UTC - R), solving for UTC gives
    /// TAI-UTC = o + (TAI - (R + o)) k / (1 + k).
    fn offset_at_tai(&self, instant: AbsoluteTime) -> TimeResult<FixedDuration> {
        let drift = self.entry.drift();
        if drift.is_zero() {
            return Ok(self.entry.offset());
        }
        let elapsed = instant.duration_from(self.reference)?;
        let correction = elapsed.mul_div(drift.numerator(), drift.per_tai_second())?;
        Ok(self.entry.offset().checked_add(correction)?)
    }

    fn is_positive_leap(&self) -> bool {
        self.leap > FixedDuration::ZERO
    }
}

/// The UTC time scale, built from a leap-second history.
///
/// Building is a strict fold over the entries, each one chained off the
/// offset of the one before. The result is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcScale {
    offsets: Vec<UtcTaiOffset>,
}

impl UtcScale {
    /// UTC with the built-in history, up to the 2017-01-01 leap second.
    pub fn new() -> TimeResult<Self> {
        Self::from_entries(builtin_history()?)
    }

    /// UTC with a caller-supplied history, for instance one read with
    /// [`parse_tai_utc_dat`](super::parse_tai_utc_dat).
    ///
    /// Entries must be non-empty and in strictly increasing date order.
    pub fn from_entries(entries: Vec<LeapSecondEntry>) -> TimeResult<Self> {
        if entries.is_empty() {
            warn!("refusing to build UTC from an empty leap second history");
            return Err(TimeError::invalid_argument(
                "leap second history must not be empty",
            ));
        }
        let mut offsets: Vec<UtcTaiOffset> = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(previous) = offsets.last() {
                if entry.start() <= previous.entry.start() {
                    warn!(
                        "leap second history out of order: {} follows {}",
                        entry.start(),
                        previous.entry.start()
                    );
                    return Err(TimeError::invalid_argument(format!(
                        "leap second entry {} does not follow {}",
                        entry.start(),
                        previous.entry.start()
                    )));
                }
            }
            let folded = UtcTaiOffset::fold(offsets.last(), entry)?;
            if let Some(previous) = offsets.last() {
                if folded.effective_start <= previous.effective_start {
                    return Err(TimeError::invalid_argument(format!(
                        "leap second entry {} starts before the previous entry",
                        entry.start()
                    )));
                }
            }
            offsets.push(folded);
        }
        debug!(
            "built UTC leap second table: {} entries, TAI-UTC {} s from {}",
            offsets.len(),
            offsets[offsets.len() - 1].entry.offset(),
            offsets[offsets.len() - 1].entry.start()
        );
        Ok(Self { offsets })
    }

    /// The history this scale was built from, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LeapSecondEntry> + '_ {
        self.offsets.iter().map(|o| &o.entry)
    }

    /// Instant from which the first entry applies.
    pub fn first_known_leap(&self) -> AbsoluteTime {
        self.offsets[0].effective_start
    }

    /// Instant from which the last entry applies.
    pub fn last_known_leap(&self) -> AbsoluteTime {
        self.offsets[self.offsets.len() - 1].effective_start
    }

    /// Index just past the entry in force at `instant`.
    fn position(&self, instant: AbsoluteTime) -> usize {
        self.offsets
            .partition_point(|o| o.effective_start <= instant)
    }

    fn current(&self, instant: AbsoluteTime) -> Option<&UtcTaiOffset> {
        self.position(instant)
            .checked_sub(1)
            .map(|index| &self.offsets[index])
    }
}

impl TimeScale for UtcScale {
    fn name(&self) -> &str {
        "UTC"
    }

    fn offset_from_tai(&self, instant: AbsoluteTime) -> TimeResult<FixedDuration> {
        match self.current(instant) {
            Some(offset) => Ok(offset.offset_at_tai(instant)?.negate()?),
            None => Ok(FixedDuration::ZERO),
        }
    }

    fn local_to_tai_offset(
        &self,
        date: CalendarDate,
        time: ClockTime,
    ) -> TimeResult<FixedDuration> {
        // Find the UTC date, which differs from the local one when the
        // reading's UTC offset moves it across midnight.
        let minute_in_day =
            i32::from(time.hour()) * 60 + i32::from(time.minute()) - time.minutes_from_utc();
        let correction = minute_in_day.div_euclid(MINUTES_PER_DAY);
        let utc_mjd = date.mjd() + i64::from(correction);
        let index = self.offsets.partition_point(|o| o.start_mjd <= utc_mjd);
        match index.checked_sub(1) {
            Some(index) => self.offsets[index].entry.offset_at_utc(date, time),
            None => Ok(FixedDuration::ZERO),
        }
    }

    fn is_inside_leap_second(&self, instant: AbsoluteTime) -> bool {
        self.current(instant)
            .map_or(false, |o| instant < o.validity_start)
    }

    fn minute_duration(&self, instant: AbsoluteTime) -> u8 {
        let index = self.position(instant);
        let inside = index
            .checked_sub(1)
            .map(|i| &self.offsets[i])
            .map_or(false, |o| o.is_positive_leap() && instant < o.validity_start);
        let before_next = self
            .offsets
            .get(index)
            .map_or(false, |next| {
                next.is_positive_leap() && instant >= next.last_minute_start
            });
        if inside || before_next {
            61
        } else {
            60
        }
    }

    fn last_leap_second_adjustment(&self, instant: AbsoluteTime) -> FixedDuration {
        self.current(instant)
            .map_or(FixedDuration::ZERO, |o| o.leap)
    }
}

impl fmt::Display for UtcScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UTC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::leap_seconds::DriftRate;

    fn utc() -> UtcScale {
        UtcScale::new().unwrap()
    }

    fn folded_at(utc: &UtcScale, year: i32, month: u8) -> &UtcTaiOffset {
        let date = CalendarDate::new(year, month, 1).unwrap();
        utc.offsets.iter().find(|o| o.entry.start() == date).unwrap()
    }

    fn leap_at(utc: &UtcScale, year: i32, month: u8) -> FixedDuration {
        folded_at(utc, year, month).leap
    }

    /// A TAI-side step read at the entry's drift rate.
    fn drifting(utc: &UtcScale, year: i32, month: u8, step: &str) -> FixedDuration {
        let drift = folded_at(utc, year, month).entry.drift();
        step.parse::<FixedDuration>()
            .unwrap()
            .mul_div(drift.per_utc_second(), drift.per_tai_second())
            .unwrap()
    }

    #[test]
    fn test_folded_leaps() {
        let utc = utc();
        assert_eq!(leap_at(&utc, 1961, 1), FixedDuration::ZERO);
        assert_eq!(leap_at(&utc, 1961, 8), drifting(&utc, 1961, 8, "-0.05"));
        assert_eq!(leap_at(&utc, 1964, 4), drifting(&utc, 1964, 4, "0.1"));
        assert_eq!(leap_at(&utc, 1972, 1), "0.107758".parse().unwrap());
        assert_eq!(leap_at(&utc, 2017, 1), FixedDuration::SECOND);

        // Drift-era leaps read a little shorter than their TAI step.
        let leap = leap_at(&utc, 1964, 4).to_f64();
        assert!(leap < 0.1);
        assert!(0.1 - leap < 2e-9);
    }

    #[test]
    fn test_reading_continuous_across_drifting_leap() {
        let utc = utc();
        let leap_start = folded_at(&utc, 1964, 4).leap_start;
        let nanosecond = FixedDuration::from_attoseconds(1_000_000_000);
        let tolerance = FixedDuration::from_attoseconds(100);
        let reading = |step: i64| {
            let t = leap_start
                .shifted_by(FixedDuration::from_attoseconds(step * 1_000_000_000))
                .unwrap();
            let local = t.to_local(&utc).unwrap();
            assert_eq!(local.date(), CalendarDate::new(1964, 3, 31).unwrap());
            assert_eq!((local.time().hour(), local.time().minute()), (23, 59));
            (utc.is_inside_leap_second(t), local.time().second())
        };

        assert!(!reading(-1).0);
        assert!(reading(0).0);
        let opening = reading(0).1 - FixedDuration::from_seconds(60);
        assert!(opening.abs().unwrap() < tolerance, "{}", opening);
        for step in -3..3 {
            let advance = reading(step + 1).1 - reading(step).1;
            let error = (advance - nanosecond).abs().unwrap();
            assert!(error < tolerance, "step {}: advanced {}", step, advance);
        }
    }

    #[test]
    fn test_folded_table_is_monotonic() {
        let utc = utc();
        assert!(utc
            .offsets
            .windows(2)
            .all(|w| w[0].effective_start < w[1].effective_start
                && w[0].entry.mjd_reference() <= w[1].entry.mjd_reference()));
        assert!(utc.first_known_leap() < utc.last_known_leap());
    }

    #[test]
    fn test_offset_before_1961_is_zero() {
        let utc = utc();
        let t = AbsoluteTime::parse("1950-06-01T00:00:00", &utc).unwrap();
        assert_eq!(utc.offset_from_tai(t).unwrap(), FixedDuration::ZERO);
        assert_eq!(utc.last_leap_second_adjustment(t), FixedDuration::ZERO);
    }

    #[test]
    fn test_offset_after_2017() {
        let utc = utc();
        let t = AbsoluteTime::parse("2020-03-01T12:00:00", &utc).unwrap();
        assert_eq!(
            utc.offset_from_tai(t).unwrap(),
            FixedDuration::from_seconds(-37)
        );
        assert_eq!(utc.last_leap_second_adjustment(t), FixedDuration::SECOND);
    }

    #[test]
    fn test_inside_leap_second() {
        let utc = utc();
        let inside = AbsoluteTime::parse("2016-12-31T23:59:60.5", &utc).unwrap();
        assert!(utc.is_inside_leap_second(inside));
        assert_eq!(utc.minute_duration(inside), 61);
        assert_eq!(utc.last_leap_second_adjustment(inside), FixedDuration::SECOND);

        let after = AbsoluteTime::parse("2017-01-01T00:00:00", &utc).unwrap();
        assert!(!utc.is_inside_leap_second(after));
        assert_eq!(utc.minute_duration(after), 60);
    }

    #[test]
    fn test_minute_duration_before_leap() {
        let utc = utc();
        let last_minute = AbsoluteTime::parse("2016-12-31T23:59:00", &utc).unwrap();
        assert_eq!(utc.minute_duration(last_minute), 61);
        assert!(!utc.is_inside_leap_second(last_minute));

        let earlier = AbsoluteTime::parse("2016-12-31T23:58:59.999", &utc).unwrap();
        assert_eq!(utc.minute_duration(earlier), 60);
    }

    #[test]
    fn test_local_to_tai_across_midnight() {
        let utc = utc();
        // 2017-01-01T00:30+01:00 is still 2016 in UTC.
        let date = CalendarDate::new(2017, 1, 1).unwrap();
        let time = ClockTime::hms(0, 30, 0.0).unwrap().with_utc_offset(60);
        assert_eq!(
            utc.local_to_tai_offset(date, time).unwrap(),
            FixedDuration::from_seconds(36)
        );
        let time = ClockTime::hms(1, 30, 0.0).unwrap().with_utc_offset(60);
        assert_eq!(
            utc.local_to_tai_offset(date, time).unwrap(),
            FixedDuration::from_seconds(37)
        );
    }

    #[test]
    fn test_from_entries_validation() {
        assert!(UtcScale::from_entries(Vec::new()).is_err());

        let a = LeapSecondEntry::new(
            CalendarDate::new(1990, 1, 1).unwrap(),
            41_317,
            FixedDuration::from_seconds(25),
            DriftRate::ZERO,
        );
        let b = LeapSecondEntry::new(
            CalendarDate::new(1980, 1, 1).unwrap(),
            41_317,
            FixedDuration::from_seconds(19),
            DriftRate::ZERO,
        );
        let err = UtcScale::from_entries(vec![a, b]).unwrap_err();
        assert!(matches!(err, TimeError::InvalidArgument(_)));

        let custom = UtcScale::from_entries(vec![b, a]).unwrap();
        assert_eq!(custom.entries().count(), 2);
        let t = AbsoluteTime::parse("1995-01-01T00:00:00", &custom).unwrap();
        assert_eq!(
            custom.offset_from_tai(t).unwrap(),
            FixedDuration::from_seconds(-25)
        );
    }
}
