//! Calendar dates over the proleptic Julian, Julian and Gregorian calendars.
//!
//! A [`CalendarDate`] is a signed count of days from 2000-01-01. The
//! `(year, month, day)` triple is derived from that count with the calendar
//! in force on the day:
//!
//! | Range | Calendar | Leap rule |
//! |-------|----------|-----------|
//! | years < 1 | proleptic Julian | divisible by 4 |
//! | 0001-01-01 to 1582-10-04 | Julian | divisible by 4 |
//! | 1582-10-15 onward | Gregorian | divisible by 4, not by 100 unless by 400 |
//!
//! The ten days 1582-10-05 to 1582-10-14 do not exist and are rejected.
//! Year 0 exists (astronomical numbering), so 1 BC is year 0 and 2 BC is -1.
//!
//! # Usage
//!
//! ```
//! use celestial_time::CalendarDate;
//!
//! let date = CalendarDate::new(2009, 12, 31).unwrap();
//! assert_eq!(date.day_count(), 3652);
//! assert_eq!(date.iso_week(), 53);
//! assert_eq!(date.day_of_week(), 4); // Thursday
//! assert_eq!(date.mjd(), 55196);
//!
//! let julian = CalendarDate::new(1582, 10, 4).unwrap();
//! assert_eq!(julian.shifted_by(1).unwrap(), CalendarDate::new(1582, 10, 15).unwrap());
//! assert!(CalendarDate::new(1582, 10, 10).is_err());
//! ```
//!
//! # Algorithm
//!
//! The year is estimated from the day count with a closed-form expression per
//! calendar, the day within the year follows from the last day of the previous
//! year, and the month from a linear approximation corrected through
//! cumulative month-length tables. Construction from `(year, month, day)` goes
//! the other way and then re-derives the triple: any mismatch means the input
//! was not a real date.

use crate::errors::{TimeError, TimeResult};
use crate::parsing;
use celestial_core::constants::{J2000_JULIAN_DAY_NUMBER, J2000_MJD};
use std::fmt;
use std::str::FromStr;

/// Day count of 1582-10-15, the first Gregorian day.
const GREGORIAN_START: i64 = -152_384;

/// Day count of 0001-01-01.
const JULIAN_START: i64 = -730_121;

const PREVIOUS_MONTH_END_LEAP: [i64; 13] =
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];
const PREVIOUS_MONTH_END_COMMON: [i64; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Calendar {
    ProlepticJulian,
    Julian,
    Gregorian,
}

impl Calendar {
    const fn for_day_count(day_count: i64) -> Self {
        if day_count >= GREGORIAN_START {
            Calendar::Gregorian
        } else if day_count >= JULIAN_START {
            Calendar::Julian
        } else {
            Calendar::ProlepticJulian
        }
    }

    const fn for_date(year: i64, month: i64, day: i64) -> Self {
        if year >= 1583 {
            Calendar::Gregorian
        } else if year < 1 {
            Calendar::ProlepticJulian
        } else if year < 1582 || month < 10 || (month < 11 && day < 5) {
            Calendar::Julian
        } else {
            Calendar::Gregorian
        }
    }

    // The numerators below are non-negative over each calendar's range, so
    // truncating division is a floor.
    const fn year_of(self, day_count: i64) -> i64 {
        match self {
            Calendar::ProlepticJulian => -((-4 * day_count - 2_920_488) / 1461),
            Calendar::Julian => (4 * day_count + 2_921_948) / 1461,
            Calendar::Gregorian => {
                // One too high for about 0.16% of days.
                let year = (400 * day_count + 292_194_288) / 146_097;
                if day_count <= self.last_day_of_year(year - 1) {
                    year - 1
                } else {
                    year
                }
            }
        }
    }

    const fn last_day_of_year(self, year: i64) -> i64 {
        match self {
            Calendar::ProlepticJulian => 365 * year + (year + 1) / 4 - 730_123,
            Calendar::Julian => 365 * year + year / 4 - 730_122,
            Calendar::Gregorian => 365 * year + year / 4 - year / 100 + year / 400 - 730_120,
        }
    }

    const fn is_leap(self, year: i64) -> bool {
        match self {
            Calendar::ProlepticJulian | Calendar::Julian => year % 4 == 0,
            Calendar::Gregorian => year % 4 == 0 && (year % 400 == 0 || year % 100 != 0),
        }
    }
}

const fn month_table(leap: bool) -> &'static [i64; 13] {
    if leap {
        &PREVIOUS_MONTH_END_LEAP
    } else {
        &PREVIOUS_MONTH_END_COMMON
    }
}

const fn month_of(day_in_year: i64, leap: bool) -> i64 {
    if day_in_year < 32 {
        1
    } else if leap {
        (10 * day_in_year + 313) / 306
    } else {
        (10 * day_in_year + 323) / 306
    }
}

/// Day count of `(year, month, day)` without validating the triple.
const fn raw_day_count(year: i64, month: i64, day: i64) -> i64 {
    let calendar = Calendar::for_date(year, month, day);
    let table = month_table(calendar.is_leap(year));
    calendar.last_day_of_year(year - 1) + table[month as usize] + day
}

/// Monday of ISO week 1: the Monday on or before January 4th.
const fn first_week_monday(year: i64) -> i64 {
    let year_first = raw_day_count(year, 1, 1);
    let offset_to_monday = 4 - (year_first + 2).rem_euclid(7);
    if offset_to_monday > 3 {
        year_first + offset_to_monday - 7
    } else {
        year_first + offset_to_monday
    }
}

/// A calendar day, stored as days since 2000-01-01.
///
/// The derived year, month and day are computed once at construction. Ordering
/// follows the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    day_count: i32,
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// -4712-01-01, day zero of the Julian Day numbering.
    pub const JULIAN_EPOCH: Self = Self::from_day_count(-2_451_545);
    /// 1858-11-17, day zero of the Modified Julian Day numbering.
    pub const MODIFIED_JULIAN_EPOCH: Self = Self::from_day_count(-51_544);
    pub const J1900_EPOCH: Self = Self::from_day_count(-36_524);
    pub const FIFTIES_EPOCH: Self = Self::from_day_count(-18_262);
    /// 1958-01-01, the CCSDS time code epoch.
    pub const CCSDS_EPOCH: Self = Self::from_day_count(-15_340);
    pub const UNIX_EPOCH: Self = Self::from_day_count(-10_957);
    /// 1980-01-06.
    pub const GPS_EPOCH: Self = Self::from_day_count(-7_300);
    pub const GLONASS_EPOCH: Self = Self::from_day_count(-1_461);
    /// 1999-08-22.
    pub const GALILEO_EPOCH: Self = Self::from_day_count(-132);
    /// 1999-08-22, shared with Galileo.
    pub const IRNSS_EPOCH: Self = Self::from_day_count(-132);
    pub const J2000_EPOCH: Self = Self::from_day_count(0);
    pub const BEIDOU_EPOCH: Self = Self::from_day_count(2_192);

    /// Creates a date from its day count relative to 2000-01-01.
    ///
    /// Every `i32` day count is a valid date.
    pub const fn from_day_count(day_count: i32) -> Self {
        let d = day_count as i64;
        let calendar = Calendar::for_day_count(d);
        let year = calendar.year_of(d);
        let day_in_year = d - calendar.last_day_of_year(year - 1);
        let leap = calendar.is_leap(year);
        let month = month_of(day_in_year, leap);
        let day = day_in_year - month_table(leap)[month as usize];
        Self {
            day_count,
            year: year as i32,
            month: month as u8,
            day: day as u8,
        }
    }

    /// Creates a date from year, month and day.
    ///
    /// Fails when the triple does not name a real day in the calendar in
    /// force: month outside 1-12, February 29th of a common year, or a day
    /// lost in the 1582 reform.
    pub fn new(year: i32, month: u8, day: u8) -> TimeResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::invalid_date(
                year,
                month as i32,
                day as i32,
                "month out of range",
            ));
        }
        let count = raw_day_count(year as i64, month as i64, day as i64);
        let day_count = i32::try_from(count).map_err(|_| {
            TimeError::invalid_date(year, month as i32, day as i32, "day count out of range")
        })?;
        let check = Self::from_day_count(day_count);
        if check.year != year || check.month != month || check.day != day {
            return Err(TimeError::invalid_date(
                year,
                month as i32,
                day as i32,
                "no such day in the calendar",
            ));
        }
        Ok(check)
    }

    /// Creates a date from a year and a 1-based day number within it.
    pub fn from_year_day(year: i32, day_of_year: u16) -> TimeResult<Self> {
        let first = Self::new(year, 1, 1)?;
        let date = first.shifted_by(i32::from(day_of_year) - 1)?;
        if day_of_year == 0 || date.year != year {
            return Err(TimeError::invalid_argument(format!(
                "day {} is not in year {}",
                day_of_year, year
            )));
        }
        Ok(date)
    }

    /// Creates a date from ISO-8601 week-date components.
    ///
    /// `week_year` may differ from the calendar year near year boundaries.
    /// `day_of_week` runs from 1 (Monday) to 7 (Sunday).
    pub fn from_week(week_year: i32, week: u8, day_of_week: u8) -> TimeResult<Self> {
        if !(1..=53).contains(&week) || !(1..=7).contains(&day_of_week) {
            return Err(TimeError::invalid_argument(format!(
                "invalid week date {}-W{:02}-{}",
                week_year, week, day_of_week
            )));
        }
        let count = first_week_monday(week_year as i64) + 7 * week as i64 + day_of_week as i64 - 8;
        let day_count = i32::try_from(count)
            .map_err(|_| TimeError::overflow(format!("week year {} out of range", week_year)))?;
        let date = Self::from_day_count(day_count);
        if date.iso_week_date() != (week_year, week, day_of_week) {
            return Err(TimeError::invalid_argument(format!(
                "year {} has no week {}",
                week_year, week
            )));
        }
        Ok(date)
    }

    pub fn from_mjd(mjd: i64) -> TimeResult<Self> {
        let day_count = mjd
            .checked_sub(J2000_MJD)
            .and_then(|d| i32::try_from(d).ok())
            .ok_or_else(|| TimeError::overflow(format!("MJD {} out of range", mjd)))?;
        Ok(Self::from_day_count(day_count))
    }

    /// Days since 2000-01-01.
    pub const fn day_count(&self) -> i32 {
        self.day_count
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn mjd(&self) -> i64 {
        J2000_MJD + self.day_count as i64
    }

    /// Julian Day number of the noon that falls on this date.
    pub const fn julian_day(&self) -> i64 {
        J2000_JULIAN_DAY_NUMBER + self.day_count as i64
    }

    /// Whether this date's year is a leap year in the calendar in force.
    pub const fn is_leap_year(&self) -> bool {
        Calendar::for_day_count(self.day_count as i64).is_leap(self.year as i64)
    }

    /// ISO day of week: Monday is 1, Sunday is 7.
    pub const fn day_of_week(&self) -> u8 {
        let dow = (self.day_count as i64 + 6).rem_euclid(7);
        if dow == 0 {
            7
        } else {
            dow as u8
        }
    }

    /// 1-based day within the year.
    pub const fn day_of_year(&self) -> u16 {
        (self.day_count as i64 - raw_day_count(self.year as i64 - 1, 12, 31)) as u16
    }

    /// ISO-8601 week number, 1 to 53.
    pub const fn iso_week(&self) -> u8 {
        self.iso_week_date().1
    }

    /// ISO-8601 `(week_year, week, day_of_week)`.
    ///
    /// Up to three days at either end of a calendar year belong to a week of
    /// the neighbouring year: 2008-12-29 is 2009-W01-1 and 2010-01-03 is
    /// 2009-W53-7.
    pub const fn iso_week_date(&self) -> (i32, u8, u8) {
        let day = self.day_count as i64;
        let year = self.year as i64;
        let monday = first_week_monday(year);
        let mut week_year = year;
        let mut days_since_monday = day - monday;
        if days_since_monday < 0 {
            days_since_monday += monday - first_week_monday(year - 1);
            week_year -= 1;
        } else if days_since_monday > 363 {
            let week_year_length = first_week_monday(year + 1) - monday;
            if days_since_monday >= week_year_length {
                days_since_monday -= week_year_length;
                week_year += 1;
            }
        }
        (
            week_year as i32,
            (1 + days_since_monday / 7) as u8,
            self.day_of_week(),
        )
    }

    /// Shifts by a signed number of days.
    pub fn shifted_by(&self, days: i32) -> TimeResult<Self> {
        let day_count = self
            .day_count
            .checked_add(days)
            .ok_or_else(|| TimeError::overflow("date shift out of range"))?;
        Ok(Self::from_day_count(day_count))
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.day_count as i64 - other.day_count as i64
    }

    /// Extended ISO-8601 date, `YYYY-MM-DD`.
    ///
    /// Years before 0 are written `-YYYY`, years after 9999 with a leading `+`.
    pub fn to_iso8601(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}-{:02}", -(self.year as i64), self.month, self.day)
        } else if self.year > 9999 {
            write!(f, "+{}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for CalendarDate {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-DDD` and `YYYY-Www-D`, each
    /// with an optional sign on the year.
    fn from_str(s: &str) -> TimeResult<Self> {
        parsing::parse_date(s)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for CalendarDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> CalendarDate {
        // Roughly -4800 to +7000.
        let day_count = i32::arbitrary(g).rem_euclid(4_600_000) - 2_500_000;
        CalendarDate::from_day_count(day_count)
    }
}
