//! ISO-8601 parsing for dates, clock times and date-times.
//!
//! Seconds are parsed as exact decimals straight into a [`FixedDuration`], so
//! `"23:59:60.000000000000000001"` keeps its last attosecond.
//!
//! | Input | Accepted forms |
//! |-------|----------------|
//! | date | `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-DDD`, `YYYY-Www-D`, year optionally signed |
//! | time | `HH:MM[:SS[.f]]`, `HHMMSS[.f]`, then optional `Z`, `±HH:MM`, `±HHMM`, `±HH` |
//! | date-time | `<date>T<time>` or `<date> <time>`; a bare date means midnight |

use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::datetime::DateTime;
use crate::errors::{TimeError, TimeResult};
use celestial_core::FixedDuration;

const MAX_ISO8601_LENGTH: usize = 64;

fn check_input(s: &str) -> TimeResult<()> {
    if s.len() > MAX_ISO8601_LENGTH {
        return Err(TimeError::parse("Input too long"));
    }
    if !s.is_ascii() {
        return Err(TimeError::parse(format!("Non-ASCII input: '{}'", s)));
    }
    Ok(())
}

fn parse_digits(s: &str, what: &str) -> TimeResult<u32> {
    if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::parse(format!("Invalid {}: '{}'", what, s)));
    }
    Ok(s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
}

fn parse_fixed_width(s: &str, width: usize, what: &str) -> TimeResult<u8> {
    if s.len() != width {
        return Err(TimeError::parse(format!(
            "Invalid {} format: '{}'. Expected {} digits",
            what, s, width
        )));
    }
    let value = parse_digits(s, what)?;
    u8::try_from(value).map_err(|_| TimeError::parse(format!("{} out of range: {}", what, value)))
}

/// Parses a year with an optional sign. Unsigned years must have four digits.
fn parse_year(s: &str) -> TimeResult<i32> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => {
            if s.len() != 4 {
                return Err(TimeError::parse(format!(
                    "Invalid year format: '{}'",
                    s
                )));
            }
            (false, s)
        }
    };
    if digits.len() < 4 {
        return Err(TimeError::parse(format!("Invalid year format: '{}'", s)));
    }
    let value = parse_digits(digits, "year")? as i32;
    Ok(if negative { -value } else { value })
}

pub fn parse_date(s: &str) -> TimeResult<CalendarDate> {
    let s = s.trim();
    check_input(s)?;

    // The year sign must not be taken for a field separator.
    let sign_len = usize::from(s.starts_with('-') || s.starts_with('+'));
    let body = &s[sign_len..];

    if !body.contains('-') {
        // Basic format YYYYMMDD.
        if body.len() != 8 {
            return Err(TimeError::parse(format!(
                "Invalid date format: '{}'. Expected YYYY-MM-DD",
                s
            )));
        }
        let year = parse_year(&s[..sign_len + 4])?;
        let month = parse_fixed_width(&body[4..6], 2, "month")?;
        let day = parse_fixed_width(&body[6..8], 2, "day")?;
        return CalendarDate::new(year, month, day);
    }

    let components: Vec<&str> = body.split('-').collect();
    let year = parse_year(&s[..sign_len + components[0].len()])?;
    match components.as_slice() {
        [_, month, day] if !month.starts_with('W') => {
            let month = parse_fixed_width(month, 2, "month")?;
            let day = parse_fixed_width(day, 2, "day")?;
            CalendarDate::new(year, month, day)
        }
        [_, week, day_of_week] => {
            let week = parse_fixed_width(&week[1..], 2, "week")?;
            let day_of_week = parse_fixed_width(day_of_week, 1, "day of week")?;
            CalendarDate::from_week(year, week, day_of_week)
        }
        [_, day_of_year] => {
            if day_of_year.len() != 3 {
                return Err(TimeError::parse(format!(
                    "Invalid day of year format: '{}'. Expected DDD",
                    day_of_year
                )));
            }
            let day_of_year = parse_digits(day_of_year, "day of year")? as u16;
            CalendarDate::from_year_day(year, day_of_year)
        }
        _ => Err(TimeError::parse(format!(
            "Invalid date format: '{}'. Expected YYYY-MM-DD",
            s
        ))),
    }
}

/// Splits a trailing `Z` or numeric UTC offset off a time string.
fn split_utc_offset(s: &str) -> TimeResult<(&str, i32)> {
    if let Some(rest) = s.strip_suffix('Z') {
        return Ok((rest, 0));
    }
    let Some(pos) = s.rfind(['+', '-']) else {
        return Ok((s, 0));
    };
    let (clock, offset) = s.split_at(pos);
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let offset = &offset[1..];
    let (hours, minutes) = match offset.len() {
        2 => (offset, "00"),
        4 => offset.split_at(2),
        5 if offset.as_bytes()[2] == b':' => (&offset[..2], &offset[3..]),
        _ => {
            return Err(TimeError::parse(format!(
                "Invalid UTC offset: '{}'",
                offset
            )))
        }
    };
    let hours = i32::from(parse_fixed_width(hours, 2, "offset hours")?);
    let minutes = i32::from(parse_fixed_width(minutes, 2, "offset minutes")?);
    if minutes >= 60 {
        return Err(TimeError::parse(format!(
            "Offset minutes out of range: {}",
            minutes
        )));
    }
    Ok((clock, sign * (hours * 60 + minutes)))
}

fn parse_seconds(s: &str) -> TimeResult<FixedDuration> {
    let whole = s.split('.').next().unwrap_or_default();
    if whole.len() != 2 || s.starts_with(['+', '-']) {
        return Err(TimeError::parse(format!(
            "Invalid seconds format: '{}'. Expected SS[.fff]",
            s
        )));
    }
    s.parse::<FixedDuration>()
        .map_err(|e| TimeError::parse(format!("Invalid seconds: '{}' ({})", s, e)))
}

pub fn parse_time(s: &str) -> TimeResult<ClockTime> {
    let s = s.trim();
    check_input(s)?;
    let (clock, minutes_from_utc) = split_utc_offset(s)?;

    let (hour, minute, second) = if clock.contains(':') {
        let components: Vec<&str> = clock.split(':').collect();
        match components.as_slice() {
            [h, m] => (*h, *m, None),
            [h, m, sec] => (*h, *m, Some(*sec)),
            _ => {
                return Err(TimeError::parse(format!(
                    "Invalid time format: '{}'. Expected HH:MM:SS",
                    clock
                )))
            }
        }
    } else if clock.len() >= 6 {
        (&clock[..2], &clock[2..4], Some(&clock[4..]))
    } else {
        return Err(TimeError::parse(format!(
            "Invalid time format: '{}'. Expected HH:MM:SS",
            clock
        )));
    };

    let hour = parse_fixed_width(hour, 2, "hour")?;
    let minute = parse_fixed_width(minute, 2, "minute")?;
    let second = match second {
        Some(sec) => parse_seconds(sec)?,
        None => FixedDuration::ZERO,
    };
    Ok(ClockTime::new(hour, minute, second)?.with_utc_offset(minutes_from_utc))
}

pub fn parse_date_time(s: &str) -> TimeResult<DateTime> {
    let s = s.trim();
    check_input(s)?;
    match s.find(['T', ' ']) {
        Some(pos) => {
            let date = parse_date(&s[..pos])?;
            let time = parse_time(&s[pos + 1..])?;
            Ok(DateTime::new(date, time))
        }
        None => Ok(DateTime::new(parse_date(s)?, ClockTime::H00)),
    }
}
