//! GLONASS system time.
//!
//! GLONASS time is UTC(SU) shifted to Moscow time, so it is UTC + 3 h and
//! inserts the same leap seconds, at 02:59:60 local time.

use super::utc::UtcScale;
use super::TimeScale;
use crate::absolute::AbsoluteTime;
use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::TimeResult;
use celestial_core::constants::SECONDS_PER_HOUR;
use celestial_core::FixedDuration;
use std::fmt;
use std::sync::Arc;

const MOSCOW_HOURS: u8 = 3;

const MOSCOW_OFFSET: FixedDuration =
    FixedDuration::from_seconds(MOSCOW_HOURS as i64 * SECONDS_PER_HOUR);

/// GLONASS time, derived from a UTC scale.
#[derive(Debug, Clone)]
pub struct GlonassScale {
    utc: Arc<UtcScale>,
}

impl GlonassScale {
    pub fn new(utc: Arc<UtcScale>) -> Self {
        Self { utc }
    }

    /// The UTC scale this one follows.
    pub fn utc(&self) -> &UtcScale {
        &self.utc
    }
}

impl TimeScale for GlonassScale {
    fn name(&self) -> &str {
        "GLONASS"
    }

    fn offset_from_tai(&self, instant: AbsoluteTime) -> TimeResult<FixedDuration> {
        Ok(self
            .utc
            .offset_from_tai(instant)?
            .checked_add(MOSCOW_OFFSET)?)
    }

    fn local_to_tai_offset(
        &self,
        date: CalendarDate,
        time: ClockTime,
    ) -> TimeResult<FixedDuration> {
        let (utc_date, utc_hour) = if time.hour() < MOSCOW_HOURS {
            (date.shifted_by(-1)?, time.hour() + 24 - MOSCOW_HOURS)
        } else {
            (date, time.hour() - MOSCOW_HOURS)
        };
        let utc_time = ClockTime::new(utc_hour, time.minute(), time.second())?
            .with_utc_offset(time.minutes_from_utc());
        Ok(self
            .utc
            .local_to_tai_offset(utc_date, utc_time)?
            .checked_sub(MOSCOW_OFFSET)?)
    }

    fn is_inside_leap_second(&self, instant: AbsoluteTime) -> bool {
        self.utc.is_inside_leap_second(instant)
    }

    fn minute_duration(&self, instant: AbsoluteTime) -> u8 {
        self.utc.minute_duration(instant)
    }

    fn last_leap_second_adjustment(&self, instant: AbsoluteTime) -> FixedDuration {
        self.utc.last_leap_second_adjustment(instant)
    }
}

impl fmt::Display for GlonassScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GLONASS")
    }
}
