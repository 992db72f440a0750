use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::{TimeError, TimeResult};
use crate::parsing::parse_date_time;
use std::fmt;
use std::str::FromStr;

/// A calendar date paired with a clock reading, in some time scale.
///
/// This is what [`AbsoluteTime::to_local`](crate::AbsoluteTime::to_local)
/// returns. It carries no scale of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: CalendarDate,
    time: ClockTime,
}

impl DateTime {
    pub const fn new(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    pub const fn time(&self) -> ClockTime {
        self.time
    }

    pub const fn into_parts(self) -> (CalendarDate, ClockTime) {
        (self.date, self.time)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for DateTime {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        parse_date_time(s)
    }
}
