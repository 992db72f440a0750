//! Calendar and clock constants shared by the time-keeping crates.
//!
//! Day counts in this workspace are measured from the J2000 calendar day
//! (2000-01-01), and instants from 2000-01-01T12:00:00 TAI. The constants
//! below tie those origins to the Julian Day and Modified Julian Day numbering.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2451545.0;

/// Julian Day number of the calendar day 2000-01-01 (its noon).
pub const J2000_JULIAN_DAY_NUMBER: i64 = 2_451_545;

/// Modified Julian Day of the calendar day 2000-01-01.
pub const J2000_MJD: i64 = 51_544;

pub const SECONDS_PER_MINUTE: i64 = 60;

pub const SECONDS_PER_HOUR: i64 = 3_600;

pub const SECONDS_PER_HALF_DAY: i64 = 43_200;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

pub const MINUTES_PER_DAY: i32 = 1_440;

/// Sub-second resolution of [`FixedDuration`](crate::FixedDuration): 10⁻¹⁸ s.
pub const ATTOSECONDS_PER_SECOND: i64 = 1_000_000_000_000_000_000;

/// Number of decimal digits in one second's worth of attoseconds.
pub const ATTOSECOND_DIGITS: u32 = 18;

pub const ATTOSECONDS_PER_MILLISECOND: i64 = 1_000_000_000_000_000;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;
