//! Calendar dates, leap-second aware clocks and time scales with attosecond
//! resolution.
//!
//! Instants are stored as exact TAI offsets from 2000-01-01T12:00 TAI and only
//! become calendar readings when viewed through a [`TimeScale`]. UTC is built
//! from the full TAI-UTC history, including the rate offsets used before 1972,
//! so readings such as `2016-12-31T23:59:60.5` are representable.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`calendar`] | [`CalendarDate`]: proleptic Julian, Julian and Gregorian dates |
//! | [`clock`] | [`ClockTime`]: `HH:MM:SS.f` with UTC offset and leap seconds |
//! | [`datetime`] | [`DateTime`]: a date and clock reading together |
//! | [`absolute`] | [`AbsoluteTime`]: instants on the TAI timeline |
//! | [`scales`] | [`TimeScale`] and the TAI, TT, TDB, UTC, GNSS scales |
//! | [`registry`] | Shared scale instances and standard epochs |
//! | [`parsing`] | ISO-8601 parsing |
//! | [`errors`] | [`TimeError`] and [`TimeResult`] |
//!
//! # Quick Start
//!
//! ```
//! use celestial_time::{registry, AbsoluteTime, FixedDuration};
//!
//! let t = AbsoluteTime::parse("2008-12-31T23:59:59", registry::utc()).unwrap();
//! let t = t.shifted_by("1.25".parse::<FixedDuration>().unwrap()).unwrap();
//! assert_eq!(t.to_string(), "2008-12-31T23:59:60.250Z");
//!
//! let gps = t.to_local(registry::gps()).unwrap();
//! assert_eq!(gps.to_string(), "2009-01-01T00:00:14.250+00:00");
//! ```
//!
//! # Features
//!
//! - `logging` (default): emit `log` records for table builds, rejected leap
//!   tables and iterations that do not settle.

#[macro_use]
mod logging;

pub mod absolute;
pub mod calendar;
pub mod clock;
pub mod datetime;
pub mod errors;
pub mod parsing;
pub mod registry;
pub mod scales;

pub use absolute::AbsoluteTime;
pub use calendar::CalendarDate;
pub use clock::ClockTime;
pub use datetime::DateTime;
pub use errors::{ErrorKind, TimeError, TimeResult};
pub use registry::Epochs;
pub use scales::{
    offset_between_scales, ConstantOffsetScale, GlonassScale, TdbScale, TimeScale, UtcScale,
};

pub use celestial_core::FixedDuration;
