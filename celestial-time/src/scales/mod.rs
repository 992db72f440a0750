//! Time scales and the offsets that relate them to TAI.
//!
//! Every instant is stored as a TAI offset from J2000. A time scale only has to
//! say how far its clock reading is from TAI at a given instant, and how to go
//! back from a local date and clock reading to TAI.
//!
//! # Scales
//!
//! | Scale | Type | Offset from TAI |
//! |-------|------|-----------------|
//! | TAI | [`ConstantOffsetScale::tai`] | 0 |
//! | TT | [`ConstantOffsetScale::tt`] | +32.184 s |
//! | GPS, Galileo, QZSS, IRNSS | [`ConstantOffsetScale`] | -19 s |
//! | BeiDou | [`ConstantOffsetScale::beidou`] | -33 s |
//! | TDB | [`TdbScale`] | TT + 1.658 ms sin g + 0.014 ms sin 2g |
//! | UTC | [`UtcScale`] | leap-second table, drifting before 1972 |
//! | GLONASS | [`GlonassScale`] | UTC + 3 h |
//!
//! # Inverting a scale
//!
//! For a constant scale the local-to-TAI offset is just the negated offset.
//! Scales whose offset varies have no closed-form inverse, so the default
//! [`TimeScale::local_to_tai_offset`] iterates: treat the local reading as if it
//! were TAI, then repeatedly evaluate the offset at the instant shifted by the
//! previous estimate.
//!
//! ```text
//! x0 = 0
//! x(k+1) = -offset_from_tai(reference + x(k))     for 8 rounds
//! ```
//!
//! The offsets involved change by far less than a second per second, so eight
//! rounds converge to the attosecond everywhere except inside a leap, where the
//! table-driven override on [`UtcScale`] is used instead.

pub mod constant;
pub mod glonass;
pub mod leap_seconds;
pub mod tdb;
pub mod utc;

pub use constant::ConstantOffsetScale;
pub use glonass::GlonassScale;
pub use leap_seconds::{parse_tai_utc_dat, DriftRate, LeapSecondEntry};
pub use tdb::TdbScale;
pub use utc::UtcScale;

use crate::absolute::AbsoluteTime;
use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::TimeResult;
use celestial_core::FixedDuration;
use std::fmt;

const LOCAL_TO_TAI_ROUNDS: usize = 8;

/// A time scale: a rule for reading a clock from a TAI instant and back.
///
/// Implementations are immutable and shareable between threads.
pub trait TimeScale: fmt::Debug + Send + Sync {
    /// Short name, such as `"UTC"`.
    fn name(&self) -> &str;

    /// This scale's reading minus TAI at `instant`.
    fn offset_from_tai(&self, instant: AbsoluteTime) -> TimeResult<FixedDuration>;

    /// Offset to add to a local reading, taken as TAI, to get the TAI instant.
    fn local_to_tai_offset(
        &self,
        date: CalendarDate,
        time: ClockTime,
    ) -> TimeResult<FixedDuration> {
        let reference = AbsoluteTime::from_tai_components(date, time)?;
        let step = |offset: FixedDuration| -> TimeResult<FixedDuration> {
            Ok(self
                .offset_from_tai(reference.shifted_by(offset)?)?
                .negate()?)
        };
        let mut offset = FixedDuration::ZERO;
        for _ in 1..LOCAL_TO_TAI_ROUNDS {
            offset = step(offset)?;
        }
        let last = step(offset)?;
        if last != offset {
            trace!(
                "{} local-to-TAI did not settle at {}T{}: {} s then {} s",
                self.name(),
                date,
                time,
                offset,
                last
            );
        }
        Ok(last)
    }

    /// Whether `instant` falls inside an inserted leap second.
    fn is_inside_leap_second(&self, _instant: AbsoluteTime) -> bool {
        false
    }

    /// Length in seconds of the minute containing `instant`.
    fn minute_duration(&self, _instant: AbsoluteTime) -> u8 {
        60
    }

    /// Size of the most recent leap inserted at or before `instant`.
    fn last_leap_second_adjustment(&self, _instant: AbsoluteTime) -> FixedDuration {
        FixedDuration::ZERO
    }
}

/// `a.offset_from_tai(instant) - b.offset_from_tai(instant)`: how far clock `a`
/// reads ahead of clock `b`.
pub fn offset_between_scales<A, B>(a: &A, b: &B, instant: AbsoluteTime) -> TimeResult<FixedDuration>
where
    A: TimeScale + ?Sized,
    B: TimeScale + ?Sized,
{
    Ok(a
        .offset_from_tai(instant)?
        .checked_sub(b.offset_from_tai(instant)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_offset_between_scales() {
        let t = AbsoluteTime::J2000_EPOCH;
        let tt_minus_gps = offset_between_scales(registry::tt(), registry::gps(), t).unwrap();
        assert_eq!(tt_minus_gps, "51.184".parse().unwrap());

        let utc_minus_tai = offset_between_scales(registry::utc(), registry::tai(), t).unwrap();
        assert_eq!(utc_minus_tai, FixedDuration::from_seconds(-32));
    }

    #[test]
    fn test_default_iteration_matches_constant_inverse() {
        #[derive(Debug)]
        struct Shifted;

        impl TimeScale for Shifted {
            fn name(&self) -> &str {
                "shifted"
            }

            fn offset_from_tai(&self, _instant: AbsoluteTime) -> TimeResult<FixedDuration> {
                Ok("-12.5".parse().unwrap())
            }
        }

        let date = CalendarDate::new(2020, 6, 1).unwrap();
        let offset = Shifted.local_to_tai_offset(date, ClockTime::H12).unwrap();
        assert_eq!(offset, "12.5".parse().unwrap());
    }

    #[test]
    fn test_trait_objects() {
        let scales: Vec<&dyn TimeScale> = vec![registry::tai(), registry::utc(), registry::tdb()];
        let names: Vec<&str> = scales.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["TAI", "UTC", "TDB"]);
    }
}
