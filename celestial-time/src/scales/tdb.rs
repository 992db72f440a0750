//! Barycentric Dynamical Time (TDB).
//!
//! TDB runs with TT on average but differs from it by a periodic term,
//! dominated by Earth's orbital eccentricity, of about 1.66 ms amplitude over
//! one year. This scale uses the two leading terms of that series:
//!
//! ```text
//! g       = 357.53° + 0.9856003° × (days since J2000 TT)
//! TDB-TT  = 0.001658 s × sin g + 0.000014 s × sin 2g
//! TDB-TAI = 32.184 s + (TDB-TT)
//! ```
//!
//! That is accurate to a few tens of microseconds, which is enough for
//! labelling ephemeris epochs but not for pulsar timing.

use super::TimeScale;
use crate::absolute::AbsoluteTime;
use crate::errors::TimeResult;
use celestial_core::constants::{ATTOSECONDS_PER_SECOND, DEG_TO_RAD, SECONDS_PER_DAY_F64};
use celestial_core::math::{rint, sin};
use celestial_core::FixedDuration;
use std::fmt;

const TT_OFFSET: FixedDuration = FixedDuration::from_millis(32_184);

/// Mean anomaly of the Earth at J2000, degrees.
const G0: f64 = 357.53;
/// Mean anomaly rate, degrees per day.
const G1: f64 = 0.9856003;
const F1: f64 = 0.001658;
const F2: f64 = 0.000014;

/// Barycentric Dynamical Time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TdbScale;

impl TdbScale {
    pub const fn new() -> Self {
        Self
    }

    /// TDB-TT in seconds at `instant`.
    pub fn periodic_correction(&self, instant: AbsoluteTime) -> TimeResult<f64> {
        let days = instant.duration_from(AbsoluteTime::J2000_EPOCH)?.to_f64() / SECONDS_PER_DAY_F64;
        let g = DEG_TO_RAD * (G0 + G1 * days);
        Ok(F1 * sin(g) + F2 * sin(2.0 * g))
    }
}

impl TimeScale for TdbScale {
    fn name(&self) -> &str {
        "TDB"
    }

    fn offset_from_tai(&self, instant: AbsoluteTime) -> TimeResult<FixedDuration> {
        let correction = self.periodic_correction(instant)?;
        // |correction| < 2 ms, so the attosecond count fits comfortably in i64.
        let attoseconds = rint(correction * ATTOSECONDS_PER_SECOND as f64) as i64;
        Ok(TT_OFFSET.checked_add(FixedDuration::from_attoseconds(attoseconds))?)
    }
}

impl fmt::Display for TdbScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TDB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDate;
    use crate::clock::ClockTime;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_offset_at_j2000() {
        let offset = TdbScale.offset_from_tai(AbsoluteTime::J2000_EPOCH).unwrap();
        // g = 357.53°, so the correction is small and negative.
        let expected = 32.184 + F1 * (357.53f64.to_radians()).sin() + F2 * (2.0 * 357.53f64.to_radians()).sin();
        assert_abs_diff_eq!(offset.to_f64(), expected, epsilon = 1e-12);
        assert!(offset < TT_OFFSET);
    }

    #[test]
    fn test_correction_stays_bounded() {
        let mut instant = AbsoluteTime::J2000_EPOCH;
        let step = FixedDuration::from_seconds(86_400 * 17);
        for _ in 0..100 {
            let c = TdbScale.periodic_correction(instant).unwrap();
            assert!(c.abs() < 0.00168, "correction {} too large", c);
            instant = instant.shifted_by(step).unwrap();
        }
    }

    #[test]
    fn test_local_round_trip() {
        let date = CalendarDate::new(2010, 7, 1).unwrap();
        let time = ClockTime::hms(6, 30, 15.0).unwrap();
        let instant = AbsoluteTime::from_components(date, time, &TdbScale).unwrap();
        let local = instant.to_local(&TdbScale).unwrap();
        assert_eq!(local.date(), date);
        assert_eq!((local.time().hour(), local.time().minute()), (6, 30));
        assert_abs_diff_eq!(local.time().second().to_f64(), 15.0, epsilon = 1e-12);
    }
}
