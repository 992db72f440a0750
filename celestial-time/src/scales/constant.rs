//! Scales at a fixed offset from TAI.
//!
//! TAI itself, Terrestrial Time and the GNSS system times are all TAI shifted
//! by a constant. GPS time was aligned with UTC at 1980-01-06, when TAI-UTC was
//! 19 s, and Galileo, QZSS and IRNSS follow GPS. BeiDou time was aligned with
//! UTC at 2006-01-01, when TAI-UTC was 33 s.
//!
//! ```
//! use celestial_time::scales::{ConstantOffsetScale, TimeScale};
//! use celestial_time::AbsoluteTime;
//!
//! let gps = ConstantOffsetScale::gps();
//! let offset = gps.offset_from_tai(AbsoluteTime::J2000_EPOCH).unwrap();
//! assert_eq!(offset.seconds(), -19);
//! ```

use super::TimeScale;
use crate::absolute::AbsoluteTime;
use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::TimeResult;
use celestial_core::FixedDuration;
use std::borrow::Cow;
use std::fmt;

/// A time scale that reads TAI plus a constant offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantOffsetScale {
    name: Cow<'static, str>,
    offset: FixedDuration,
}

impl ConstantOffsetScale {
    const fn builtin(name: &'static str, offset: FixedDuration) -> Self {
        Self {
            name: Cow::Borrowed(name),
            offset,
        }
    }

    /// A scale whose reading is `offset_from_tai` ahead of TAI.
    pub fn new(name: impl Into<Cow<'static, str>>, offset_from_tai: FixedDuration) -> Self {
        Self {
            name: name.into(),
            offset: offset_from_tai,
        }
    }

    pub const fn tai() -> Self {
        Self::builtin("TAI", FixedDuration::ZERO)
    }

    /// Terrestrial Time, TAI + 32.184 s.
    pub const fn tt() -> Self {
        Self::builtin("TT", FixedDuration::from_millis(32_184))
    }

    pub const fn gps() -> Self {
        Self::builtin("GPS", FixedDuration::from_seconds(-19))
    }

    /// Galileo System Time.
    pub const fn galileo() -> Self {
        Self::builtin("GST", FixedDuration::from_seconds(-19))
    }

    pub const fn qzss() -> Self {
        Self::builtin("QZSS", FixedDuration::from_seconds(-19))
    }

    /// Indian Regional Navigation Satellite System (NavIC) time.
    pub const fn irnss() -> Self {
        Self::builtin("IRNSS", FixedDuration::from_seconds(-19))
    }

    /// BeiDou Time.
    pub const fn beidou() -> Self {
        Self::builtin("BDT", FixedDuration::from_seconds(-33))
    }

    pub const fn offset(&self) -> FixedDuration {
        self.offset
    }
}

impl TimeScale for ConstantOffsetScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn offset_from_tai(&self, _instant: AbsoluteTime) -> TimeResult<FixedDuration> {
        Ok(self.offset)
    }

    fn local_to_tai_offset(
        &self,
        _date: CalendarDate,
        _time: ClockTime,
    ) -> TimeResult<FixedDuration> {
        Ok(self.offset.negate()?)
    }
}

impl fmt::Display for ConstantOffsetScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_offsets() {
        let t = AbsoluteTime::J2000_EPOCH;
        let offset = |scale: ConstantOffsetScale| scale.offset_from_tai(t).unwrap();
        assert_eq!(offset(ConstantOffsetScale::tai()), FixedDuration::ZERO);
        assert_eq!(offset(ConstantOffsetScale::tt()).to_string(), "32.184000000000000000");
        assert_eq!(offset(ConstantOffsetScale::gps()), FixedDuration::from_seconds(-19));
        assert_eq!(offset(ConstantOffsetScale::irnss()), FixedDuration::from_seconds(-19));
        assert_eq!(offset(ConstantOffsetScale::beidou()), FixedDuration::from_seconds(-33));
    }

    #[test]
    fn test_local_to_tai_is_negated_offset() {
        let date = CalendarDate::new(2024, 1, 1).unwrap();
        let tt = ConstantOffsetScale::tt();
        let back = tt.local_to_tai_offset(date, ClockTime::H00).unwrap();
        assert_eq!(back, FixedDuration::from_millis(-32_184));
    }

    #[test]
    fn test_custom_scale() {
        let scale = ConstantOffsetScale::new(String::from("LAB"), FixedDuration::from_millis(250));
        assert_eq!(scale.name(), "LAB");
        assert_eq!(scale.to_string(), "LAB");
        assert_eq!(scale.offset(), FixedDuration::from_millis(250));
    }
}
