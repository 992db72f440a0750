//! Shared instances of the standard time scales and epochs.
//!
//! Constant-offset scales are plain statics. UTC needs its leap-second table
//! folded, so it and everything built on it (GLONASS, the epochs) sit in
//! [`Lazy`] cells: the first caller builds them, concurrent first callers wait
//! for that build, and every later call is a load.
//!
//! ```
//! use celestial_time::registry;
//! use celestial_time::scales::TimeScale;
//!
//! let utc = registry::scale_by_name("utc").unwrap();
//! assert_eq!(utc.name(), "UTC");
//! assert_eq!(
//!     registry::epochs().gps,
//!     celestial_time::AbsoluteTime::from_ymd(1980, 1, 6, registry::utc()).unwrap()
//! );
//! ```

use crate::absolute::AbsoluteTime;
use crate::calendar::CalendarDate;
use crate::clock::ClockTime;
use crate::errors::TimeResult;
use crate::scales::{ConstantOffsetScale, GlonassScale, TdbScale, TimeScale, UtcScale};
use celestial_core::FixedDuration;
use once_cell::sync::Lazy;
use std::sync::Arc;

static TAI: ConstantOffsetScale = ConstantOffsetScale::tai();
static TT: ConstantOffsetScale = ConstantOffsetScale::tt();
static GPS: ConstantOffsetScale = ConstantOffsetScale::gps();
static GALILEO: ConstantOffsetScale = ConstantOffsetScale::galileo();
static QZSS: ConstantOffsetScale = ConstantOffsetScale::qzss();
static IRNSS: ConstantOffsetScale = ConstantOffsetScale::irnss();
static BEIDOU: ConstantOffsetScale = ConstantOffsetScale::beidou();
static TDB: TdbScale = TdbScale::new();

static UTC: Lazy<Arc<UtcScale>> = Lazy::new(|| {
    let utc = UtcScale::new().expect("built-in leap second history is valid");
    debug!("registry: built UTC scale");
    Arc::new(utc)
});

static GLONASS: Lazy<GlonassScale> = Lazy::new(|| {
    debug!("registry: built GLONASS scale");
    GlonassScale::new(Arc::clone(&UTC))
});

static EPOCHS: Lazy<Epochs> = Lazy::new(|| {
    let epochs = Epochs::build().expect("standard epochs are representable");
    debug!("registry: built standard epochs");
    epochs
});

pub fn tai() -> &'static ConstantOffsetScale {
    &TAI
}

pub fn utc() -> &'static UtcScale {
    &UTC
}

/// The shared UTC scale as an [`Arc`], for building derived scales.
pub fn utc_arc() -> Arc<UtcScale> {
    Arc::clone(&UTC)
}

pub fn tt() -> &'static ConstantOffsetScale {
    &TT
}

pub fn tdb() -> &'static TdbScale {
    &TDB
}

pub fn gps() -> &'static ConstantOffsetScale {
    &GPS
}

pub fn glonass() -> &'static GlonassScale {
    &GLONASS
}

/// IRNSS (NavIC) time.
pub fn irnss() -> &'static ConstantOffsetScale {
    &IRNSS
}

pub fn galileo() -> &'static ConstantOffsetScale {
    &GALILEO
}

pub fn qzss() -> &'static ConstantOffsetScale {
    &QZSS
}

pub fn beidou() -> &'static ConstantOffsetScale {
    &BEIDOU
}

/// Looks a standard scale up by name, ignoring case.
///
/// Besides the scale names, `NavIC` is accepted for IRNSS, `Galileo` for GST
/// and `BeiDou` for BDT.
pub fn scale_by_name(name: &str) -> Option<&'static dyn TimeScale> {
    let scale: &'static dyn TimeScale = match name.trim().to_ascii_uppercase().as_str() {
        "TAI" => tai(),
        "UTC" => utc(),
        "TT" => tt(),
        "TDB" => tdb(),
        "GPS" => gps(),
        "GLONASS" => glonass(),
        "IRNSS" | "NAVIC" => irnss(),
        "GST" | "GALILEO" => galileo(),
        "QZSS" => qzss(),
        "BDT" | "BEIDOU" => beidou(),
        _ => return None,
    };
    Some(scale)
}

/// The standard reference epochs as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epochs {
    /// 2000-01-01T12:00 TT.
    pub j2000: AbsoluteTime,
    /// 1900-01-01T12:00 TT.
    pub j1900: AbsoluteTime,
    /// -4712-01-01T12:00 TT, Julian Day 0.
    pub julian: AbsoluteTime,
    /// 1858-11-17T00:00 TT, Modified Julian Day 0.
    pub modified_julian: AbsoluteTime,
    /// 1950-01-01T00:00 TT.
    pub fifties: AbsoluteTime,
    /// 1958-01-01T00:00 TAI.
    pub ccsds: AbsoluteTime,
    /// 1970-01-01T00:00 UTC.
    pub unix: AbsoluteTime,
    /// 1980-01-06T00:00 UTC.
    pub gps: AbsoluteTime,
    /// 1996-01-01T00:00+03:00 UTC, which is 1995-12-31T21:00:29 TAI.
    pub glonass: AbsoluteTime,
    /// 1999-08-22T00:00 GST.
    pub galileo: AbsoluteTime,
    /// 1999-08-22T00:00 IRNSS.
    pub irnss: AbsoluteTime,
    /// 2006-01-01T00:00 BDT.
    pub beidou: AbsoluteTime,
}

impl Epochs {
    fn build() -> TimeResult<Self> {
        fn at(date: CalendarDate, time: ClockTime, scale: &dyn TimeScale) -> TimeResult<AbsoluteTime> {
            AbsoluteTime::from_components(date, time, scale)
        }
        // Midnight in Moscow, read as TAI 29 s later.
        let glonass_time =
            ClockTime::new(0, 0, FixedDuration::from_seconds(29))?.with_utc_offset(180);
        Ok(Self {
            j2000: at(CalendarDate::J2000_EPOCH, ClockTime::H12, tt())?,
            j1900: at(CalendarDate::J1900_EPOCH, ClockTime::H12, tt())?,
            julian: at(CalendarDate::JULIAN_EPOCH, ClockTime::H12, tt())?,
            modified_julian: at(CalendarDate::MODIFIED_JULIAN_EPOCH, ClockTime::H00, tt())?,
            fifties: at(CalendarDate::FIFTIES_EPOCH, ClockTime::H00, tt())?,
            ccsds: at(CalendarDate::CCSDS_EPOCH, ClockTime::H00, tai())?,
            unix: at(CalendarDate::UNIX_EPOCH, ClockTime::H00, utc())?,
            gps: at(CalendarDate::GPS_EPOCH, ClockTime::H00, gps())?,
            glonass: at(CalendarDate::GLONASS_EPOCH, glonass_time, tai())?,
            galileo: at(CalendarDate::GALILEO_EPOCH, ClockTime::H00, galileo())?,
            irnss: at(CalendarDate::IRNSS_EPOCH, ClockTime::H00, irnss())?,
            beidou: at(CalendarDate::BEIDOU_EPOCH, ClockTime::H00, beidou())?,
        })
    }
}

/// The standard epochs, built on first use.
pub fn epochs() -> &'static Epochs {
    &EPOCHS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_scale_by_name() {
        assert_eq!(scale_by_name("tai").unwrap().name(), "TAI");
        assert_eq!(scale_by_name(" Glonass ").unwrap().name(), "GLONASS");
        assert_eq!(scale_by_name("NavIC").unwrap().name(), "IRNSS");
        assert_eq!(scale_by_name("galileo").unwrap().name(), "GST");
        assert_eq!(scale_by_name("BeiDou").unwrap().name(), "BDT");
        assert!(scale_by_name("UT1").is_none());
    }

    #[test]
    fn test_epochs_agree_with_each_other() {
        let e = epochs();
        assert_eq!(e.j2000, AbsoluteTime::J2000_EPOCH);
        assert_eq!(e.galileo, e.irnss);
        // GPS and BeiDou epochs fall on UTC midnights; Galileo's does not.
        assert_eq!(
            e.galileo.format(utc()).unwrap(),
            "1999-08-21T23:59:47.000"
        );
        for epoch in [e.gps, e.beidou] {
            let local = epoch.to_local(utc()).unwrap();
            assert_eq!(local.time(), ClockTime::H00);
        }
        assert_eq!(
            e.glonass.to_local(glonass()).unwrap().date(),
            CalendarDate::GLONASS_EPOCH
        );
        assert_eq!(e.glonass.to_local(glonass()).unwrap().time(), ClockTime::H00);
        assert_eq!(
            e.modified_julian.duration_from(e.julian).unwrap(),
            FixedDuration::from_seconds(2_400_000 * 86_400 + 43_200)
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| utc() as *const UtcScale as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert!(Arc::ptr_eq(&utc_arc(), &utc_arc()));
        assert!(std::ptr::eq(glonass().utc(), utc()));
    }
}
