//! Exact arithmetic building blocks for celestial time keeping.
//!
//! `celestial-core` provides the leaf pieces the time kernel is built on: a
//! fixed-point duration with attosecond resolution, the calendar and clock
//! constants that tie day counts to Julian Day numbering, and the shared error
//! type. It has no notion of calendars or time scales itself; those live in
//! `celestial-time`.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`duration`] | [`FixedDuration`]: seconds + attoseconds, exact add/multiply/divide |
//! | [`constants`] | J2000/MJD origins, seconds per day, attosecond scale |
//! | [`math`] | `libm` wrappers and floor division helpers |
//! | [`errors`] | [`AstroError`] and [`AstroResult`] |
//!
//! # Re-exports
//!
//! ```
//! use celestial_core::{AstroError, AstroResult, FixedDuration, MathErrorKind};
//! ```
//!
//! # Design Notes
//!
//! - **No floating point on the timeline**: durations are integer pairs. `f64`
//!   appears only at the edges (`from_f64`, `to_f64`) and in periodic
//!   corrections such as TDB.
//!
//! - **Checked by default**: arithmetic returns [`AstroResult`]. The operator
//!   impls on [`FixedDuration`] panic on overflow like the integer operators do.

pub mod constants;
pub mod duration;
pub mod errors;
pub mod math;

pub use duration::FixedDuration;
pub use errors::{AstroError, AstroResult, MathErrorKind};
