//! # flypast
//!
//! Analysis helpers for airborne field-campaign data: closest-approach
//! ("overpass") events between a platform track and satellite/ship tracks or
//! fixed ground targets, takeoff/landing detection from altitude time
//! series, and robust RANSAC circle fitting of circular flight segments.
//!
//! ## Overview
//!
//! - [`overpass`] – point and track closest-approach finders (coarse grid
//!   search plus optional continuous refinement),
//! - [`circle_fit`] – deterministic and RANSAC circle fitting on the WGS84
//!   ellipsoid,
//! - [`flight_phase`] – takeoff/landing detection from altitude thresholds,
//! - [`track`] – the time-indexed [`Track`] value type,
//! - [`geodesy`] – the WGS84 geodesic primitives backing everything above,
//! - [`nelder_mead`] – the shared derivative-free minimizer.
//!
//! Every computation is synchronous, pure and in-memory; random sampling in
//! the RANSAC fitter is seeded per call, so identical inputs always yield
//! identical results.
//!
//! ## Example
//!
//! ```rust
//! use flypast::{point_overpass, Track};
//! use hifitime::{Duration, Epoch};
//!
//! # fn main() -> Result<(), flypast::FlypastError> {
//! let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
//! let times = (0..3).map(|i| t0 + Duration::from_seconds(60.0 * i as f64)).collect();
//! let track = Track::new(times, vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 2.0])?;
//!
//! let event = point_overpass(&track, 0.0, 1.0)?;
//! assert!(event.distance < 1.0);
//! # Ok(()) }
//! ```

pub mod circle_fit;
pub mod constants;
pub mod flight_phase;
pub mod flypast_errors;
pub mod geodesy;
pub mod nelder_mead;
pub mod overpass;
pub mod track;

pub use circle_fit::{fit_circle, ransac_fit_circle, CircleFit, RansacParams};
pub use flight_phase::{takeoff_landing, FlightWindow};
pub use flypast_errors::FlypastError;
pub use overpass::{point_overpass, track_overpass, Overpass, RefineMode};
pub use track::Track;
