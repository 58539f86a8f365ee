//! # Constants and type definitions for flypast
//!
//! This module centralizes the **unit type aliases** and **default
//! configuration values** used throughout the `flypast` library.
//!
//! ## Overview
//!
//! - Unit-documenting type aliases (`Degree`, `Meter`, `Seconds`)
//! - Default RANSAC configuration (trial count, inlier tolerance, RNG seed)
//!
//! These definitions are used by the overpass finders and the circle fitters.

/// Angle in degrees
pub type Degree = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration in seconds
pub type Seconds = f64;

/// Default inlier tolerance for RANSAC circle fitting, in meters.
///
/// A sample counts as an inlier of a candidate circle when the absolute
/// difference between the circle radius and the sample's distance to the
/// circle center is at most this value.
pub const DEFAULT_DISTANCE_RANGE: Meter = 1_000.0;

/// Default number of RANSAC trials per fit.
pub const DEFAULT_RANSAC_TRIALS: usize = 100;

/// Default seed for the per-call RANSAC random number generator.
///
/// The generator is re-created from this seed on every call, so repeated
/// calls on identical inputs are reproducible. Callers needing a different
/// sampling sequence set their own seed through
/// [`RansacParams`](crate::circle_fit::RansacParams).
pub const DEFAULT_RANSAC_SEED: u64 = 12345;
