//! # Time-indexed position tracks
//!
//! This module defines [`Track`], the value type shared by the overpass
//! finders and the flight-phase detector: an ordered sequence of
//! `(Epoch, latitude, longitude[, altitude])` samples, strictly increasing in
//! time, immutable once constructed.
//!
//! ## Overview
//!
//! - Construction with validation ([`Track::new`], [`Track::with_altitude`])
//! - Time-window restriction ([`Track::window`])
//! - Linear time interpolation of the position, extrapolation-free
//!   ([`Track::position_at`]) or clamped to the span
//!   ([`Track::position_clamped`])
//!
//! Interpolation is linear in latitude and longitude independently. This
//! matches the resolution model of the overpass search and is adequate for
//! the short (seconds to minutes) brackets it is applied to; tracks crossing
//! the antimeridian are not handled specially.

use hifitime::Epoch;
use itertools::Itertools;

use crate::constants::{Degree, Meter};
use crate::flypast_errors::FlypastError;

/// An ordered trajectory of timestamped positions.
///
/// Samples are stored as column vectors: one `Vec` per channel, all of the
/// same length, with timestamps strictly increasing. The altitude channel is
/// optional and only required by flight-phase detection.
///
/// Fields are private; a `Track` is immutable once built and all access goes
/// through the slice accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    times: Vec<Epoch>,
    lats: Vec<Degree>,
    lons: Vec<Degree>,
    alts: Option<Vec<Meter>>,
}

impl Track {
    /// Build a track from timestamps and coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `times`: Sample epochs, strictly increasing.
    /// * `lats`, `lons`: Coordinates in degrees, one entry per epoch.
    ///
    /// Return
    /// ----------
    /// * The validated track, or [`FlypastError::LengthMismatch`] /
    ///   [`FlypastError::NonMonotonicTime`] on inconsistent input.
    pub fn new(
        times: Vec<Epoch>,
        lats: Vec<Degree>,
        lons: Vec<Degree>,
    ) -> Result<Self, FlypastError> {
        Self::validate(&times, &lats, &lons)?;
        Ok(Self {
            times,
            lats,
            lons,
            alts: None,
        })
    }

    /// Build a track that also carries an altitude channel (meters above the
    /// WGS84 ellipsoid), as needed by
    /// [`takeoff_landing`](crate::flight_phase::takeoff_landing).
    pub fn with_altitude(
        times: Vec<Epoch>,
        lats: Vec<Degree>,
        lons: Vec<Degree>,
        alts: Vec<Meter>,
    ) -> Result<Self, FlypastError> {
        Self::validate(&times, &lats, &lons)?;
        if alts.len() != times.len() {
            return Err(FlypastError::LengthMismatch {
                expected: times.len(),
                got: alts.len(),
            });
        }
        Ok(Self {
            times,
            lats,
            lons,
            alts: Some(alts),
        })
    }

    fn validate(
        times: &[Epoch],
        lats: &[Degree],
        lons: &[Degree],
    ) -> Result<(), FlypastError> {
        if lats.len() != times.len() {
            return Err(FlypastError::LengthMismatch {
                expected: times.len(),
                got: lats.len(),
            });
        }
        if lons.len() != times.len() {
            return Err(FlypastError::LengthMismatch {
                expected: times.len(),
                got: lons.len(),
            });
        }
        if !times.iter().tuple_windows().all(|(a, b)| a < b) {
            return Err(FlypastError::NonMonotonicTime);
        }
        Ok(())
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the track holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample epochs.
    #[inline]
    pub fn times(&self) -> &[Epoch] {
        &self.times
    }

    /// Latitudes in degrees.
    #[inline]
    pub fn lats(&self) -> &[Degree] {
        &self.lats
    }

    /// Longitudes in degrees.
    #[inline]
    pub fn lons(&self) -> &[Degree] {
        &self.lons
    }

    /// Altitudes in meters, when the track carries them.
    #[inline]
    pub fn alts(&self) -> Option<&[Meter]> {
        self.alts.as_deref()
    }

    /// First and last epoch of the track, or `None` when empty.
    pub fn span(&self) -> Option<(Epoch, Epoch)> {
        Some((*self.times.first()?, *self.times.last()?))
    }

    /// Restrict the track to the samples with `start <= t <= end`.
    ///
    /// The restriction may be empty when the window does not intersect the
    /// track span; callers decide whether that is an error (the track
    /// overpass finder maps it to [`FlypastError::EmptyOverlap`]).
    pub fn window(&self, start: Epoch, end: Epoch) -> Track {
        let lo = self.times.partition_point(|&t| t < start);
        let hi = self.times.partition_point(|&t| t <= end);
        Track {
            times: self.times[lo..hi].to_vec(),
            lats: self.lats[lo..hi].to_vec(),
            lons: self.lons[lo..hi].to_vec(),
            alts: self.alts.as_ref().map(|a| a[lo..hi].to_vec()),
        }
    }

    /// Linearly interpolate the position at epoch `t`.
    ///
    /// Interpolation is restricted to the track span: `t` outside
    /// `[first, last]` (and any query on an empty track) yields `None`
    /// rather than an extrapolated position. A `t` exactly on a sample
    /// returns that sample's coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `t`: Query epoch.
    ///
    /// Return
    /// ----------
    /// * `Some((lat, lon))` in degrees, or `None` outside the span.
    pub fn position_at(&self, t: Epoch) -> Option<(Degree, Degree)> {
        let (first, last) = self.span()?;
        if t < first || t > last {
            return None;
        }
        let hi = self.times.partition_point(|&x| x <= t);
        if hi == self.times.len() {
            // t == last epoch
            return Some((self.lats[hi - 1], self.lons[hi - 1]));
        }
        let lo = hi - 1;
        let dt = (self.times[hi] - self.times[lo]).to_seconds();
        let w = (t - self.times[lo]).to_seconds() / dt;
        Some((
            self.lats[lo] + w * (self.lats[hi] - self.lats[lo]),
            self.lons[lo] + w * (self.lons[hi] - self.lons[lo]),
        ))
    }

    /// Like [`position_at`](Track::position_at), but with `t` clamped to the
    /// track span instead of failing outside it. Still `None` on an empty
    /// track.
    pub fn position_clamped(&self, t: Epoch) -> Option<(Degree, Degree)> {
        let (first, last) = self.span()?;
        let t = if t < first {
            first
        } else if t > last {
            last
        } else {
            t
        };
        self.position_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::{Duration, Epoch};

    fn epochs(offsets: &[f64]) -> Vec<Epoch> {
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
        offsets
            .iter()
            .map(|&s| t0 + Duration::from_seconds(s))
            .collect()
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Track::new(epochs(&[0.0, 10.0]), vec![0.0], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(err, FlypastError::LengthMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn rejects_non_monotonic_time() {
        let err = Track::new(
            epochs(&[0.0, 10.0, 10.0]),
            vec![0.0; 3],
            vec![0.0; 3],
        )
        .unwrap_err();
        assert_eq!(err, FlypastError::NonMonotonicTime);
    }

    #[test]
    fn interpolates_between_samples() {
        let track = Track::new(
            epochs(&[0.0, 100.0]),
            vec![0.0, 2.0],
            vec![10.0, 12.0],
        )
        .unwrap();
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
        let (lat, lon) = track
            .position_at(t0 + Duration::from_seconds(25.0))
            .unwrap();
        assert_relative_eq!(lat, 0.5, epsilon = 1e-12);
        assert_relative_eq!(lon, 10.5, epsilon = 1e-12);
    }

    #[test]
    fn interpolation_hits_samples_exactly() {
        let track = Track::new(
            epochs(&[0.0, 60.0, 120.0]),
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        )
        .unwrap();
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
        assert_eq!(track.position_at(t0), Some((1.0, 4.0)));
        assert_eq!(
            track.position_at(t0 + Duration::from_seconds(120.0)),
            Some((3.0, 6.0))
        );
    }

    #[test]
    fn no_extrapolation_outside_span() {
        let track = Track::new(epochs(&[0.0, 60.0]), vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
        assert_eq!(track.position_at(t0 - Duration::from_seconds(1.0)), None);
        assert_eq!(track.position_at(t0 + Duration::from_seconds(61.0)), None);
        // Clamped variant sticks to the endpoints instead.
        assert_eq!(
            track.position_clamped(t0 + Duration::from_seconds(61.0)),
            Some((1.0, 1.0))
        );
    }

    #[test]
    fn window_keeps_inclusive_bounds() {
        let track = Track::new(
            epochs(&[0.0, 60.0, 120.0, 180.0]),
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0; 4],
        )
        .unwrap();
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 8, 10);
        let win = track.window(
            t0 + Duration::from_seconds(60.0),
            t0 + Duration::from_seconds(120.0),
        );
        assert_eq!(win.len(), 2);
        assert_eq!(win.lats(), &[1.0, 2.0]);

        let empty = track.window(
            t0 + Duration::from_seconds(200.0),
            t0 + Duration::from_seconds(300.0),
        );
        assert!(empty.is_empty());
    }
}
