//! # Takeoff and landing detection
//!
//! Detects takeoff and landing epochs from a track's altitude time series
//! against caller-supplied thresholds: takeoff is the first sample strictly
//! above the takeoff threshold, landing the last sample strictly above the
//! landing threshold. Thresholds are typically the departure and arrival
//! airport elevations above the WGS84 ellipsoid plus a margin; separate
//! values accommodate flights between airports at different elevations.

use hifitime::{Duration, Epoch};

use crate::constants::Meter;
use crate::flypast_errors::FlypastError;
use crate::track::Track;

/// The airborne portion of a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightWindow {
    /// First epoch with altitude above the takeoff threshold.
    pub takeoff: Epoch,
    /// Last epoch with altitude above the landing threshold.
    pub landing: Epoch,
    /// `landing - takeoff`.
    pub duration: Duration,
}

/// Detect takeoff and landing from the altitude channel.
///
/// Arguments
/// -----------------
/// * `track`: A track carrying altitudes (see [`Track::with_altitude`]).
/// * `takeoff_alt`: Altitude threshold in meters for the takeoff airport.
/// * `landing_alt`: Altitude threshold in meters for the landing airport.
///
/// Return
/// ----------
/// * The detected [`FlightWindow`], or [`FlypastError::MissingAltitude`] /
///   [`FlypastError::NeverAirborne`] when the track has no altitude channel
///   or never exceeds a threshold.
pub fn takeoff_landing(
    track: &Track,
    takeoff_alt: Meter,
    landing_alt: Meter,
) -> Result<FlightWindow, FlypastError> {
    let alts = track.alts().ok_or(FlypastError::MissingAltitude)?;

    let takeoff_idx = alts
        .iter()
        .position(|&a| a > takeoff_alt)
        .ok_or(FlypastError::NeverAirborne(takeoff_alt))?;
    let landing_idx = alts
        .iter()
        .rposition(|&a| a > landing_alt)
        .ok_or(FlypastError::NeverAirborne(landing_alt))?;

    let takeoff = track.times()[takeoff_idx];
    let landing = track.times()[landing_idx];
    Ok(FlightWindow {
        takeoff,
        landing,
        duration: landing - takeoff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifitime::{Duration, Epoch};

    fn flight(alts: Vec<f64>) -> Track {
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 9, 7);
        let n = alts.len();
        let times = (0..n)
            .map(|i| t0 + Duration::from_seconds(60.0 * i as f64))
            .collect();
        Track::with_altitude(times, vec![13.0; n], vec![-59.0; n], alts).unwrap()
    }

    #[test]
    fn detects_airborne_window() {
        // Parked, climb, cruise, descent, parked.
        let track = flight(vec![9.0, 9.0, 500.0, 9000.0, 400.0, 8.0, 8.0]);
        let win = takeoff_landing(&track, 90.0, 90.0).unwrap();
        assert_eq!(win.takeoff, track.times()[2]);
        assert_eq!(win.landing, track.times()[4]);
        assert_eq!(win.duration, Duration::from_seconds(120.0));
    }

    #[test]
    fn asymmetric_thresholds() {
        let track = flight(vec![50.0, 120.0, 9000.0, 60.0, 5.0]);
        // Takeoff airport higher than landing airport.
        let win = takeoff_landing(&track, 100.0, 10.0).unwrap();
        assert_eq!(win.takeoff, track.times()[1]);
        assert_eq!(win.landing, track.times()[3]);
    }

    #[test]
    fn errors_without_altitude_channel() {
        let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 9, 7);
        let track = Track::new(
            vec![t0, t0 + Duration::from_seconds(60.0)],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        )
        .unwrap();
        assert_eq!(
            takeoff_landing(&track, 90.0, 90.0).unwrap_err(),
            FlypastError::MissingAltitude
        );
    }

    #[test]
    fn errors_when_never_airborne() {
        let track = flight(vec![9.0, 10.0, 9.0]);
        assert_eq!(
            takeoff_landing(&track, 90.0, 90.0).unwrap_err(),
            FlypastError::NeverAirborne(90.0)
        );
    }
}
