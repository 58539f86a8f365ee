//! # WGS84 geodesic primitives
//!
//! Thin wrapper around the external ellipsoidal geodesic solver
//! (`geographiclib-rs`). The rest of the crate only ever needs three
//! capabilities:
//!
//! - the **inverse** problem (two positions → azimuths and distance),
//! - the **direct** problem (position, azimuth, distance → position),
//! - a **broadcast** helper computing distances from a coordinate array to a
//!   single target, used by the overpass finders and the circle fitters.
//!
//! All angles are in degrees, all distances in meters, on the WGS84
//! ellipsoid. Nothing here reimplements geodesy; accuracy and convergence are
//! delegated to the solver.

use std::sync::LazyLock;

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

use crate::constants::{Degree, Meter};

/// Shared WGS84 ellipsoid model, built once.
static WGS84: LazyLock<Geodesic> = LazyLock::new(Geodesic::wgs84);

/// Solve the inverse geodesic problem between two positions.
///
/// Arguments
/// -----------------
/// * `lat1`, `lon1`: First position, in degrees.
/// * `lat2`, `lon2`: Second position, in degrees.
///
/// Return
/// ----------
/// * `(azi1, azi2, distance)` – forward azimuth at the first position, back
///   azimuth at the second position (both degrees), and the geodesic distance
///   in meters.
pub fn inverse(
    lat1: Degree,
    lon1: Degree,
    lat2: Degree,
    lon2: Degree,
) -> (Degree, Degree, Meter) {
    let (s12, azi1, azi2, _a12): (f64, f64, f64, f64) = WGS84.inverse(lat1, lon1, lat2, lon2);
    (azi1, azi2, s12)
}

/// Geodesic distance in meters between two positions.
#[inline]
pub fn distance(lat1: Degree, lon1: Degree, lat2: Degree, lon2: Degree) -> Meter {
    WGS84.inverse(lat1, lon1, lat2, lon2)
}

/// Solve the direct geodesic problem from a position along an azimuth.
///
/// Arguments
/// -----------------
/// * `lat`, `lon`: Start position, in degrees.
/// * `azimuth`: Forward azimuth at the start position, in degrees.
/// * `distance`: Distance to travel along the geodesic, in meters.
///
/// Return
/// ----------
/// * `(lat, lon)` – the destination position, in degrees.
pub fn direct(lat: Degree, lon: Degree, azimuth: Degree, distance: Meter) -> (Degree, Degree) {
    let (lat2, lon2, _azi2): (f64, f64, f64) = WGS84.direct(lat, lon, azimuth, distance);
    (lat2, lon2)
}

/// Geodesic distance from every point of a coordinate array to one target.
///
/// This is the broadcast form used by the overpass finders (track samples
/// against a fixed target) and the circle fitters (path samples against a
/// candidate center). The two slices must have the same length; that
/// invariant is enforced by the callers, which validate their inputs before
/// reaching this point.
///
/// Arguments
/// -----------------
/// * `lats`, `lons`: Coordinate arrays, in degrees.
/// * `target_lat`, `target_lon`: Target position, in degrees.
///
/// Return
/// ----------
/// * One distance in meters per input point, in input order.
pub fn distances_to_point(
    lats: &[Degree],
    lons: &[Degree],
    target_lat: Degree,
    target_lon: Degree,
) -> Vec<Meter> {
    lats.iter()
        .zip(lons)
        .map(|(&lat, &lon)| distance(lat, lon, target_lat, target_lon))
        .collect()
}
