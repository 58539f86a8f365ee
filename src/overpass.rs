//! # Closest-approach ("overpass") finders
//!
//! Given a platform track and a reference — either a fixed ground target or a
//! second time-indexed track such as a satellite ground track — these
//! routines find the time and geodesic distance of closest approach.
//!
//! ## Overview
//!
//! - [`point_overpass`] – one track against a fixed target: plain argmin over
//!   the per-sample distances, no interpolation. Resolution is bounded by the
//!   sample spacing.
//! - [`track_overpass`] – two tracks: a coarse grid search over the shared
//!   timestamps followed, under [`RefineMode::CoarseThenRefine`], by a
//!   continuous Nelder–Mead refinement of the sub-sample time offset.
//!
//! The coarse search exists to land near the global minimum so the local
//! refinement cannot lock onto a wrong valley; the refinement recovers the
//! precision a purely discrete search cannot. If the refinement fails to
//! converge, the coarse estimate is returned instead — a degradation, never a
//! silent optimizer error.

use hifitime::{Duration, Epoch};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter};
use crate::flypast_errors::FlypastError;
use crate::geodesy;
use crate::nelder_mead::{nelder_mead, NelderMeadParams};
use crate::track::Track;

/// A closest-approach event.
///
/// Invariants: `distance >= 0`; `time` lies within the overlap window of the
/// two tracks (track case) or within the track span (point case).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overpass {
    /// Minimal geodesic distance found, in meters.
    pub distance: Meter,
    /// Epoch at which the minimum occurs.
    pub time: Epoch,
}

/// Search strategy for [`track_overpass`].
///
/// Both modes are legitimate operating points with different precision/cost
/// tradeoffs, so the choice is an explicit argument rather than a boolean
/// toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefineMode {
    /// Discrete argmin over the shared timestamps only; resolution is
    /// bounded by the coarser track's sampling interval.
    CoarseOnly,
    /// Discrete argmin followed by continuous sub-sample refinement.
    CoarseThenRefine,
}

/// Find the closest approach of a track to a fixed target position.
///
/// Computes the geodesic distance from every sample to the target and takes
/// the argmin; the first sample wins on exact ties. There is no interpolation
/// or refinement — the result resolution is bounded by the sample spacing.
///
/// Arguments
/// -----------------
/// * `track`: The platform track.
/// * `target_lat`, `target_lon`: Target position in degrees.
///
/// Return
/// ----------
/// * The [`Overpass`] at the closest sample, or [`FlypastError::EmptyTrack`].
///
/// See also
/// ------------
/// * [`track_overpass`] – Closest approach between two moving tracks.
pub fn point_overpass(
    track: &Track,
    target_lat: Degree,
    target_lon: Degree,
) -> Result<Overpass, FlypastError> {
    let dists = geodesy::distances_to_point(track.lats(), track.lons(), target_lat, target_lon);
    let (i, d) = argmin(&dists).ok_or(FlypastError::EmptyTrack)?;
    Ok(Overpass {
        distance: d,
        time: track.times()[i],
    })
}

/// Find the closest approach between two time-indexed tracks.
///
/// Algorithm
/// -----------------
/// 1. Restrict `a` to `b`'s time span; an empty restriction means the tracks
///    never coexist and yields [`FlypastError::EmptyOverlap`].
/// 2. Resample `b` onto the restricted timestamps by linear interpolation
///    and take the argmin of the per-timestamp geodesic distances — the
///    coarse estimate `(dist0, t0)`.
/// 3. Under [`RefineMode::CoarseThenRefine`], minimize
///    `cost(Δt) = distance(a(t0 + Δt), b(t0 + Δt))` over the time offset in
///    seconds, starting from `Δt = 0`. Evaluation epochs are clamped to the
///    overlap window, so the reported time always lies inside it. If the
///    minimizer does not converge, the coarse estimate is returned.
///
/// Arguments
/// -----------------
/// * `a`: The platform track (its timestamps drive the coarse grid).
/// * `b`: The reference track (resampled onto `a`'s timestamps).
/// * `mode`: Coarse-only or coarse-plus-refine.
///
/// Return
/// ----------
/// * The closest-approach [`Overpass`], or [`FlypastError::EmptyTrack`] /
///   [`FlypastError::EmptyOverlap`].
pub fn track_overpass(
    a: &Track,
    b: &Track,
    mode: RefineMode,
) -> Result<Overpass, FlypastError> {
    let (a_start, a_end) = a.span().ok_or(FlypastError::EmptyTrack)?;
    let (b_start, b_end) = b.span().ok_or(FlypastError::EmptyTrack)?;

    let shared = a.window(b_start, b_end);
    if shared.is_empty() {
        return Err(FlypastError::EmptyOverlap);
    }

    // Coarse grid search over the shared timestamps.
    let mut best_i = 0;
    let mut best_d = f64::INFINITY;
    for (i, &t) in shared.times().iter().enumerate() {
        let Some((b_lat, b_lon)) = b.position_at(t) else {
            continue;
        };
        let d = geodesy::distance(shared.lats()[i], shared.lons()[i], b_lat, b_lon);
        if d < best_d {
            best_d = d;
            best_i = i;
        }
    }
    let t0 = shared.times()[best_i];
    let coarse = Overpass {
        distance: best_d,
        time: t0,
    };
    if mode == RefineMode::CoarseOnly {
        return Ok(coarse);
    }

    // Continuous refinement of the time offset, expressed in seconds from t0
    // to keep the search well-conditioned. Epochs are clamped to the overlap
    // window, which both tracks fully cover.
    let w_start = if a_start > b_start { a_start } else { b_start };
    let w_end = if a_end < b_end { a_end } else { b_end };
    let clamp_to_window = |t: Epoch| {
        if t < w_start {
            w_start
        } else if t > w_end {
            w_end
        } else {
            t
        }
    };
    let cost = |x: &SVector<f64, 1>| {
        let t = clamp_to_window(t0 + Duration::from_seconds(x[0]));
        match (a.position_at(t), b.position_at(t)) {
            (Some((a_lat, a_lon)), Some((b_lat, b_lon))) => {
                geodesy::distance(a_lat, a_lon, b_lat, b_lon)
            }
            _ => f64::INFINITY,
        }
    };

    // Seed the simplex with roughly one sample interval so the bracket
    // reaches the neighboring grid points.
    let step = if shared.len() > 1 {
        let span = (shared.times()[shared.len() - 1] - shared.times()[0]).to_seconds();
        (span / (shared.len() - 1) as f64).max(1e-3)
    } else {
        1.0
    };
    let params = NelderMeadParams {
        x_tol: 1e-4,
        f_tol: 1e-6,
        zero_step: step,
        ..NelderMeadParams::default()
    };
    let res = nelder_mead(cost, SVector::from([0.0]), &params);

    // Fallback policy: a refinement that did not converge, or somehow ended
    // above the coarse estimate, is discarded in favor of the grid result.
    if !res.converged || res.fx > coarse.distance {
        return Ok(coarse);
    }
    Ok(Overpass {
        distance: res.fx,
        time: clamp_to_window(t0 + Duration::from_seconds(res.x[0])),
    })
}

/// Index and value of the smallest element; `None` on an empty slice.
/// The first occurrence wins on ties.
fn argmin(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
