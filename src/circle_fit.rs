//! # Circle fitting for circular flight segments
//!
//! Airborne campaigns fly circular patterns (e.g. dropsonde circles) whose
//! center and radius characterize the segment. This module estimates both
//! from the WGS84 coordinates of the samples flown:
//!
//! - [`fit_circle`] – the deterministic core: find the center that makes the
//!   points as equidistant as possible, by minimizing the standard deviation
//!   of the center-to-point geodesic distances with Nelder–Mead.
//! - [`ransac_fit_circle`] – the robust wrapper: repeatedly fit circles
//!   through 3 random samples, keep the candidate with the most inlier
//!   support, and refit on the surviving inliers. Trial sampling uses a
//!   generator seeded per call from [`RansacParams::seed`], so results are
//!   reproducible.
//!
//! ## Selection rule
//!
//! The winning RANSAC trial is chosen by an explicit comparator: most inliers
//! first, ties broken by larger `center_lat`, then larger `center_lon`, then
//! larger `radius` (`total_cmp` ordering). The tie-break keys carry no
//! geometric meaning; they only make the selection deterministic.

use std::cmp::Ordering;

use nalgebra::SVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    Degree, Meter, DEFAULT_DISTANCE_RANGE, DEFAULT_RANSAC_SEED, DEFAULT_RANSAC_TRIALS,
};
use crate::flypast_errors::FlypastError;
use crate::geodesy;
use crate::nelder_mead::{nelder_mead, NelderMeadParams};

/// A fitted circle on the WGS84 ellipsoid.
///
/// Invariant: `radius >= 0`. The center need not lie on the input path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    /// Center latitude, degrees.
    pub center_lat: Degree,
    /// Center longitude, degrees.
    pub center_lon: Degree,
    /// Mean distance from the fitted center to the input points, meters.
    pub radius: Meter,
}

/// Configuration for [`ransac_fit_circle`], built through
/// [`RansacParams::builder`].
///
/// Fields
/// -----------------
/// * `distance_range` – inlier tolerance in meters: a point is an inlier of a
///   candidate circle when `|radius - distance_to_center| <= distance_range`.
/// * `n_trials` – number of random 3-point trials.
/// * `seed` – seed for the per-call random number generator; the default
///   keeps repeated calls on identical inputs byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RansacParams {
    pub distance_range: Meter,
    pub n_trials: usize,
    pub seed: u64,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            distance_range: DEFAULT_DISTANCE_RANGE,
            n_trials: DEFAULT_RANSAC_TRIALS,
            seed: DEFAULT_RANSAC_SEED,
        }
    }
}

impl RansacParams {
    /// Create a new [`RansacParamsBuilder`] initialized with the defaults.
    pub fn builder() -> RansacParamsBuilder {
        RansacParamsBuilder::new()
    }
}

/// Builder for [`RansacParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct RansacParamsBuilder {
    params: RansacParams,
}

impl RansacParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: RansacParams::default(),
        }
    }

    pub fn distance_range(mut self, v: Meter) -> Self {
        self.params.distance_range = v;
        self
    }

    pub fn n_trials(mut self, v: usize) -> Self {
        self.params.n_trials = v;
        self
    }

    pub fn seed(mut self, v: u64) -> Self {
        self.params.seed = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Return
    /// ----------
    /// * `Ok(RansacParams)` when `distance_range` is a positive finite number
    ///   and `n_trials >= 1`, [`FlypastError::InvalidParameter`] otherwise.
    pub fn build(self) -> Result<RansacParams, FlypastError> {
        let p = &self.params;
        if !(p.distance_range.partial_cmp(&0.0) == Some(Ordering::Greater)
            && p.distance_range.is_finite())
        {
            return Err(FlypastError::InvalidParameter(
                "distance_range must be a positive finite number of meters".into(),
            ));
        }
        if p.n_trials < 1 {
            return Err(FlypastError::InvalidParameter(
                "n_trials must be at least 1".into(),
            ));
        }
        Ok(self.params)
    }
}

/// Fit a circle through a sequence of WGS84 coordinates.
///
/// The initial center guess is the arithmetic mean of the coordinates; the
/// center is then moved by Nelder–Mead to minimize the population standard
/// deviation of the geodesic distances from center to points. The radius is
/// the mean of those distances at the fitted center.
///
/// Degenerate (e.g. collinear) inputs do not fail: when the minimizer stops
/// on its iteration cap the best center found is still returned, typically
/// far away with a correspondingly large radius.
///
/// Arguments
/// -----------------
/// * `lats`, `lons`: Sample coordinates in degrees, at least 3 of each.
///
/// Return
/// ----------
/// * The fitted [`CircleFit`], or [`FlypastError::InsufficientPoints`] /
///   [`FlypastError::LengthMismatch`].
///
/// See also
/// ------------
/// * [`ransac_fit_circle`] – Outlier-robust wrapper around this fit.
pub fn fit_circle(lats: &[Degree], lons: &[Degree]) -> Result<CircleFit, FlypastError> {
    if lons.len() != lats.len() {
        return Err(FlypastError::LengthMismatch {
            expected: lats.len(),
            got: lons.len(),
        });
    }
    if lats.len() < 3 {
        return Err(FlypastError::InsufficientPoints(lats.len()));
    }

    let n = lats.len() as f64;
    let guess = SVector::from([
        lats.iter().sum::<f64>() / n,
        lons.iter().sum::<f64>() / n,
    ]);
    let cost = |x: &SVector<f64, 2>| {
        std_dev(&geodesy::distances_to_point(lats, lons, x[0], x[1]))
    };
    let res = nelder_mead(cost, guess, &NelderMeadParams::default());

    let dists = geodesy::distances_to_point(lats, lons, res.x[0], res.x[1]);
    Ok(CircleFit {
        center_lat: res.x[0],
        center_lon: res.x[1],
        radius: mean(&dists),
    })
}

/// Robustly fit a circle with RANSAC, rejecting outliers.
///
/// Algorithm
/// -----------------
/// For each of `params.n_trials` trials, 3 distinct sample indices are drawn
/// from a [`StdRng`] seeded with `params.seed`, a circle is fitted through
/// exactly those samples, and the trial is scored by how many of *all*
/// samples lie within `params.distance_range` of the fitted radius. The
/// highest-scoring trial (see the module notes for the tie-break) defines
/// the inlier mask, and a final [`fit_circle`] over the inliers is returned.
///
/// Arguments
/// -----------------
/// * `lats`, `lons`: Sample coordinates in degrees, at least 3 of each.
/// * `params`: Trial count, inlier tolerance, and RNG seed.
///
/// Return
/// ----------
/// * The refitted [`CircleFit`], or one of
///   [`FlypastError::InsufficientPoints`], [`FlypastError::LengthMismatch`],
///   [`FlypastError::InvalidParameter`] (when `params` bypassed the builder
///   with `n_trials == 0`), or [`FlypastError::FittingFailed`] when fewer
///   than 3 points survive as inliers of the winning circle.
pub fn ransac_fit_circle(
    lats: &[Degree],
    lons: &[Degree],
    params: &RansacParams,
) -> Result<CircleFit, FlypastError> {
    if lons.len() != lats.len() {
        return Err(FlypastError::LengthMismatch {
            expected: lats.len(),
            got: lons.len(),
        });
    }
    if lats.len() < 3 {
        return Err(FlypastError::InsufficientPoints(lats.len()));
    }

    // Fresh generator per call: identical inputs give identical results.
    let mut rng = StdRng::seed_from_u64(params.seed);

    let mut best: Option<Trial> = None;
    for _ in 0..params.n_trials {
        let idxs: SmallVec<[usize; 3]> =
            rand::seq::index::sample(&mut rng, lats.len(), 3)
                .into_iter()
                .collect();
        let sample_lats: Vec<Degree> = idxs.iter().map(|&i| lats[i]).collect();
        let sample_lons: Vec<Degree> = idxs.iter().map(|&i| lons[i]).collect();
        let circle = fit_circle(&sample_lats, &sample_lons)?;

        let trial = Trial {
            score: count_inliers(lats, lons, &circle, params.distance_range),
            circle,
        };
        match &best {
            Some(incumbent) if trial.cmp_rank(incumbent) != Ordering::Greater => {}
            _ => best = Some(trial),
        }
    }
    let winner = best
        .ok_or_else(|| FlypastError::InvalidParameter("n_trials must be at least 1".into()))?;

    // Recompute the inlier mask from the winning circle and refit on the
    // surviving points only.
    let dists = geodesy::distances_to_point(
        lats,
        lons,
        winner.circle.center_lat,
        winner.circle.center_lon,
    );
    let (inlier_lats, inlier_lons): (Vec<Degree>, Vec<Degree>) = lats
        .iter()
        .zip(lons)
        .zip(&dists)
        .filter(|&((_, _), &d)| (winner.circle.radius - d).abs() <= params.distance_range)
        .map(|((&lat, &lon), _)| (lat, lon))
        .unzip();
    if inlier_lats.len() < 3 {
        return Err(FlypastError::FittingFailed(inlier_lats.len()));
    }
    fit_circle(&inlier_lats, &inlier_lons)
}

/// One scored RANSAC trial.
#[derive(Debug, Clone, Copy)]
struct Trial {
    score: usize,
    circle: CircleFit,
}

impl Trial {
    /// Explicit ranking: inlier count first, then the deterministic
    /// `(center_lat, center_lon, radius)` tie-break under `total_cmp`.
    fn cmp_rank(&self, other: &Trial) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.circle.center_lat.total_cmp(&other.circle.center_lat))
            .then(self.circle.center_lon.total_cmp(&other.circle.center_lon))
            .then(self.circle.radius.total_cmp(&other.circle.radius))
    }
}

fn count_inliers(
    lats: &[Degree],
    lons: &[Degree],
    circle: &CircleFit,
    distance_range: Meter,
) -> usize {
    geodesy::distances_to_point(lats, lons, circle.center_lat, circle.center_lon)
        .iter()
        .filter(|&&d| (circle.radius - d).abs() <= distance_range)
        .count()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (the equidistance cost of a candidate
/// center).
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64).sqrt()
}
