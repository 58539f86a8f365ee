//! # Derivative-free simplex minimization
//!
//! A compact Nelder–Mead implementation over `N`-dimensional parameter
//! spaces, used by the track overpass refinement (`N = 1`, time offset in
//! seconds) and the circle fitter (`N = 2`, center latitude/longitude).
//!
//! ## Overview
//!
//! The minimizer maintains a simplex of `N + 1` vertices and iteratively
//! reshapes it through the classical reflection / expansion / contraction /
//! shrink moves until both the function spread and the coordinate spread of
//! the simplex fall below the configured tolerances, or the iteration cap is
//! reached. It never fails: the best vertex found so far is always returned,
//! together with a `converged` flag that callers map to their own fallback
//! policy.
//!
//! The cost surfaces in this crate are smooth and low-dimensional, so the
//! default coefficients (reflection 1, expansion 2, contraction 0.5,
//! shrink 0.5) are used without adaptive scaling.

use nalgebra::SVector;

/// Tuning parameters for [`nelder_mead`].
///
/// Fields
/// -----------------
/// * `max_iter` – iteration cap; reaching it clears the `converged` flag.
/// * `x_tol` – convergence threshold on the maximum coordinate deviation
///   between the best vertex and every other vertex.
/// * `f_tol` – convergence threshold on the maximum cost deviation between
///   the best vertex and every other vertex. Both thresholds must hold.
/// * `init_step` – relative perturbation applied to each nonzero coordinate
///   of the initial guess to build the starting simplex.
/// * `zero_step` – absolute perturbation used instead when a coordinate of
///   the initial guess is exactly zero.
#[derive(Debug, Clone)]
pub struct NelderMeadParams {
    pub max_iter: usize,
    pub x_tol: f64,
    pub f_tol: f64,
    pub init_step: f64,
    pub zero_step: f64,
}

impl Default for NelderMeadParams {
    fn default() -> Self {
        Self {
            max_iter: 500,
            x_tol: 1e-8,
            f_tol: 1e-6,
            init_step: 0.05,
            zero_step: 2.5e-4,
        }
    }
}

/// Outcome of a [`nelder_mead`] run.
///
/// `x` and `fx` always describe the best vertex seen, whether or not the
/// tolerances were met within the iteration cap.
#[derive(Debug, Clone)]
pub struct MinimizeResult<const N: usize> {
    pub x: SVector<f64, N>,
    pub fx: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimize `f` from `x0` with the Nelder–Mead direct search.
///
/// Arguments
/// -----------------
/// * `f`: Cost function; must return finite values on the region the simplex
///   can reach (callers penalize out-of-domain points themselves).
/// * `x0`: Initial guess.
/// * `params`: Convergence tolerances and simplex initialization steps.
///
/// Return
/// ----------
/// * A [`MinimizeResult`] holding the best vertex, its cost, the number of
///   iterations spent, and whether both tolerances were satisfied.
pub fn nelder_mead<const N: usize, F>(
    mut f: F,
    x0: SVector<f64, N>,
    params: &NelderMeadParams,
) -> MinimizeResult<N>
where
    F: FnMut(&SVector<f64, N>) -> f64,
{
    const REFLECT: f64 = 1.0;
    const EXPAND: f64 = 2.0;
    const CONTRACT: f64 = 0.5;
    const SHRINK: f64 = 0.5;

    let fx0 = f(&x0);
    let mut simplex: Vec<(SVector<f64, N>, f64)> = Vec::with_capacity(N + 1);
    simplex.push((x0, fx0));
    for i in 0..N {
        let mut xi = x0;
        if xi[i] == 0.0 {
            xi[i] = params.zero_step;
        } else {
            xi[i] *= 1.0 + params.init_step;
        }
        let fxi = f(&xi);
        simplex.push((xi, fxi));
    }

    let mut iterations = 0;
    loop {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (x_best, f_best) = simplex[0];

        let mut x_spread: f64 = 0.0;
        let mut f_spread: f64 = 0.0;
        for (x, fx) in &simplex[1..] {
            x_spread = x_spread.max((x - x_best).amax());
            f_spread = f_spread.max((fx - f_best).abs());
        }
        if x_spread <= params.x_tol && f_spread <= params.f_tol {
            return MinimizeResult {
                x: x_best,
                fx: f_best,
                iterations,
                converged: true,
            };
        }
        if iterations >= params.max_iter {
            return MinimizeResult {
                x: x_best,
                fx: f_best,
                iterations,
                converged: false,
            };
        }
        iterations += 1;

        // Centroid of all vertices but the worst.
        let mut centroid = SVector::<f64, N>::zeros();
        for (x, _) in &simplex[..N] {
            centroid += x;
        }
        centroid /= N as f64;
        let (x_worst, f_worst) = simplex[N];

        let x_refl = centroid + REFLECT * (centroid - x_worst);
        let f_refl = f(&x_refl);

        if f_refl < simplex[0].1 {
            let x_exp = centroid + EXPAND * (centroid - x_worst);
            let f_exp = f(&x_exp);
            simplex[N] = if f_exp < f_refl {
                (x_exp, f_exp)
            } else {
                (x_refl, f_refl)
            };
        } else if f_refl < simplex[N - 1].1 {
            simplex[N] = (x_refl, f_refl);
        } else {
            // Outside contraction when the reflection improved on the worst
            // vertex, inside contraction otherwise.
            let x_con = if f_refl < f_worst {
                centroid + CONTRACT * (centroid - x_worst)
            } else {
                centroid - CONTRACT * (centroid - x_worst)
            };
            let f_con = f(&x_con);
            if f_con < f_refl.min(f_worst) {
                simplex[N] = (x_con, f_con);
            } else {
                let x_anchor = simplex[0].0;
                for vertex in simplex.iter_mut().skip(1) {
                    vertex.0 = x_anchor + SHRINK * (vertex.0 - x_anchor);
                    vertex.1 = f(&vertex.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::SVector;

    #[test]
    fn minimizes_shifted_parabola_1d() {
        let res = nelder_mead(
            |x: &SVector<f64, 1>| (x[0] - 3.0) * (x[0] - 3.0),
            SVector::from([0.0]),
            &NelderMeadParams::default(),
        );
        assert!(res.converged);
        assert_abs_diff_eq!(res.x[0], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn minimizes_quadratic_bowl_2d() {
        let res = nelder_mead(
            |x: &SVector<f64, 2>| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 4.0).powi(2),
            SVector::from([10.0, 10.0]),
            &NelderMeadParams::default(),
        );
        assert!(res.converged);
        assert_abs_diff_eq!(res.x[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(res.x[1], -4.0, epsilon = 1e-5);
    }

    #[test]
    fn handles_v_shaped_cost() {
        // Non-smooth at the minimum, as the overpass refinement cost is.
        let res = nelder_mead(
            |x: &SVector<f64, 1>| (x[0] - 0.5).abs(),
            SVector::from([0.0]),
            &NelderMeadParams {
                x_tol: 1e-6,
                f_tol: 1e-8,
                ..NelderMeadParams::default()
            },
        );
        assert!(res.converged);
        assert_abs_diff_eq!(res.x[0], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn reports_nonconvergence_at_iteration_cap() {
        let res = nelder_mead(
            |x: &SVector<f64, 2>| x[0].powi(2) + x[1].powi(2),
            SVector::from([100.0, 100.0]),
            &NelderMeadParams {
                max_iter: 3,
                ..NelderMeadParams::default()
            },
        );
        assert!(!res.converged);
        assert_eq!(res.iterations, 3);
    }
}
