use serde::{Deserialize, Serialize};

/// Squared bailout radius: an orbit with `|z|² > 4` has escaped.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Outcome of escape-time iteration for one sample point.
///
/// `iterations == max_iterations` marks a point that never escaped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscapeResult {
    pub iterations: u32,
    pub smoothed: f64,
}

impl EscapeResult {
    /// Result for a point that exhausted the budget.
    pub fn interior(max_iterations: u32) -> Self {
        Self {
            iterations: max_iterations,
            smoothed: max_iterations as f64,
        }
    }

    /// Result for an orbit that escaped at step `iteration` with `|z|² = norm_sq`.
    pub fn escaped(iteration: u32, norm_sq: f64) -> Self {
        Self {
            iterations: iteration,
            smoothed: smooth_iteration(iteration, norm_sq),
        }
    }

    pub fn is_interior(&self, max_iterations: u32) -> bool {
        self.iterations == max_iterations
    }
}

/// Continuous escape value `i + 1 - log2(log2|z|)`.
pub fn smooth_iteration(iteration: u32, norm_sq: f64) -> f64 {
    let ln2 = std::f64::consts::LN_2;
    let log_zn = norm_sq.ln() / 2.0;
    let nu = (log_zn / ln2).ln() / ln2;
    iteration as f64 + 1.0 - nu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_reports_full_budget() {
        let r = EscapeResult::interior(200);
        assert_eq!(r.iterations, 200);
        assert_eq!(r.smoothed, 200.0);
        assert!(r.is_interior(200));
    }

    #[test]
    fn zero_budget_interior_is_all_zero() {
        let r = EscapeResult::interior(0);
        assert_eq!(r, EscapeResult { iterations: 0, smoothed: 0.0 });
    }

    #[test]
    fn smoothing_stays_below_next_integer() {
        // Any escaped orbit has |z|² > 4, so nu > 0
        for &norm_sq in &[4.0001, 6.25, 16.0, 1e6] {
            let s = smooth_iteration(3, norm_sq);
            assert!(s < 4.0, "norm_sq {norm_sq} gave {s}");
            assert!(s >= 0.0);
        }
    }

    #[test]
    fn smoothing_at_radius_two_is_next_integer() {
        // |z| = 2 -> log2(log2 2) = 0
        assert!((smooth_iteration(5, 4.0) - 6.0).abs() < 1e-12);
    }
}
