use super::EscapeTimeEvaluator;
use brotscope_core::{BigFloat, EscapeResult, PrecisionConfig, ESCAPE_RADIUS_SQ};

/// Escape-time evaluator in arbitrary precision.
///
/// Every orbit step runs at the configured working precision. There is no cap
/// beyond the caller's budget. Smoothing only needs `|z|²` at escape, which is
/// small, so it is taken in f64.
#[derive(Clone, Debug)]
pub struct PreciseEvaluator {
    precision: PrecisionConfig,
    precision_bits: usize,
    two: BigFloat,
    escape_radius_sq: BigFloat,
}

impl PreciseEvaluator {
    pub fn new(precision: PrecisionConfig) -> Self {
        let precision_bits = precision.precision_bits();
        Self {
            precision,
            precision_bits,
            two: BigFloat::with_precision(2.0, precision_bits),
            escape_radius_sq: BigFloat::with_precision(ESCAPE_RADIUS_SQ, precision_bits),
        }
    }

    pub fn precision(&self) -> PrecisionConfig {
        self.precision
    }

    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Iterate the orbit of `(cx, cy)`, rounded to working precision first.
    pub fn compute_point(&self, cx: &BigFloat, cy: &BigFloat, max_iterations: u32) -> EscapeResult {
        let cx = cx.to_precision(self.precision_bits);
        let cy = cy.to_precision(self.precision_bits);

        let mut x = BigFloat::zero(self.precision_bits);
        let mut y = BigFloat::zero(self.precision_bits);
        let mut x_sq = BigFloat::zero(self.precision_bits);
        let mut y_sq = BigFloat::zero(self.precision_bits);

        for i in 0..max_iterations {
            // z = z^2 + c
            let new_x = x_sq.sub(&y_sq).add(&cx);
            let new_y = self.two.mul(&x).mul(&y).add(&cy);
            x = new_x;
            y = new_y;

            // Squares are reused by the next step
            x_sq = x.square();
            y_sq = y.square();
            let norm_sq = x_sq.add(&y_sq);
            if norm_sq > self.escape_radius_sq {
                return EscapeResult::escaped(i, norm_sq.to_f64());
            }
        }

        EscapeResult::interior(max_iterations)
    }
}

impl Default for PreciseEvaluator {
    fn default() -> Self {
        Self::new(PrecisionConfig::default())
    }
}

impl EscapeTimeEvaluator for PreciseEvaluator {
    type Scalar = BigFloat;

    fn evaluate(&self, cx: &BigFloat, cy: &BigFloat, max_iterations: u32) -> EscapeResult {
        self.compute_point(cx, cy, max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FastEvaluator;

    fn big(s: &str) -> BigFloat {
        BigFloat::from_string(s, 256).unwrap()
    }

    #[test]
    fn origin_is_in_set() {
        let result = PreciseEvaluator::default().compute_point(&big("0"), &big("0"), 200);
        assert_eq!(result, EscapeResult::interior(200));
    }

    #[test]
    fn zero_budget_is_immediate_interior() {
        let result = PreciseEvaluator::default().compute_point(&big("5"), &big("5"), 0);
        assert_eq!(result, EscapeResult { iterations: 0, smoothed: 0.0 });
    }

    #[test]
    fn agrees_with_fast_path_at_shallow_zoom() {
        let precise = PreciseEvaluator::new(PrecisionConfig::new(32));
        let fast = FastEvaluator::new();

        for &(cx, cy) in &[(-2.0, -1.5), (0.3, 0.5), (-0.75, 0.1), (0.26, 0.0), (-1.5, 0.01)] {
            let a = fast.compute_point(cx, cy, 400);
            let b = precise.compute_point(
                &BigFloat::with_precision(cx, 256),
                &BigFloat::with_precision(cy, 256),
                400,
            );
            assert_eq!(a.iterations, b.iterations, "at ({cx}, {cy})");
            assert!((a.smoothed - b.smoothed).abs() < 1e-6, "at ({cx}, {cy})");
        }
    }

    #[test]
    fn has_no_iteration_cap() {
        // Needs more than the fast path's 1000-step cap to escape
        let cx = big("0.250001");
        let result = PreciseEvaluator::default().compute_point(&cx, &big("0"), 5000);
        assert!(result.iterations > 1000);
        assert!(!result.is_interior(5000));
    }

    #[test]
    fn resolves_points_that_collide_in_f64() {
        // Just left of the set's tip; rounds to exactly -2 in f64
        let evaluator = PreciseEvaluator::new(PrecisionConfig::new(48));
        let cx = big("-2.000000000000000000000000000001");
        let zero = big("0");
        assert_eq!(cx.to_f64(), -2.0);

        let collapsed = FastEvaluator::new().compute_point(cx.to_f64(), 0.0, 300);
        assert!(collapsed.is_interior(300));

        let resolved = evaluator.compute_point(&cx, &zero, 300);
        assert_eq!(resolved.iterations, 0);
        assert_eq!(evaluator.compute_point(&big("-2"), &zero, 300), collapsed);
    }

    #[test]
    fn precision_comes_from_config() {
        let evaluator = PreciseEvaluator::new(PrecisionConfig::new(100));
        assert_eq!(evaluator.precision_bits(), 333);
        assert_eq!(evaluator.precision().digits, 100);
    }
}
