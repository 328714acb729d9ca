use super::EscapeTimeEvaluator;
use brotscope_core::{EscapeResult, ESCAPE_RADIUS_SQ, EXPLORER_CONFIG};

/// Escape-time evaluator using f64 arithmetic.
///
/// Suitable while adjacent pixels stay separable in native floats. The loop
/// never runs past `cap` steps, whatever the caller asks for; a point that
/// survives the capped loop is reported as interior for the caller's budget.
#[derive(Clone, Copy, Debug)]
pub struct FastEvaluator {
    cap: u32,
}

impl FastEvaluator {
    pub fn new() -> Self {
        Self::with_cap(EXPLORER_CONFIG.fast_iteration_cap)
    }

    pub fn with_cap(cap: u32) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Iterate the orbit of `(cx, cy)`.
    pub fn compute_point(&self, cx: f64, cy: f64, max_iterations: u32) -> EscapeResult {
        let budget = max_iterations.min(self.cap);
        let mut zx = 0.0_f64;
        let mut zy = 0.0_f64;

        for i in 0..budget {
            // z = z^2 + c
            let new_zx = zx * zx - zy * zy + cx;
            let new_zy = 2.0 * zx * zy + cy;
            zx = new_zx;
            zy = new_zy;

            let norm_sq = zx * zx + zy * zy;
            if norm_sq > ESCAPE_RADIUS_SQ {
                return EscapeResult::escaped(i, norm_sq);
            }
        }

        EscapeResult::interior(max_iterations)
    }
}

impl Default for FastEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl EscapeTimeEvaluator for FastEvaluator {
    type Scalar = f64;

    fn evaluate(&self, cx: &f64, cy: &f64, max_iterations: u32) -> EscapeResult {
        self.compute_point(*cx, *cy, max_iterations)
    }
}
