mod fast;
mod precise;

pub use fast::FastEvaluator;
pub use precise::PreciseEvaluator;

use brotscope_core::EscapeResult;

/// Escape-time iteration `z <- z² + c` from `z = 0` under one numeric regime.
///
/// Implementations differ only in the scalar type. A budget of zero yields an
/// immediate interior result with `smoothed = 0`.
pub trait EscapeTimeEvaluator {
    type Scalar;

    fn evaluate(&self, cx: &Self::Scalar, cy: &Self::Scalar, max_iterations: u32) -> EscapeResult;
}
