//! Working precision for the high-precision renderer.
//!
//! Precision is chosen in decimal digits (what the host exposes) and converted
//! to mantissa bits for [`BigFloat`](crate::BigFloat).

use crate::config::EXPLORER_CONFIG;
use crate::{PreciseViewport, ViewportState};
use serde::{Deserialize, Serialize};

/// Safety margin for rounding errors in arithmetic operations.
const SAFETY_BITS: f64 = 32.0;

/// Digits are offered in steps of this size.
const DIGIT_STEP: u32 = 8;

/// Decimal working precision, fixed for the duration of a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionConfig {
    pub digits: u32,
}

impl PrecisionConfig {
    /// Clamp `digits` into the configured range.
    pub fn new(digits: u32) -> Self {
        Self {
            digits: digits.clamp(
                EXPLORER_CONFIG.min_precision_digits,
                EXPLORER_CONFIG.max_precision_digits,
            ),
        }
    }

    /// Mantissa bits carrying `digits` decimal digits: `ceil(digits * log2 10)`.
    pub fn precision_bits(&self) -> usize {
        (self.digits as f64 * std::f64::consts::LOG2_10).ceil() as usize
    }
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self::new(EXPLORER_CONFIG.default_precision_digits)
    }
}

/// Suggest a digit count able to resolve adjacent pixels of `viewport`.
///
/// Accounts for the coordinate magnitude, the pixel spacing, and error growth
/// over `max_iterations`. Rounded up to the digit step and clamped to the
/// configured range.
pub fn recommended_digits(viewport: &PreciseViewport, width: u32) -> u32 {
    let scale = viewport.scale();
    let pixels = width.max(2) as f64;

    // log2 of the pixel spacing
    let log2_delta = scale.log2_approx() - (pixels - 1.0).log2();

    // Largest coordinate magnitude on screen, one extra bit for the sum
    let log2_half_span = scale.log2_approx() - 1.0;
    let log2_cx = viewport.center_x.abs().log2_approx();
    let log2_cy = viewport.center_y.abs().log2_approx();
    let log2_m = log2_cx.max(log2_cy).max(log2_half_span) + 1.0;

    let bits_from_ratio = (log2_m - log2_delta).ceil().max(0.0);
    let iter_bits = if viewport.max_iterations > 1 {
        (viewport.max_iterations as f64).log2().ceil()
    } else {
        0.0
    };

    let bits = bits_from_ratio + iter_bits + SAFETY_BITS;
    let digits = (bits / std::f64::consts::LOG2_10).ceil() as u32;
    let stepped = digits.div_ceil(DIGIT_STEP) * DIGIT_STEP;

    PrecisionConfig::new(stepped).digits
}

/// Whether f32 samples of adjacent pixels can no longer be told apart.
///
/// The shader works in single precision; once the pixel spacing drops below
/// one f32 ulp of the largest on-screen coordinate the image degrades into
/// blocks and the high-precision renderer should take over.
pub fn gpu_precision_exhausted(viewport: &ViewportState, width: u32) -> bool {
    let scale = viewport.scale();
    let step = scale / (width.max(2) - 1) as f64;
    let magnitude = viewport.center_x.abs().max(viewport.center_y.abs()) + scale / 2.0;
    let ulp = magnitude * f32::EPSILON as f64;
    step <= ulp
}
