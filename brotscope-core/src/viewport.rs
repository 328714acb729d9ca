use crate::config::{EXPLORER_CONFIG, VIEW_SPAN, ZOOM_MAX, ZOOM_MIN};
use crate::BigFloat;
use serde::{Deserialize, Serialize};

/// Clamp a zoom value into `[ZOOM_MIN, ZOOM_MAX]`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Viewport of the real-time renderer.
///
/// The visible window is `VIEW_SPAN / zoom` wide and tall, centered on
/// `(center_x, center_y)`. `zoom` stays within `[ZOOM_MIN, ZOOM_MAX]`; past
/// the upper bound f32 samples of adjacent pixels start to collide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub max_iterations: u32,
}

impl ViewportState {
    /// Create a viewport, clamping `zoom` into the supported range.
    pub fn new(center_x: f64, center_y: f64, zoom: f64, max_iterations: u32) -> Self {
        Self {
            center_x,
            center_y,
            zoom: clamp_zoom(zoom),
            max_iterations,
        }
    }

    /// Set zoom, clamped into `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Width (and height) of the visible window in the complex plane.
    pub fn scale(&self) -> f64 {
        VIEW_SPAN / self.zoom
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(
            -0.5,
            0.0,
            EXPLORER_CONFIG.default_zoom,
            EXPLORER_CONFIG.gpu_default_iterations,
        )
    }
}

/// Viewport of the high-precision renderer.
///
/// Same framing as [`ViewportState`] but with arbitrary-precision center and
/// zoom, so zoom may grow far past `ZOOM_MAX`. Only the lower bound applies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreciseViewport {
    pub center_x: BigFloat,
    pub center_y: BigFloat,
    pub zoom: BigFloat,
    pub max_iterations: u32,
}

impl PreciseViewport {
    /// Create a precise viewport from string coordinates.
    ///
    /// Returns an error if any field fails to parse or zoom is not positive.
    pub fn from_strings(
        center_x: &str,
        center_y: &str,
        zoom: &str,
        max_iterations: u32,
        precision_bits: usize,
    ) -> Result<Self, String> {
        let zoom = BigFloat::from_string(zoom, precision_bits)?;
        if zoom <= BigFloat::zero(precision_bits) {
            return Err(format!("Zoom must be positive, got {}", zoom));
        }
        Ok(Self {
            center_x: BigFloat::from_string(center_x, precision_bits)?,
            center_y: BigFloat::from_string(center_y, precision_bits)?,
            zoom: Self::clamp_zoom_below(zoom),
            max_iterations,
        })
    }

    /// Lift a real-time viewport into arbitrary precision (renderer handoff).
    pub fn from_state(state: &ViewportState, precision_bits: usize) -> Self {
        Self {
            center_x: BigFloat::with_precision(state.center_x, precision_bits),
            center_y: BigFloat::with_precision(state.center_y, precision_bits),
            zoom: BigFloat::with_precision(state.zoom, precision_bits),
            max_iterations: state.max_iterations,
        }
    }

    /// Default high-precision view at the given precision.
    pub fn default_with_precision(precision_bits: usize) -> Self {
        let (cx, cy) = EXPLORER_CONFIG.default_center;
        Self {
            center_x: BigFloat::from_string(cx, precision_bits)
                .unwrap_or_else(|_| BigFloat::with_precision(-0.5, precision_bits)),
            center_y: BigFloat::from_string(cy, precision_bits)
                .unwrap_or_else(|_| BigFloat::zero(precision_bits)),
            zoom: BigFloat::with_precision(EXPLORER_CONFIG.default_zoom, precision_bits),
            max_iterations: EXPLORER_CONFIG.cpu_default_iterations,
        }
    }

    /// Re-round every coordinate to `precision_bits`.
    pub fn with_precision(&self, precision_bits: usize) -> Self {
        Self {
            center_x: self.center_x.to_precision(precision_bits),
            center_y: self.center_y.to_precision(precision_bits),
            zoom: self.zoom.to_precision(precision_bits),
            max_iterations: self.max_iterations,
        }
    }

    /// Approximate this view in f64, clamping zoom into the real-time range.
    pub fn to_state(&self) -> ViewportState {
        ViewportState::new(
            self.center_x.to_f64(),
            self.center_y.to_f64(),
            self.zoom.to_f64(),
            self.max_iterations,
        )
    }

    /// Precision of the center coordinates.
    pub fn precision_bits(&self) -> usize {
        self.center_x.precision_bits()
    }

    /// Width (and height) of the visible window in the complex plane.
    pub fn scale(&self) -> BigFloat {
        BigFloat::with_precision(VIEW_SPAN, self.zoom.precision_bits()).div(&self.zoom)
    }

    fn clamp_zoom_below(zoom: BigFloat) -> BigFloat {
        let min = BigFloat::with_precision(ZOOM_MIN, zoom.precision_bits());
        if zoom < min {
            min
        } else {
            zoom
        }
    }
}

/// Viewport mutations driven by the interaction controller.
///
/// Anchors and pan deltas are in normalized surface units: `(0, 0)` is the
/// top-left corner, `(1, 1)` the bottom-right one.
pub trait ViewportControl {
    /// Multiply zoom by `factor` (clamped). When `anchor` is given, the complex
    /// point under it stays under it.
    fn zoom_by(&mut self, factor: f64, anchor: Option<(f64, f64)>);

    /// Move the center by `(du, dv)` visible spans.
    fn pan_by(&mut self, du: f64, dv: f64);

    /// Restore the default view.
    fn reset(&mut self);
}

impl ViewportControl for ViewportState {
    fn zoom_by(&mut self, factor: f64, anchor: Option<(f64, f64)>) {
        let new_zoom = clamp_zoom(self.zoom * factor);

        if let Some((px, py)) = anchor {
            let scale = VIEW_SPAN / self.zoom;
            let cx = self.center_x + (px - 0.5) * scale;
            let cy = self.center_y + (py - 0.5) * scale;
            let new_scale = VIEW_SPAN / new_zoom;
            self.center_x = cx - (px - 0.5) * new_scale;
            self.center_y = cy - (py - 0.5) * new_scale;
        }

        self.zoom = new_zoom;
    }

    fn pan_by(&mut self, du: f64, dv: f64) {
        let scale = self.scale();
        self.center_x += du * scale;
        self.center_y += dv * scale;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ViewportControl for PreciseViewport {
    fn zoom_by(&mut self, factor: f64, anchor: Option<(f64, f64)>) {
        let new_zoom = Self::clamp_zoom_below(self.zoom.mul_f64(factor));

        if let Some((px, py)) = anchor {
            let precision = self.precision_bits();
            let half = BigFloat::with_precision(0.5, precision);
            let offset_x = BigFloat::with_precision(px, precision).sub(&half);
            let offset_y = BigFloat::with_precision(py, precision).sub(&half);

            let scale = self.scale();
            let cx = self.center_x.add(&offset_x.mul(&scale));
            let cy = self.center_y.add(&offset_y.mul(&scale));

            let new_scale = BigFloat::with_precision(VIEW_SPAN, new_zoom.precision_bits())
                .div(&new_zoom);
            self.center_x = cx.sub(&offset_x.mul(&new_scale));
            self.center_y = cy.sub(&offset_y.mul(&new_scale));
        }

        self.zoom = new_zoom;
    }

    fn pan_by(&mut self, du: f64, dv: f64) {
        let scale = self.scale();
        self.center_x = self.center_x.add(&scale.mul_f64(du));
        self.center_y = self.center_y.add(&scale.mul_f64(dv));
    }

    fn reset(&mut self) {
        *self = Self::default_with_precision(self.precision_bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // ViewportState
    // ============================================================================

    #[test]
    fn default_state_matches_classical_framing() {
        let vp = ViewportState::default();
        assert_eq!(vp.center_x, -0.5);
        assert_eq!(vp.center_y, 0.0);
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.max_iterations, 200);
        assert_eq!(vp.scale(), 3.0);
    }

    #[test]
    fn new_clamps_zoom_into_range() {
        assert_eq!(ViewportState::new(0.0, 0.0, 1e9, 100).zoom, ZOOM_MAX);
        assert_eq!(ViewportState::new(0.0, 0.0, 1e-9, 100).zoom, ZOOM_MIN);
    }

    #[test]
    fn zoom_by_clamps_at_both_ends() {
        let mut vp = ViewportState::new(0.0, 0.0, 80_000.0, 100);
        vp.zoom_by(1.15, Some((0.2, 0.7)));
        assert_eq!(vp.zoom, ZOOM_MAX);

        let mut vp = ViewportState::new(0.0, 0.0, 0.011, 100);
        vp.zoom_by(1.0 / 1.15, None);
        assert_eq!(vp.zoom, ZOOM_MIN);
    }

    #[test]
    fn zoom_by_without_anchor_keeps_center() {
        let mut vp = ViewportState::default();
        vp.zoom_by(2.0, None);
        assert_eq!(vp.center_x, -0.5);
        assert_eq!(vp.center_y, 0.0);
        assert_eq!(vp.zoom, 2.0);
    }

    #[test]
    fn zoom_by_at_surface_center_keeps_center() {
        let mut vp = ViewportState::default();
        vp.zoom_by(1.15, Some((0.5, 0.5)));
        assert_eq!(vp.center_x, -0.5);
        assert_eq!(vp.center_y, 0.0);
    }

    #[test]
    fn pan_by_moves_by_visible_spans() {
        let mut vp = ViewportState::new(0.0, 0.0, 2.0, 100);
        vp.pan_by(0.5, -0.25);
        assert!((vp.center_x - 0.75).abs() < 1e-12);
        assert!((vp.center_y + 0.375).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_default() {
        let mut vp = ViewportState::new(1.0, 1.0, 500.0, 900);
        vp.reset();
        assert_eq!(vp, ViewportState::default());
    }

    #[test]
    fn state_serialization_roundtrip() {
        let vp = ViewportState::new(-0.75, 0.1, 42.0, 300);
        let json = serde_json::to_string(&vp).unwrap();
        let restored: ViewportState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vp);
    }

    // ============================================================================
    // PreciseViewport
    // ============================================================================

    #[test]
    fn from_strings_parses_deep_coordinates() {
        let vp = PreciseViewport::from_strings(
            "-0.743643887037158704752191506114774",
            "0.131825904205311970493132056385139",
            "1e40",
            1000,
            256,
        )
        .unwrap();

        assert_eq!(vp.precision_bits(), 256);
        assert!(vp.zoom > BigFloat::with_precision(ZOOM_MAX, 256));
        assert_eq!(vp.max_iterations, 1000);
    }

    #[test]
    fn from_strings_rejects_garbage_and_non_positive_zoom() {
        assert!(PreciseViewport::from_strings("x", "0", "1", 100, 256).is_err());
        assert!(PreciseViewport::from_strings("0", "0", "0", 100, 256).is_err());
        assert!(PreciseViewport::from_strings("0", "0", "-3", 100, 256).is_err());
    }

    #[test]
    fn from_strings_clamps_zoom_from_below_only() {
        let vp = PreciseViewport::from_strings("0", "0", "0.0001", 100, 128).unwrap();
        assert_eq!(vp.zoom.to_f64(), ZOOM_MIN);
    }

    #[test]
    fn from_state_preserves_values() {
        let state = ViewportState::new(-0.75, 0.125, 64.0, 321);
        let vp = PreciseViewport::from_state(&state, 256);
        assert_eq!(vp.center_x.to_f64(), -0.75);
        assert_eq!(vp.center_y.to_f64(), 0.125);
        assert_eq!(vp.zoom.to_f64(), 64.0);
        assert_eq!(vp.max_iterations, 321);
        assert_eq!(vp.to_state(), state);
    }

    #[test]
    fn precise_zoom_is_unbounded_above() {
        let mut vp = PreciseViewport::from_state(&ViewportState::default(), 256);
        for _ in 0..200 {
            vp.zoom_by(1.15, None);
        }
        assert!(vp.zoom > BigFloat::with_precision(ZOOM_MAX, 256));
    }

    #[test]
    fn precise_zoom_by_anchor_matches_f64_controller() {
        let state = ViewportState::new(-0.5, 0.0, 1.0, 200);
        let mut fast = state;
        let mut precise = PreciseViewport::from_state(&state, 256);

        fast.zoom_by(1.15, Some((0.25, 0.8)));
        precise.zoom_by(1.15, Some((0.25, 0.8)));

        assert!((precise.center_x.to_f64() - fast.center_x).abs() < 1e-12);
        assert!((precise.center_y.to_f64() - fast.center_y).abs() < 1e-12);
        assert!((precise.zoom.to_f64() - fast.zoom).abs() < 1e-12);
    }

    #[test]
    fn precise_reset_keeps_precision() {
        let mut vp = PreciseViewport::from_strings("0.3", "0.1", "1e30", 900, 512).unwrap();
        vp.reset();
        assert_eq!(vp.precision_bits(), 512);
        assert_eq!(vp.center_x.to_f64(), -0.5);
        assert_eq!(vp.max_iterations, 400);
    }
}
