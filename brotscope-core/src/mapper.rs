//! Pixel to complex-plane projection.
//!
//! Both renderers use the same framing: pixel `(x, y)` maps to
//! `center + (u - 0.5, v - 0.5) * VIEW_SPAN / zoom` with `u = x / (width - 1)`
//! and `v = y / (height - 1)`.

use crate::config::VIEW_SPAN;
use crate::{BigFloat, PreciseViewport, ViewportState};

/// Complex coordinate sampled for one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub cx: f64,
    pub cy: f64,
}

/// Normalized position of `coord` along an axis of `size` pixels.
///
/// Edge pixels map to exactly 0 and 1. A single-pixel axis has no extent and
/// samples the center.
pub fn normalized(coord: u32, size: u32) -> f64 {
    if size <= 1 {
        0.5
    } else {
        coord as f64 / (size - 1) as f64
    }
}

/// Project pixel `(x, y)` of a `width` x `height` surface.
pub fn pixel_to_complex(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    viewport: &ViewportState,
) -> SamplePoint {
    let scale = VIEW_SPAN / viewport.zoom;
    let u = normalized(x, width);
    let v = normalized(y, height);

    SamplePoint {
        cx: viewport.center_x + (u - 0.5) * scale,
        cy: viewport.center_y + (v - 0.5) * scale,
    }
}

/// Arbitrary-precision projection for one surface size.
///
/// The scale and per-axis step are computed once, so a pass pays for a
/// single division up front and only multiply-adds per pixel.
#[derive(Clone, Debug)]
pub struct PreciseProjection {
    center_x: BigFloat,
    center_y: BigFloat,
    scale: BigFloat,
    half: BigFloat,
    width: u32,
    height: u32,
    precision_bits: usize,
}

impl PreciseProjection {
    pub fn new(viewport: &PreciseViewport, width: u32, height: u32, precision_bits: usize) -> Self {
        let viewport = viewport.with_precision(precision_bits);
        let scale = viewport.scale();
        Self {
            center_x: viewport.center_x,
            center_y: viewport.center_y,
            scale,
            half: BigFloat::with_precision(0.5, precision_bits),
            width,
            height,
            precision_bits,
        }
    }

    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Complex coordinate of pixel `(x, y)`.
    pub fn project(&self, x: u32, y: u32) -> (BigFloat, BigFloat) {
        let u = self.axis_offset(x, self.width);
        let v = self.axis_offset(y, self.height);
        (
            self.center_x.add(&u.mul(&self.scale)),
            self.center_y.add(&v.mul(&self.scale)),
        )
    }

    /// `coord / (size - 1) - 0.5`, in working precision.
    fn axis_offset(&self, coord: u32, size: u32) -> BigFloat {
        if size <= 1 {
            return BigFloat::zero(self.precision_bits);
        }
        let numerator = BigFloat::with_precision(coord as f64, self.precision_bits);
        let denominator = BigFloat::with_precision((size - 1) as f64, self.precision_bits);
        numerator.div(&denominator).sub(&self.half)
    }
}

/// Project a single pixel at arbitrary precision.
///
/// Passes over many pixels should build a [`PreciseProjection`] once instead.
pub fn pixel_to_complex_precise(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    viewport: &PreciseViewport,
) -> (BigFloat, BigFloat) {
    PreciseProjection::new(viewport, width, height, viewport.precision_bits()).project(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_covers_edges() {
        assert_eq!(normalized(0, 800), 0.0);
        assert_eq!(normalized(799, 800), 1.0);
        assert_eq!(normalized(0, 1), 0.5);
        assert_eq!(normalized(0, 0), 0.5);
    }

    #[test]
    fn corners_span_the_visible_window() {
        let vp = ViewportState::default();
        let top_left = pixel_to_complex(0, 0, 101, 101, &vp);
        let bottom_right = pixel_to_complex(100, 100, 101, 101, &vp);

        assert_eq!(top_left, SamplePoint { cx: -2.0, cy: -1.5 });
        assert_eq!(bottom_right, SamplePoint { cx: 1.0, cy: 1.5 });
    }

    #[test]
    fn odd_surface_center_maps_to_viewport_center() {
        let vp = ViewportState::new(0.25, -0.125, 7.0, 100);
        let p = pixel_to_complex(50, 50, 101, 101, &vp);
        assert_eq!(p.cx, 0.25);
        assert_eq!(p.cy, -0.125);
    }

    #[test]
    fn single_pixel_surface_samples_center() {
        let vp = ViewportState::new(-1.0, 0.5, 3.0, 100);
        let p = pixel_to_complex(0, 0, 1, 1, &vp);
        assert_eq!(p, SamplePoint { cx: -1.0, cy: 0.5 });
    }

    #[test]
    fn precise_projection_agrees_with_f64_at_shallow_zoom() {
        let state = ViewportState::new(-0.75, 0.1, 4.0, 100);
        let precise = PreciseViewport::from_state(&state, 256);
        let projection = PreciseProjection::new(&precise, 640, 480, 256);

        for &(x, y) in &[(0, 0), (639, 479), (123, 321), (320, 240)] {
            let fast = pixel_to_complex(x, y, 640, 480, &state);
            let (cx, cy) = projection.project(x, y);
            assert!((cx.to_f64() - fast.cx).abs() < 1e-14, "x at ({x}, {y})");
            assert!((cy.to_f64() - fast.cy).abs() < 1e-14, "y at ({x}, {y})");
        }
    }

    #[test]
    fn precise_projection_separates_pixels_beyond_f64() {
        let vp = PreciseViewport::from_strings("-0.75", "0.1", "1e30", 100, 256).unwrap();
        let projection = PreciseProjection::new(&vp, 800, 600, 256);

        let (a, _) = projection.project(400, 300);
        let (b, _) = projection.project(401, 300);

        assert!(b > a);
        // Both collapse to the same f64
        assert_eq!(a.to_f64(), b.to_f64());
    }

    #[test]
    fn single_pixel_helper_matches_projection() {
        let vp = PreciseViewport::from_strings("0.3", "-0.2", "12", 100, 128).unwrap();
        let projection = PreciseProjection::new(&vp, 64, 64, 128);
        assert_eq!(
            pixel_to_complex_precise(5, 60, 64, 64, &vp),
            projection.project(5, 60)
        );
    }
}
