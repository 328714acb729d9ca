//! Gesture handling for pan, zoom-toward-pointer and pinch zoom.
//!
//! The controller owns only transient gesture state (last drag position,
//! last pinch distance). Every accepted gesture is applied straight to a
//! [`ViewportControl`] implementor.

use crate::config::EXPLORER_CONFIG;
use crate::ViewportControl;

/// A position on the display surface, in surface pixels from the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &SurfacePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Input events delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// Scroll at `at`; negative `delta_y` zooms in.
    Wheel { delta_y: f64, at: SurfacePoint },
    PointerDown(SurfacePoint),
    PointerMove(SurfacePoint),
    PointerUp,
    TouchStart(Vec<SurfacePoint>),
    TouchMove(Vec<SurfacePoint>),
    TouchEnd,
}

/// Translates gestures into viewport updates.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    drag_from: Option<SurfacePoint>,
    pinch_distance: Option<f64>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Apply `gesture` on a `width` x `height` surface.
    ///
    /// Returns `true` if the viewport changed.
    pub fn handle<V: ViewportControl>(
        &mut self,
        gesture: &Gesture,
        width: f64,
        height: f64,
        viewport: &mut V,
    ) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }

        match gesture {
            Gesture::Wheel { delta_y, at } => {
                if *delta_y == 0.0 {
                    return false;
                }
                let factor = if *delta_y < 0.0 {
                    EXPLORER_CONFIG.wheel_zoom_factor
                } else {
                    1.0 / EXPLORER_CONFIG.wheel_zoom_factor
                };
                viewport.zoom_by(factor, Some((at.x / width, at.y / height)));
                true
            }
            Gesture::PointerDown(at) => {
                self.drag_from = Some(*at);
                false
            }
            Gesture::PointerMove(at) => self.drag_to(*at, width, height, viewport),
            Gesture::PointerUp | Gesture::TouchEnd => {
                self.drag_from = None;
                self.pinch_distance = None;
                false
            }
            Gesture::TouchStart(touches) => {
                match touches.as_slice() {
                    [single] => {
                        self.drag_from = Some(*single);
                        self.pinch_distance = None;
                    }
                    [a, b, ..] => {
                        self.drag_from = None;
                        self.pinch_distance = Some(a.distance(b));
                    }
                    [] => {}
                }
                false
            }
            Gesture::TouchMove(touches) => match touches.as_slice() {
                [single] => self.drag_to(*single, width, height, viewport),
                [a, b, ..] => self.pinch_to(a.distance(b), viewport),
                [] => false,
            },
        }
    }

    /// Clear gesture state and restore the default view.
    pub fn reset<V: ViewportControl>(&mut self, viewport: &mut V) {
        self.drag_from = None;
        self.pinch_distance = None;
        viewport.reset();
    }

    fn drag_to<V: ViewportControl>(
        &mut self,
        at: SurfacePoint,
        width: f64,
        height: f64,
        viewport: &mut V,
    ) -> bool {
        let Some(from) = self.drag_from.replace(at) else {
            return false;
        };
        let dx = at.x - from.x;
        let dy = at.y - from.y;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        viewport.pan_by(-dx / width, dy / height);
        true
    }

    fn pinch_to<V: ViewportControl>(&mut self, distance: f64, viewport: &mut V) -> bool {
        let previous = self.pinch_distance.replace(distance);
        match previous {
            Some(previous) if previous > 0.0 && distance > 0.0 && previous != distance => {
                viewport.zoom_by(distance / previous, None);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> SurfacePoint {
        SurfacePoint::new(x, y)
    }
    use crate::config::{ZOOM_MAX, ZOOM_MIN};
    use crate::mapper::pixel_to_complex;
    use crate::{PreciseViewport, ViewportState};

    fn wheel(delta_y: f64, x: f64, y: f64) -> Gesture {
        Gesture::Wheel {
            delta_y,
            at: pt(x, y),
        }
    }

    // ============================================================================
    // Wheel
    // ============================================================================

    #[test]
    fn wheel_up_zooms_in_by_factor() {
        let mut vp = ViewportState::default();
        let mut ctl = InteractionController::new();
        assert!(ctl.handle(&wheel(-100.0, 400.0, 300.0), 800.0, 600.0, &mut vp));
        assert!((vp.zoom - 1.15).abs() < 1e-12);

        assert!(ctl.handle(&wheel(100.0, 400.0, 300.0), 800.0, 600.0, &mut vp));
        assert!((vp.zoom - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wheel_without_delta_is_ignored() {
        let mut vp = ViewportState::default();
        let mut ctl = InteractionController::new();
        assert!(!ctl.handle(&wheel(0.0, 10.0, 10.0), 800.0, 600.0, &mut vp));
        assert_eq!(vp, ViewportState::default());
    }

    #[test]
    fn wheel_keeps_point_under_cursor_fixed() {
        let (w, h) = (801u32, 601u32);
        let (px, py) = (200u32, 450u32);
        let mut vp = ViewportState::new(-0.6, 0.2, 3.7, 200);
        let mut ctl = InteractionController::new();

        let before = pixel_to_complex(px, py, w, h, &vp);
        // Surface position whose normalized coordinate is exactly px/(w-1)
        let at_x = px as f64 / (w - 1) as f64 * w as f64;
        let at_y = py as f64 / (h - 1) as f64 * h as f64;

        for _ in 0..5 {
            ctl.handle(&wheel(-1.0, at_x, at_y), w as f64, h as f64, &mut vp);
        }
        let after = pixel_to_complex(px, py, w, h, &vp);

        assert!((before.cx - after.cx).abs() < 1e-12);
        assert!((before.cy - after.cy).abs() < 1e-12);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut ctl = InteractionController::new();

        let mut vp = ViewportState::new(0.0, 0.0, ZOOM_MAX, 200);
        ctl.handle(&wheel(-1.0, 5.0, 5.0), 10.0, 10.0, &mut vp);
        assert_eq!(vp.zoom, ZOOM_MAX);

        let mut vp = ViewportState::new(0.0, 0.0, ZOOM_MIN, 200);
        ctl.handle(&wheel(1.0, 5.0, 5.0), 10.0, 10.0, &mut vp);
        assert_eq!(vp.zoom, ZOOM_MIN);
    }

    // ============================================================================
    // Drag
    // ============================================================================

    #[test]
    fn drag_translates_against_motion_horizontally() {
        let mut vp = ViewportState::new(0.0, 0.0, 1.0, 200);
        let mut ctl = InteractionController::new();

        ctl.handle(&Gesture::PointerDown(pt(100.0, 100.0)), 300.0, 300.0, &mut vp);
        assert!(ctl.is_dragging());
        assert!(ctl.handle(&Gesture::PointerMove(pt(130.0, 70.0)), 300.0, 300.0, &mut vp));

        // (-dx/w, dy/h) * 3/zoom = (-0.1, -0.1) * 3
        assert!((vp.center_x + 0.3).abs() < 1e-12);
        assert!((vp.center_y + 0.3).abs() < 1e-12);
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut vp = ViewportState::default();
        let mut ctl = InteractionController::new();
        assert!(!ctl.handle(&Gesture::PointerMove(pt(5.0, 5.0)), 100.0, 100.0, &mut vp));

        ctl.handle(&Gesture::PointerDown(pt(0.0, 0.0)), 100.0, 100.0, &mut vp);
        ctl.handle(&Gesture::PointerUp, 100.0, 100.0, &mut vp);
        assert!(!ctl.handle(&Gesture::PointerMove(pt(50.0, 50.0)), 100.0, 100.0, &mut vp));
        assert_eq!(vp, ViewportState::default());
    }

    #[test]
    fn drag_deltas_accumulate_between_moves() {
        let mut vp = ViewportState::new(0.0, 0.0, 1.0, 200);
        let mut ctl = InteractionController::new();

        ctl.handle(&Gesture::PointerDown(pt(0.0, 0.0)), 100.0, 100.0, &mut vp);
        ctl.handle(&Gesture::PointerMove(pt(10.0, 0.0)), 100.0, 100.0, &mut vp);
        ctl.handle(&Gesture::PointerMove(pt(20.0, 0.0)), 100.0, 100.0, &mut vp);

        assert!((vp.center_x + 0.6).abs() < 1e-12);
    }

    // ============================================================================
    // Touch
    // ============================================================================

    #[test]
    fn pinch_uses_distance_ratio_anchored_at_center() {
        let mut vp = ViewportState::new(-0.5, 0.25, 1.0, 200);
        let mut ctl = InteractionController::new();

        let start = vec![pt(100.0, 100.0), pt(200.0, 100.0)];
        let spread = vec![pt(50.0, 100.0), pt(250.0, 100.0)];

        assert!(!ctl.handle(&Gesture::TouchStart(start), 400.0, 400.0, &mut vp));
        assert!(ctl.handle(&Gesture::TouchMove(spread), 400.0, 400.0, &mut vp));

        assert!((vp.zoom - 2.0).abs() < 1e-12);
        assert_eq!(vp.center_x, -0.5);
        assert_eq!(vp.center_y, 0.25);
    }

    #[test]
    fn pinch_measures_consecutive_frames() {
        let mut vp = ViewportState::new(0.0, 0.0, 1.0, 200);
        let mut ctl = InteractionController::new();
        let pair = |d: f64| vec![pt(0.0, 0.0), pt(d, 0.0)];

        ctl.handle(&Gesture::TouchStart(pair(100.0)), 400.0, 400.0, &mut vp);
        ctl.handle(&Gesture::TouchMove(pair(150.0)), 400.0, 400.0, &mut vp);
        ctl.handle(&Gesture::TouchMove(pair(300.0)), 400.0, 400.0, &mut vp);

        assert!((vp.zoom - 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_touch_drags() {
        let mut vp = ViewportState::new(0.0, 0.0, 1.0, 200);
        let mut ctl = InteractionController::new();

        ctl.handle(&Gesture::TouchStart(vec![pt(50.0, 50.0)]), 100.0, 100.0, &mut vp);
        ctl.handle(&Gesture::TouchMove(vec![pt(40.0, 50.0)]), 100.0, 100.0, &mut vp);

        assert!((vp.center_x - 0.3).abs() < 1e-12);
        ctl.handle(&Gesture::TouchEnd, 100.0, 100.0, &mut vp);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn pinch_drives_precise_viewport_past_f64_limit() {
        let mut vp = PreciseViewport::from_strings("-0.75", "0.1", "80000", 400, 256).unwrap();
        let mut ctl = InteractionController::new();
        let pair = |d: f64| vec![pt(0.0, 0.0), pt(d, 0.0)];

        ctl.handle(&Gesture::TouchStart(pair(10.0)), 400.0, 400.0, &mut vp);
        ctl.handle(&Gesture::TouchMove(pair(100.0)), 400.0, 400.0, &mut vp);

        assert!((vp.zoom.to_f64() - 800_000.0).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_defaults_and_clears_drag() {
        let mut vp = ViewportState::new(1.0, 1.0, 50.0, 500);
        let mut ctl = InteractionController::new();
        ctl.handle(&Gesture::PointerDown(pt(1.0, 1.0)), 10.0, 10.0, &mut vp);

        ctl.reset(&mut vp);

        assert_eq!(vp, ViewportState::default());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn degenerate_surface_is_ignored() {
        let mut vp = ViewportState::default();
        let mut ctl = InteractionController::new();
        assert!(!ctl.handle(&wheel(-1.0, 0.0, 0.0), 0.0, 0.0, &mut vp));
    }
}
