//! Uniform block for the escape-time kernel.

use brotscope_core::{ColorStops, Rgb, ViewportState};
use bytemuck::{Pod, Zeroable};

/// Mirrors `struct Uniforms` in `escape_time.wgsl` (80 bytes, vec4s 16-aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct EscapeUniforms {
    pub center: [f32; 2],
    pub zoom: f32,
    pub max_iterations: u32,

    pub width: u32,
    pub height: u32,
    pub iteration_cap: u32,
    pub _pad0: u32,

    // Gradient stops as unit RGBA
    pub interior: [f32; 4],
    pub mid: [f32; 4],
    pub outer: [f32; 4],
}

fn unit_rgba(color: &Rgb) -> [f32; 4] {
    let [r, g, b] = color.to_unit();
    [r, g, b, 1.0]
}

impl EscapeUniforms {
    pub fn new(
        viewport: &ViewportState,
        stops: &ColorStops,
        width: u32,
        height: u32,
        iteration_cap: u32,
    ) -> Self {
        Self {
            center: [viewport.center_x as f32, viewport.center_y as f32],
            zoom: viewport.zoom as f32,
            max_iterations: viewport.max_iterations,
            width,
            height,
            iteration_cap,
            _pad0: 0,
            interior: unit_rgba(&stops.interior),
            mid: unit_rgba(&stops.mid),
            outer: unit_rgba(&stops.outer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl_struct() {
        assert_eq!(std::mem::size_of::<EscapeUniforms>(), 80);
        assert_eq!(std::mem::offset_of!(EscapeUniforms, interior), 32);
        assert_eq!(std::mem::offset_of!(EscapeUniforms, outer), 64);
    }

    #[test]
    fn new_narrows_viewport_and_normalizes_colors() {
        let vp = ViewportState::new(-0.5, 0.25, 2.0, 300);
        let u = EscapeUniforms::new(&vp, &ColorStops::default(), 640, 480, 1000);

        assert_eq!(u.center, [-0.5, 0.25]);
        assert_eq!(u.zoom, 2.0);
        assert_eq!(u.max_iterations, 300);
        assert_eq!(u.iteration_cap, 1000);
        assert_eq!(u.outer, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(u.interior[3], 1.0);
    }
}
