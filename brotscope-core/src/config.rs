//! Explorer configuration.
//!
//! Canonical defaults and limits shared by the GPU and CPU renderers, the
//! interaction controller and the host shell.

/// Width of the complex-plane window at zoom 1.
pub const VIEW_SPAN: f64 = 3.0;
pub const ZOOM_MIN: f64 = 0.01;
pub const ZOOM_MAX: f64 = 82_500.0;

/// Configuration for the Mandelbrot explorer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplorerConfig {
    /// Human-readable name for UI display
    pub display_name: &'static str,
    /// Default center coordinates as strings (preserves precision)
    pub default_center: (&'static str, &'static str),
    /// Zoom at which the visible span equals `view_span`
    pub default_zoom: f64,
    /// Width of the complex-plane window at zoom 1.
    pub view_span: f64,
    /// Smallest zoom the controller will produce.
    pub zoom_min: f64,
    /// Largest zoom for the f32/f64 viewport. The precise viewport has no upper bound.
    pub zoom_max: f64,
    /// Multiplicative zoom step for one wheel notch.
    pub wheel_zoom_factor: f64,
    /// Default iteration budget of the real-time renderer.
    pub gpu_default_iterations: u32,
    /// Default iteration budget of the high-precision renderer.
    pub cpu_default_iterations: u32,
    /// Hard cap applied inside the fast evaluator.
    pub fast_iteration_cap: u32,
    /// Edge length of the square tiles used by the progressive renderer.
    pub tile_size: u32,
    /// Default working precision of the high-precision renderer, in decimal digits.
    pub default_precision_digits: u32,
    pub min_precision_digits: u32,
    pub max_precision_digits: u32,
    /// Default gradient as hex strings: interior, mid, outer.
    pub default_colors: (&'static str, &'static str, &'static str),
}

/// This is the canonical source of truth for explorer parameters.
pub static EXPLORER_CONFIG: ExplorerConfig = ExplorerConfig {
    display_name: "Mandelbrot Set",
    default_center: ("-0.5", "0"),
    default_zoom: 1.0,
    view_span: VIEW_SPAN,
    zoom_min: ZOOM_MIN,
    zoom_max: ZOOM_MAX,
    wheel_zoom_factor: 1.15,
    gpu_default_iterations: 200,
    cpu_default_iterations: 400,
    fast_iteration_cap: 1000,
    tile_size: 32,
    default_precision_digits: 64,
    min_precision_digits: 32,
    max_precision_digits: 256,
    default_colors: ("#002a00", "#00bfff", "#ffff00"),
};
