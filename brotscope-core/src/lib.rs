pub mod bigfloat;
pub mod color;
pub mod config;
pub mod escape;
pub mod frame_buffer;
pub mod frame_sink;
pub mod handoff;
pub mod interaction;
pub mod mapper;
pub mod pixel_rect;
pub mod precision;
pub mod viewport;

pub use bigfloat::BigFloat;
pub use color::{colorize, ColorStops, Rgb};
pub use config::{ExplorerConfig, EXPLORER_CONFIG, VIEW_SPAN, ZOOM_MAX, ZOOM_MIN};
pub use escape::{smooth_iteration, EscapeResult, ESCAPE_RADIUS_SQ};
pub use frame_buffer::FrameBuffer;
pub use frame_sink::{CollectingSink, FlushEvent, FrameSink, RenderProgress};
pub use handoff::Handoff;
pub use interaction::{Gesture, InteractionController, SurfacePoint};
pub use mapper::{
    normalized, pixel_to_complex, pixel_to_complex_precise, PreciseProjection, SamplePoint,
};
pub use pixel_rect::PixelRect;
pub use precision::{gpu_precision_exhausted, recommended_digits, PrecisionConfig};
pub use viewport::{clamp_zoom, PreciseViewport, ViewportControl, ViewportState};
