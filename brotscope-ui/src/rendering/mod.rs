mod canvas_sink;
mod canvas_utils;

pub use canvas_sink::{CanvasSink, RenderGeneration};
pub use canvas_utils::{
    canvas_size, draw_frame_rows, get_2d_context, performance_now, yield_to_browser,
};
