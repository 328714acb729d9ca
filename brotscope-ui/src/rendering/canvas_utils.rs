use brotscope_core::FrameBuffer;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Viewports narrower than this get the small canvas.
const SMALL_SCREEN_WIDTH: f64 = 820.0;
const SMALL_CANVAS_SIZE: u32 = 320;
const LARGE_CANVAS_SIZE: u32 = 600;

/// Zero-delay deferral to the browser event loop.
///
/// Resolves on a fresh macrotask, so input events and paints queued during a
/// tile-row get to run before the next one starts.
pub fn yield_to_browser() -> TimeoutFuture {
    TimeoutFuture::new(0)
}

/// Get the current time in milliseconds (for elapsed time tracking).
pub fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Edge length of the square canvas for the current window.
pub fn canvas_size() -> u32 {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(SMALL_SCREEN_WIDTH);
    if width < SMALL_SCREEN_WIDTH {
        SMALL_CANVAS_SIZE
    } else {
        LARGE_CANVAS_SIZE
    }
}

/// Get 2D rendering context from canvas.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// Draw rows `[start, end)` of `frame` at their own position on the canvas.
pub fn draw_frame_rows(
    ctx: &CanvasRenderingContext2d,
    frame: &FrameBuffer,
    start: u32,
    end: u32,
) -> Result<(), JsValue> {
    let pixels = frame.rows(start, end);
    if pixels.is_empty() || frame.width() == 0 {
        return Ok(());
    }
    let image_data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(pixels),
        frame.width(),
        pixels.len() as u32 / frame.width() / 4,
    )?;
    ctx.put_image_data(&image_data, 0.0, start as f64)
}
