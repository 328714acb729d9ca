use crate::rendering::canvas_utils::draw_frame_rows;
use brotscope_core::{FlushEvent, FrameBuffer, FrameSink, RenderProgress};
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::CanvasRenderingContext2d;

/// Monotonic render generation shared by a canvas and its sinks.
///
/// Starting a new render bumps the counter; sinks from earlier renders then
/// stop drawing, so a slow pass never paints over a newer frame.
#[derive(Clone, Default)]
pub struct RenderGeneration(Rc<Cell<u32>>);

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its id.
    pub fn advance(&self) -> u32 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_current(&self, id: u32) -> bool {
        self.0.get() == id
    }
}

/// Paints flushed rows onto a 2D canvas.
///
/// Only rows completed since the previous flush are copied, so a
/// progressive pass costs one full-frame blit in total.
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    generation: RenderGeneration,
    id: u32,
    rows_drawn: u32,
    progress: Option<RwSignal<RenderProgress>>,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d, generation: &RenderGeneration) -> Self {
        Self {
            ctx,
            id: generation.advance(),
            generation: generation.clone(),
            rows_drawn: 0,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: RwSignal<RenderProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Whether a newer render has taken over the canvas.
    pub fn is_stale(&self) -> bool {
        !self.generation.is_current(self.id)
    }
}

impl FrameSink for CanvasSink {
    fn flush(&mut self, frame: &FrameBuffer, event: &FlushEvent) {
        if self.is_stale() {
            return;
        }

        if event.rows_completed > self.rows_drawn {
            if let Err(e) = draw_frame_rows(&self.ctx, frame, self.rows_drawn, event.rows_completed)
            {
                log::error!("Failed to draw rows: {:?}", e);
                return;
            }
            self.rows_drawn = event.rows_completed;
        }

        if let Some(progress) = self.progress {
            let _ = progress.try_set(event.progress);
        }
    }
}
