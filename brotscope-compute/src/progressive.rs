//! Cooperative tile-row renderer.
//!
//! Pixels are evaluated tile by tile in row-major order. After each full
//! tile-row the partial frame is flushed to the sink and control goes back to
//! the host through the caller's `yield_now` future.

use crate::passes::{FastPass, PixelEvaluator, PrecisePass};
use crate::tiles::generate_tile_rows;
use brotscope_core::{
    colorize, ColorStops, FlushEvent, FrameBuffer, FrameSink, PreciseViewport, PrecisionConfig,
    RenderProgress, ViewportState, EXPLORER_CONFIG,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How a render call ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed(FrameBuffer),
    /// Another pass was in flight; nothing was rendered or flushed.
    Rejected,
}

impl RenderOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RenderOutcome::Rejected)
    }
}

/// Holds the in-flight flag for the lifetime of a pass.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Progressive renderer. At most one pass per instance (and its clones) runs
/// at a time.
#[derive(Clone, Debug)]
pub struct ProgressiveRenderer {
    in_flight: Arc<AtomicBool>,
    tile_size: u32,
}

impl ProgressiveRenderer {
    pub fn new() -> Self {
        Self::with_tile_size(EXPLORER_CONFIG.tile_size)
    }

    pub fn with_tile_size(tile_size: u32) -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            tile_size: tile_size.max(1),
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Render `pass`, flushing to `sink` after every tile-row.
    ///
    /// Returns [`RenderOutcome::Rejected`] at once if a pass is already in
    /// flight. Dropping the returned future mid-pass releases the renderer.
    pub async fn render<P, S, Y, F>(
        &self,
        pass: &P,
        stops: &ColorStops,
        sink: &mut S,
        mut yield_now: Y,
    ) -> RenderOutcome
    where
        P: PixelEvaluator,
        S: FrameSink,
        Y: FnMut() -> F,
        F: Future<Output = ()>,
    {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::warn!("Render requested while a pass is in flight; ignoring");
            return RenderOutcome::Rejected;
        };

        let (width, height) = (pass.width(), pass.height());
        let max_iterations = pass.max_iterations();
        let stops = *stops;
        let mut frame = FrameBuffer::new(width, height);

        if width == 0 || height == 0 {
            return RenderOutcome::Completed(frame);
        }

        let rows = generate_tile_rows(width, height, self.tile_size);
        let mut progress = RenderProgress::new(rows.len() as u32);
        log::debug!(
            "Progressive pass: {}x{}, {} tile-rows, max_iterations={}",
            width,
            height,
            rows.len(),
            max_iterations
        );

        for row in &rows {
            let mut rows_completed = 0;
            for tile in row {
                for (x, y) in tile.pixels() {
                    let result = pass.evaluate_pixel(x, y);
                    frame.put_pixel(x, y, colorize(&result, max_iterations, &stops));
                }
                rows_completed = tile.bottom();
            }

            progress.completed_steps += 1;
            progress.is_complete = progress.completed_steps == progress.total_steps;
            sink.flush(
                &frame,
                &FlushEvent {
                    rows_completed,
                    progress,
                },
            );

            yield_now().await;
        }

        log::debug!("Progressive pass complete: {} flushes", progress.completed_steps);
        RenderOutcome::Completed(frame)
    }

    /// Render a high-precision view. The viewport and precision are captured
    /// before the first pixel.
    #[allow(clippy::too_many_arguments)]
    pub async fn render_precise<S, Y, F>(
        &self,
        viewport: &PreciseViewport,
        precision: PrecisionConfig,
        width: u32,
        height: u32,
        stops: &ColorStops,
        sink: &mut S,
        yield_now: Y,
    ) -> RenderOutcome
    where
        S: FrameSink,
        Y: FnMut() -> F,
        F: Future<Output = ()>,
    {
        let pass = PrecisePass::new(viewport, precision, width, height);
        self.render(&pass, stops, sink, yield_now).await
    }

    /// Render a real-time view on the CPU, e.g. when no GPU is available.
    pub async fn render_fast<S, Y, F>(
        &self,
        viewport: &ViewportState,
        width: u32,
        height: u32,
        stops: &ColorStops,
        sink: &mut S,
        yield_now: Y,
    ) -> RenderOutcome
    where
        S: FrameSink,
        Y: FnMut() -> F,
        F: Future<Output = ()>,
    {
        let pass = FastPass::new(viewport, width, height);
        self.render(&pass, stops, sink, yield_now).await
    }
}

impl Default for ProgressiveRenderer {
    fn default() -> Self {
        Self::new()
    }
}
