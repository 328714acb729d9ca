//! Display-surface contract shared by the frame drivers.
//!
//! A render pass reports to a [`FrameSink`]: the GPU driver flushes once with
//! the whole frame, the progressive CPU driver flushes after every tile-row.

use crate::FrameBuffer;

/// Progress of a render pass, counted in flush steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderProgress {
    pub completed_steps: u32,
    pub total_steps: u32,
    pub is_complete: bool,
}

impl RenderProgress {
    pub fn new(total_steps: u32) -> Self {
        Self {
            completed_steps: 0,
            total_steps,
            is_complete: false,
        }
    }

    /// Completion percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f32 {
        if self.total_steps == 0 {
            0.0
        } else {
            (self.completed_steps as f32 / self.total_steps as f32) * 100.0
        }
    }
}

/// Emitted with every flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushEvent {
    /// Pixel rows `[0, rows_completed)` hold final colors.
    pub rows_completed: u32,
    pub progress: RenderProgress,
}

/// Receives frames as a pass makes them available.
pub trait FrameSink {
    fn flush(&mut self, frame: &FrameBuffer, event: &FlushEvent);
}

/// Records flush events and keeps the last frame. Handy off-screen.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<FlushEvent>,
    pub last_frame: Option<FrameBuffer>,
}

impl FrameSink for CollectingSink {
    fn flush(&mut self, frame: &FrameBuffer, event: &FlushEvent) {
        self.events.push(*event);
        self.last_frame = Some(frame.clone());
    }
}
