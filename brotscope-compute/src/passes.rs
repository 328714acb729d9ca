//! Per-pass snapshots binding a viewport, a surface size and an evaluator.
//!
//! A pass copies everything it reads when it is created, so edits to the
//! host's viewport during a progressive render are never observed mid-pass.

use crate::{EscapeTimeEvaluator, FastEvaluator, PreciseEvaluator};
use brotscope_core::{
    pixel_to_complex, EscapeResult, PreciseProjection, PreciseViewport, PrecisionConfig,
    ViewportState,
};

/// Evaluates pixels of one frame.
pub trait PixelEvaluator {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn max_iterations(&self) -> u32;
    fn evaluate_pixel(&self, x: u32, y: u32) -> EscapeResult;
}

/// A frame evaluated in f64.
#[derive(Clone, Debug)]
pub struct FastPass<E = FastEvaluator> {
    viewport: ViewportState,
    width: u32,
    height: u32,
    evaluator: E,
}

impl FastPass {
    pub fn new(viewport: &ViewportState, width: u32, height: u32) -> Self {
        Self::with_evaluator(viewport, width, height, FastEvaluator::new())
    }
}

impl<E: EscapeTimeEvaluator<Scalar = f64>> FastPass<E> {
    pub fn with_evaluator(
        viewport: &ViewportState,
        width: u32,
        height: u32,
        evaluator: E,
    ) -> Self {
        Self {
            viewport: *viewport,
            width,
            height,
            evaluator,
        }
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }
}

impl<E: EscapeTimeEvaluator<Scalar = f64>> PixelEvaluator for FastPass<E> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn max_iterations(&self) -> u32 {
        self.viewport.max_iterations
    }

    fn evaluate_pixel(&self, x: u32, y: u32) -> EscapeResult {
        let p = pixel_to_complex(x, y, self.width, self.height, &self.viewport);
        self.evaluator.evaluate(&p.cx, &p.cy, self.viewport.max_iterations)
    }
}

/// A frame evaluated at a fixed arbitrary precision.
///
/// The precision is captured when the pass is built and holds for every pixel.
#[derive(Clone, Debug)]
pub struct PrecisePass {
    projection: PreciseProjection,
    max_iterations: u32,
    width: u32,
    height: u32,
    evaluator: PreciseEvaluator,
}

impl PrecisePass {
    pub fn new(
        viewport: &PreciseViewport,
        precision: PrecisionConfig,
        width: u32,
        height: u32,
    ) -> Self {
        let evaluator = PreciseEvaluator::new(precision);
        Self {
            projection: PreciseProjection::new(
                viewport,
                width,
                height,
                evaluator.precision_bits(),
            ),
            max_iterations: viewport.max_iterations,
            width,
            height,
            evaluator,
        }
    }

    pub fn precision(&self) -> PrecisionConfig {
        self.evaluator.precision()
    }
}

impl PixelEvaluator for PrecisePass {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn evaluate_pixel(&self, x: u32, y: u32) -> EscapeResult {
        let (cx, cy) = self.projection.project(x, y);
        self.evaluator.evaluate(&cx, &cy, self.max_iterations)
    }
}
