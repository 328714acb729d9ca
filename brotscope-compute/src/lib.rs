pub mod evaluators;
pub mod passes;
pub mod progressive;
pub mod tiles;

pub use evaluators::{EscapeTimeEvaluator, FastEvaluator, PreciseEvaluator};
pub use passes::{FastPass, PixelEvaluator, PrecisePass};
pub use progressive::{ProgressiveRenderer, RenderOutcome};
pub use tiles::generate_tile_rows;

// Re-export core types for convenience
pub use brotscope_core::*;
