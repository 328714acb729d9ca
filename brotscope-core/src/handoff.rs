use crate::{ColorStops, PreciseViewport, PrecisionConfig, ViewportState};
use serde::{Deserialize, Serialize};

/// State passed from the real-time renderer to the high-precision renderer.
///
/// Exactly the viewport and gradient; nothing else crosses the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Handoff {
    pub viewport: ViewportState,
    pub colors: ColorStops,
}

impl Handoff {
    pub fn new(viewport: ViewportState, colors: ColorStops) -> Self {
        Self { viewport, colors }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode handoff: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to decode handoff: {}", e))
    }

    /// The same framing as a precise viewport at `precision`.
    pub fn to_precise(&self, precision: &PrecisionConfig) -> PreciseViewport {
        PreciseViewport::from_state(&self.viewport, precision.precision_bits())
    }
}
