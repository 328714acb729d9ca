mod use_canvas_interaction;

pub use use_canvas_interaction::{canvas_style, use_canvas_interaction, InteractionHandle};
