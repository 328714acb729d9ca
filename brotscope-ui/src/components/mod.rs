mod control_panel;
mod cpu_canvas;
mod gpu_canvas;
mod reset_button;

pub use control_panel::{CpuControls, GpuControls};
pub use cpu_canvas::CpuCanvas;
pub use gpu_canvas::GpuCanvas;
pub use reset_button::ResetButton;
