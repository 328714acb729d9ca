//! GPU escape-time rendering using wgpu.

mod device;
mod error;
mod frame_resources;
mod pipeline;
mod renderer;
mod uniforms;

pub use device::{GpuAvailability, GpuContext};
pub use error::GpuError;
pub use frame_resources::FrameResources;
pub use pipeline::{EscapeTimePipeline, WORKGROUP_SIZE};
pub use renderer::{GpuRenderResult, GpuRenderer};
pub use uniforms::EscapeUniforms;
