//! Device buffers scoped to a single render pass.

use crate::pipeline::EscapeTimePipeline;
use crate::uniforms::EscapeUniforms;

/// Uniforms, output and staging buffers plus their bind group.
///
/// Everything is created for one pass and destroyed when dropped, so nothing
/// outlives the frame that needed it.
pub struct FrameResources {
    pub uniforms: wgpu::Buffer,
    pub pixels: wgpu::Buffer,
    pub staging: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub byte_len: u64,
}

impl FrameResources {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &EscapeTimePipeline,
        width: u32,
        height: u32,
    ) -> Self {
        // One packed RGBA8 u32 per pixel
        let byte_len = (width as u64 * height as u64 * std::mem::size_of::<u32>() as u64).max(4);

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape_time_uniforms"),
            size: std::mem::size_of::<EscapeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pixels = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape_time_pixels"),
            size: byte_len,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape_time_staging"),
            size: byte_len,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("escape_time_bind_group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: pixels.as_entire_binding(),
                },
            ],
        });

        Self {
            uniforms,
            pixels,
            staging,
            bind_group,
            byte_len,
        }
    }
}

impl Drop for FrameResources {
    fn drop(&mut self) {
        self.uniforms.destroy();
        self.pixels.destroy();
        self.staging.destroy();
    }
}
