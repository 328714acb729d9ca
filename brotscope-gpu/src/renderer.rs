//! High-level GPU renderer API.

use crate::device::GpuContext;
use crate::error::GpuError;
use crate::frame_resources::FrameResources;
use crate::pipeline::{EscapeTimePipeline, WORKGROUP_SIZE};
use crate::uniforms::EscapeUniforms;
use brotscope_core::{
    ColorStops, FlushEvent, FrameBuffer, FrameSink, RenderProgress, ViewportState,
    EXPLORER_CONFIG,
};

/// Result of a GPU render operation.
pub struct GpuRenderResult {
    pub frame: FrameBuffer,
    pub compute_time_ms: f64,
}

/// Real-time renderer: every pixel evaluated in parallel, whole frame replaced.
///
/// The shader program and all buffers are built for each call and released
/// before it returns; only the device persists between frames.
pub struct GpuRenderer {
    context: GpuContext,
    iteration_cap: u32,
}

impl GpuRenderer {
    pub fn new(context: GpuContext) -> Self {
        Self {
            context,
            iteration_cap: EXPLORER_CONFIG.fast_iteration_cap,
        }
    }

    pub fn adapter_name(&self) -> &str {
        &self.context.adapter_name
    }

    /// Render one frame of `viewport` with f32 arithmetic.
    pub async fn render(
        &self,
        viewport: &ViewportState,
        stops: &ColorStops,
        width: u32,
        height: u32,
    ) -> Result<GpuRenderResult, GpuError> {
        let start = Self::now();

        if width == 0 || height == 0 {
            return Ok(GpuRenderResult {
                frame: FrameBuffer::new(width, height),
                compute_time_ms: 0.0,
            });
        }

        let device = &self.context.device;
        let pipeline = EscapeTimePipeline::build(device).await?;
        let resources = FrameResources::new(device, &pipeline, width, height);

        let uniforms = EscapeUniforms::new(viewport, stops, width, height, self.iteration_cap);
        self.context
            .queue
            .write_buffer(&resources.uniforms, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("escape_time_encoder"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("escape_time_pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&pipeline.compute_pipeline);
            compute_pass.set_bind_group(0, &resources.bind_group, &[]);
            compute_pass.dispatch_workgroups(
                width.div_ceil(WORKGROUP_SIZE),
                height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        encoder.copy_buffer_to_buffer(
            &resources.pixels,
            0,
            &resources.staging,
            0,
            resources.byte_len,
        );
        self.context.queue.submit(std::iter::once(encoder.finish()));

        let mut bytes = self.read_buffer(&resources.staging).await?;
        bytes.truncate(width as usize * height as usize * FrameBuffer::BYTES_PER_PIXEL);
        let frame = FrameBuffer::from_rgba(width, height, bytes).map_err(GpuError::Unavailable)?;

        let compute_time_ms = Self::now() - start;
        log::debug!(
            "GPU frame {}x{} zoom={} max_iterations={} in {:.1}ms",
            width,
            height,
            viewport.zoom,
            viewport.max_iterations,
            compute_time_ms
        );

        Ok(GpuRenderResult {
            frame,
            compute_time_ms,
        })
    }

    /// Render and deliver the frame to `sink` in a single flush.
    pub async fn render_to_sink<S: FrameSink>(
        &self,
        viewport: &ViewportState,
        stops: &ColorStops,
        width: u32,
        height: u32,
        sink: &mut S,
    ) -> Result<GpuRenderResult, GpuError> {
        let result = self.render(viewport, stops, width, height).await?;
        sink.flush(
            &result.frame,
            &FlushEvent {
                rows_completed: height,
                progress: RenderProgress {
                    completed_steps: 1,
                    total_steps: 1,
                    is_complete: true,
                },
            },
        );
        Ok(result)
    }

    async fn read_buffer(&self, buffer: &wgpu::Buffer) -> Result<Vec<u8>, GpuError> {
        let slice = buffer.slice(..);

        let (tx, rx) = futures_channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        #[cfg(not(target_arch = "wasm32"))]
        self.context.device.poll(wgpu::Maintain::Wait);

        rx.await
            .map_err(|_| GpuError::Unavailable("Channel closed".into()))?
            .map_err(GpuError::BufferMap)?;

        let data = slice.get_mapped_range().to_vec();
        buffer.unmap();

        Ok(data)
    }

    #[cfg(target_arch = "wasm32")]
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now() -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}
