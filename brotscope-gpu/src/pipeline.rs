//! Compute pipeline for the escape-time kernel.

use crate::error::GpuError;

const SHADER_SOURCE: &str = include_str!("shaders/escape_time.wgsl");

/// Workgroup edge length; must match `@workgroup_size` in the shader.
pub const WORKGROUP_SIZE: u32 = 8;

/// Shader program plus the layout its bind group must follow.
pub struct EscapeTimePipeline {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub compute_pipeline: wgpu::ComputePipeline,
}

impl EscapeTimePipeline {
    /// Compile the kernel. Validation errors surface as [`GpuError::ShaderBuild`]
    /// with wgpu's diagnostic text.
    pub async fn build(device: &wgpu::Device) -> Result<Self, GpuError> {
        Self::build_from_source(device, SHADER_SOURCE).await
    }

    pub(crate) async fn build_from_source(
        device: &wgpu::Device,
        source: &str,
    ) -> Result<Self, GpuError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape_time_shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("escape_time_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("escape_time_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("escape_time_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(error) = device.pop_error_scope().await {
            log::error!("Escape-time shader failed to build: {error}");
            return Err(GpuError::ShaderBuild(error.to_string()));
        }

        Ok(Self {
            bind_group_layout,
            compute_pipeline,
        })
    }
}
