//! GPU error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("No GPU adapter found")]
    NoAdapter,

    #[error("Failed to create device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    #[error("Buffer mapping failed: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("Shader program failed to build: {0}")]
    ShaderBuild(String),

    #[error("GPU unavailable: {0}")]
    Unavailable(String),
}

impl GpuError {
    /// Whether the renderer should give up on the GPU for this session.
    pub fn is_fatal_to_backend(&self) -> bool {
        matches!(
            self,
            GpuError::NoAdapter | GpuError::DeviceCreation(_) | GpuError::Unavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_build_message_carries_diagnostic() {
        let err = GpuError::ShaderBuild("unknown identifier `zz`".into());
        assert_eq!(
            err.to_string(),
            "Shader program failed to build: unknown identifier `zz`"
        );
        assert!(!err.is_fatal_to_backend());
        assert!(GpuError::NoAdapter.is_fatal_to_backend());
    }
}
