/// GraphicsDevice trait - GPU resource factory used by the material engine

use std::sync::Arc;
use crate::error::Galaxy3dResult;
use crate::graphics_device::{Texture, TextureDesc, Sampler, SamplerDesc};

/// Resource factory implemented by backend-specific devices
///
/// Shared as `Arc<Mutex<dyn GraphicsDevice>>`. Created resources are destroyed
/// when their last `Arc` is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Create a sampled 2D texture and its shader resource view
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor (size, format, initial pixel data)
    fn create_texture(&mut self, desc: TextureDesc) -> Galaxy3dResult<Arc<dyn Texture>>;

    /// Create a sampler state object
    ///
    /// Deduplication is not the device's concern: callers go through a
    /// `StatePool` so identical descriptors share one object.
    fn create_sampler(&mut self, desc: &SamplerDesc) -> Galaxy3dResult<Arc<dyn Sampler>>;
}
