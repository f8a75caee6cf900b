/// Texture view: a material slot's GPU texture, possibly empty
///
/// Views are created from a `TextureSource`. Absence of a source, undecodable
/// data, a size mismatch or a device failure all yield an empty view and a
/// warning; nothing here aborts a frame.

use std::sync::{Arc, Mutex};
use crate::graphics_device::{GraphicsDevice, Texture, TextureDesc, TextureFormat};
use crate::material::phong_material::TextureSource;
use crate::engine_warn;

const LOG_SOURCE: &str = "galaxy3d::TextureView";

/// GPU view of one texture slot
#[derive(Clone, Default)]
pub struct TextureView {
    texture: Option<Arc<dyn Texture>>,
}

impl TextureView {
    /// An explicitly empty view
    pub fn empty() -> Self {
        Self { texture: None }
    }

    /// Whether the view holds a texture
    pub fn has_view(&self) -> bool {
        self.texture.is_some()
    }

    /// The texture, if any
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        self.texture.as_ref()
    }

    /// Replace the view with one created from `source`
    ///
    /// The previous texture is released first. Returns whether the view holds a
    /// texture afterwards.
    pub fn create_view(
        &mut self,
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        source: Option<&TextureSource>,
    ) -> bool {
        self.release();

        let Some(source) = source else {
            return false;
        };
        let Some(desc) = decode(source) else {
            return false;
        };

        let created = match device.lock() {
            Ok(mut device) => device.create_texture(desc),
            Err(_) => {
                engine_warn!(LOG_SOURCE, "Graphics device lock poisoned, view left empty");
                return false;
            }
        };

        match created {
            Ok(texture) => {
                self.texture = Some(texture);
                true
            }
            Err(e) => {
                engine_warn!(LOG_SOURCE, "Texture creation failed, view left empty: {}", e);
                false
            }
        }
    }

    /// Drop the texture, leaving the view empty
    pub fn release(&mut self) {
        self.texture = None;
    }
}

impl std::fmt::Debug for TextureView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.texture {
            Some(texture) => write!(f, "TextureView({:?})", texture.info()),
            None => write!(f, "TextureView(empty)"),
        }
    }
}

/// Turn a source into a texture descriptor, or warn and return None
fn decode(source: &TextureSource) -> Option<TextureDesc> {
    let desc = match source {
        TextureSource::Encoded(bytes) => match image::load_from_memory(bytes) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                TextureDesc {
                    width: rgba.width(),
                    height: rgba.height(),
                    format: TextureFormat::R8G8B8A8_UNORM,
                    data: rgba.into_raw(),
                }
            }
            Err(e) => {
                engine_warn!(LOG_SOURCE, "Failed to decode image ({} bytes): {}", bytes.len(), e);
                return None;
            }
        },
        TextureSource::Rgba8 { width, height, pixels } => TextureDesc {
            width: *width,
            height: *height,
            format: TextureFormat::R8G8B8A8_UNORM,
            data: pixels.to_vec(),
        },
    };

    if desc.width == 0 || desc.height == 0 {
        engine_warn!(LOG_SOURCE, "Image has zero size ({}x{})", desc.width, desc.height);
        return None;
    }
    if desc.data.len() != desc.expected_size() {
        engine_warn!(
            LOG_SOURCE,
            "Pixel data size mismatch: {}x{} expects {} bytes, got {}",
            desc.width,
            desc.height,
            desc.expected_size(),
            desc.data.len()
        );
        return None;
    }

    Some(desc)
}

#[cfg(test)]
#[path = "texture_view_tests.rs"]
mod tests;
