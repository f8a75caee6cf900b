/// ShaderPass - an ordered list of shader stages forming one draw configuration
///
/// Passes are assembled by the host. Each pass gets a process-unique
/// `ShaderPassId` at construction; bind-slot caches key on that id.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::graphics_device::{Shader, ShaderStage};

static NEXT_PASS_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a shader pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderPassId(u64);

/// A complete shader pass
///
/// Clones share the id: they describe the same stages.
#[derive(Clone)]
pub struct ShaderPass {
    id: ShaderPassId,
    name: String,
    shaders: Vec<Arc<dyn Shader>>,
}

impl ShaderPass {
    /// Create a pass from its stages, in pipeline order
    pub fn new(name: impl Into<String>, shaders: Vec<Arc<dyn Shader>>) -> Self {
        Self {
            id: ShaderPassId(NEXT_PASS_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            shaders,
        }
    }

    /// Pass identity
    pub fn id(&self) -> ShaderPassId {
        self.id
    }

    /// Debug name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stages in pipeline order
    pub fn shaders(&self) -> &[Arc<dyn Shader>] {
        &self.shaders
    }

    /// First stage of the given kind
    pub fn shader(&self, stage: ShaderStage) -> Option<&Arc<dyn Shader>> {
        self.shaders.iter().find(|shader| shader.stage() == stage)
    }
}

impl std::fmt::Debug for ShaderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderPass")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("stages", &self.shaders.iter().map(|s| s.stage()).collect::<Vec<_>>())
            .finish()
    }
}
