/// Pooled sampler state objects
///
/// `SamplerStatePool` deduplicates sampler objects by descriptor and counts
/// outstanding handles per descriptor. A `SamplerHandle` releases its count
/// exactly once, either explicitly or on drop; the pool drops its GPU sampler
/// when the count reaches zero. Handles keep only a weak link to the pool.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use rustc_hash::FxHashMap;
use crate::error::Galaxy3dResult;
use crate::graphics_device::{GraphicsDevice, Sampler, SamplerDesc};
use crate::{engine_err, engine_trace, engine_warn};

const LOG_SOURCE: &str = "galaxy3d::SamplerStatePool";

// ============================================================================
// Sampler handle
// ============================================================================

/// Receiver of handle releases
pub trait SamplerRelease: Send + Sync {
    /// Give back one reference to the sampler registered for `desc`
    fn release(&self, desc: &SamplerDesc);
}

/// Reference-counted handle to a pooled sampler
///
/// Released on drop. `release` may be called early; later calls are no-ops.
pub struct SamplerHandle {
    desc: SamplerDesc,
    sampler: Option<Arc<dyn Sampler>>,
    owner: Option<Weak<dyn SamplerRelease>>,
}

impl SamplerHandle {
    /// A handle that refers to nothing
    pub fn empty() -> Self {
        Self {
            desc: SamplerDesc::default(),
            sampler: None,
            owner: None,
        }
    }

    /// Wrap a registered sampler
    ///
    /// `owner` receives exactly one `release(desc)` for this handle.
    pub fn new(desc: SamplerDesc, sampler: Arc<dyn Sampler>, owner: Weak<dyn SamplerRelease>) -> Self {
        Self {
            desc,
            sampler: Some(sampler),
            owner: Some(owner),
        }
    }

    /// Descriptor this handle was registered with
    pub fn desc(&self) -> &SamplerDesc {
        &self.desc
    }

    /// The sampler object, None once released
    pub fn sampler(&self) -> Option<&Arc<dyn Sampler>> {
        self.sampler.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.sampler.is_none()
    }

    /// Give the reference back to the pool
    pub fn release(&mut self) {
        self.sampler = None;
        if let Some(owner) = self.owner.take().and_then(|weak| weak.upgrade()) {
            owner.release(&self.desc);
        }
    }
}

impl Default for SamplerHandle {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SamplerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplerHandle")
            .field("desc", &self.desc)
            .field("live", &self.sampler.is_some())
            .finish()
    }
}

// ============================================================================
// State pool
// ============================================================================

/// Registration contract of a sampler pool
///
/// Identical descriptors must resolve to the same sampler object.
pub trait StatePool: Send + Sync {
    /// Get a handle to the sampler for `desc`, creating it if needed
    fn register(&self, desc: &SamplerDesc) -> Galaxy3dResult<SamplerHandle>;
}

struct PoolEntry {
    sampler: Arc<dyn Sampler>,
    ref_count: usize,
}

struct PoolInner {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    entries: Mutex<FxHashMap<SamplerDesc, PoolEntry>>,
}

impl SamplerRelease for PoolInner {
    fn release(&self, desc: &SamplerDesc) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get_mut(desc) {
            Some(entry) if entry.ref_count > 1 => entry.ref_count -= 1,
            Some(_) => {
                entries.remove(desc);
                engine_trace!(LOG_SOURCE, "Sampler dropped ({} live)", entries.len());
            }
            None => engine_warn!(LOG_SOURCE, "Release of an unregistered sampler ignored"),
        }
    }
}

/// Sampler pool backed by a graphics device
///
/// Clones share the same pool.
#[derive(Clone)]
pub struct SamplerStatePool {
    inner: Arc<PoolInner>,
}

impl SamplerStatePool {
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                device,
                entries: Mutex::new(FxHashMap::default()),
            }),
        }
    }

    /// Number of distinct sampler objects alive in the pool
    pub fn live_count(&self) -> usize {
        self.inner.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of outstanding handles for `desc`
    pub fn ref_count(&self, desc: &SamplerDesc) -> usize {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(desc)
            .map_or(0, |entry| entry.ref_count)
    }
}

impl StatePool for SamplerStatePool {
    fn register(&self, desc: &SamplerDesc) -> Galaxy3dResult<SamplerHandle> {
        let mut entries = self.inner.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let sampler = match entries.get_mut(desc) {
            Some(entry) => {
                entry.ref_count += 1;
                entry.sampler.clone()
            }
            None => {
                let sampler = self
                    .inner
                    .device
                    .lock()
                    .map_err(|_| engine_err!(LOG_SOURCE, "Graphics device lock poisoned"))?
                    .create_sampler(desc)?;
                entries.insert(*desc, PoolEntry { sampler: sampler.clone(), ref_count: 1 });
                engine_trace!(LOG_SOURCE, "Sampler created ({} live)", entries.len());
                sampler
            }
        };

        let owner: Weak<PoolInner> = Arc::downgrade(&self.inner);
        Ok(SamplerHandle::new(*desc, sampler, owner))
    }
}

#[cfg(test)]
#[path = "sampler_pool_tests.rs"]
mod tests;
