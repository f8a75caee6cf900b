//! Error types for the Galaxy3D material crate
//!
//! Errors only travel across collaborator boundaries (device resource creation,
//! sampler registration). The binding engine itself never fails a frame: it
//! logs and falls back to an empty resource.

use std::fmt;

/// Result type for Galaxy3D material operations
pub type Galaxy3dResult<T> = Result<T, Galaxy3dError>;

/// Galaxy3D material errors
#[derive(Debug, Clone)]
pub enum Galaxy3dError {
    /// Backend-specific error (Vulkan, DirectX, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (malformed image data, bad descriptor, etc.)
    InvalidResource(String),
}

impl fmt::Display for Galaxy3dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Galaxy3dError::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Galaxy3dError::OutOfMemory => write!(f, "Out of GPU memory"),
            Galaxy3dError::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Galaxy3dError {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build a `Galaxy3dError::BackendError` from the message
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::SamplerStatePool", "Device lock poisoned");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::galaxy3d::Galaxy3dError::BackendError(message)
    }};
}

/// Log an ERROR and return early with `Err(Galaxy3dError::BackendError(..))`
///
/// # Example
///
/// ```ignore
/// engine_bail!("galaxy3d::MockGraphicsDevice", "Texture creation disabled");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
