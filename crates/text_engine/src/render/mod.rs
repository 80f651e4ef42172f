//! Rendering backend abstraction
//!
//! The engine draws through the [`RenderBackend`] trait, which covers the
//! three things text rendering needs from a GPU: texture lifetime
//! management, alpha-blended quad emission, and scoped draw state. The
//! crate ships one implementation, the recording [`HeadlessBackend`],
//! used by the test suite and by callers that only need measurement.

mod backend;
mod headless;

pub use backend::{
    FilterMode, RenderBackend, TextureHandle, TextureImage, TextureParams, TexturedQuad, WrapMode,
};
pub use headless::{DrawCall, HeadlessBackend, HeadlessTexture};

/// Result type for backend operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur in a rendering backend
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Texture creation or upload failed
    #[error("Failed to create texture: {0}")]
    TextureCreationFailed(String),

    /// An operation referenced a texture the backend does not own
    #[error("Unknown texture handle {0:?}")]
    InvalidTexture(TextureHandle),

    /// Draw state was restored without a matching save
    #[error("Draw state restore without a matching save")]
    StateUnderflow,

    /// A draw call failed
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}
