//! Glyph caching and text layout
//!
//! The core of the engine: per-font glyph caches that couple rasterized
//! bitmaps to power-of-two GPU textures, the font registry with its
//! current binding, the layout walk that turns code points into pen
//! advances and quad placements, and the quad renderer.

pub mod font;
pub mod glyph_cache;
pub mod layout;
pub mod registry;
pub mod renderer;
pub mod texture_size;

pub use font::Font;
pub use glyph_cache::{GlyphCache, GlyphRecord};
pub use layout::{GlyphPlacement, TextLayout};
pub use registry::{FontHandle, FontRegistry};
pub use renderer::draw_placements;
pub use texture_size::next_power_of_two;

use crate::raster::RasterError;
use crate::render::RenderError;

/// Result type for text operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors surfaced by font registry and draw/measure operations
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// A font handle was never allocated or has been released
    #[error("Invalid font handle {0:?}")]
    InvalidHandle(FontHandle),

    /// A draw or measure call ran before any font was bound
    #[error("No font bound")]
    NoFontBound,

    /// The bound slot has no loaded font
    #[error("No font loaded for handle {0:?}")]
    FontNotLoaded(FontHandle),

    /// The font source could not be opened or parsed
    #[error("Failed to load font '{path}'")]
    LoadFailed {
        /// Path of the font source
        path: String,
        /// Underlying rasterizer error
        #[source]
        source: RasterError,
    },

    /// A backend operation failed
    #[error(transparent)]
    Render(#[from] RenderError),
}
