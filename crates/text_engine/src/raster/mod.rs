//! Font loading and glyph rasterization primitives.
//!
//! This module defines the `GlyphRasterizer` trait: the seam between the
//! engine and whatever library turns font files into coverage bitmaps.
//! The default implementation is [`FontdueRasterizer`]; the
//! [`SyntheticRasterizer`] produces deterministic block glyphs for tests
//! and headless tooling.

use std::path::Path;

mod fontdue_driver;
mod synthetic;

pub use fontdue_driver::{FontdueFace, FontdueRasterizer};
pub use synthetic::{SyntheticFace, SyntheticRasterizer};

/// Result type for rasterization operations
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur during font loading or glyph rasterization
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The font file could not be read or parsed
    #[error("Failed to open font '{path}': {reason}")]
    OpenFailed {
        /// Path of the font source
        path: String,
        /// What went wrong opening it
        reason: String,
    },

    /// The font has no glyph for the requested code point
    #[error("No glyph for '{0}' in font")]
    GlyphNotFound(char),

    /// The glyph exists but could not be rasterized
    #[error("Failed to rasterize glyph '{ch}': {reason}")]
    RasterizeFailed {
        /// Code point that failed
        ch: char,
        /// What went wrong rasterizing it
        reason: String,
    },
}

/// A glyph bitmap with baseline metrics, as produced by a rasterizer.
///
/// `coverage` is row-major with one byte per pixel, `width * height`
/// bytes long, where 0 is fully transparent and 255 fully opaque. Empty
/// glyphs (spaces) have zero dimensions and an empty buffer but still
/// carry an advance.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Row-major coverage values, one byte per pixel
    pub coverage: Vec<u8>,
    /// Horizontal offset from the pen position to the bitmap's left edge
    pub left: f32,
    /// Vertical offset from the baseline up to the bitmap's top edge
    pub top: f32,
    /// Pixels to move the pen rightward after this glyph.
    ///
    /// Snapped to whole pixels, matching the 26.6 fixed-point convention
    /// of FreeType-style rasterizers.
    pub advance: f32,
}

/// Font loading and per-glyph rasterization.
///
/// Implementors wrap a font library and handle:
/// - Opening a font face from a file at a fixed pixel size
/// - Rasterizing individual code points to coverage bitmaps
///
/// The engine layers caching and texture management on top; an
/// implementation only ever sees one glyph at a time.
pub trait GlyphRasterizer {
    /// Opened font face type
    type Face;

    /// Open a font face from `path` at `pixel_size`.
    fn open(&self, path: &Path, pixel_size: u32) -> RasterResult<Self::Face>;

    /// Rasterize one code point from an opened face.
    ///
    /// Fails with [`RasterError::GlyphNotFound`] when the face has no
    /// mapping for `ch`.
    fn rasterize(&self, face: &Self::Face, ch: char) -> RasterResult<RasterizedGlyph>;
}
