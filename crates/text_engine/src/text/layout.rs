//! Layout walk: code points to pen advances and quad placements
//!
//! Measurement and placement run the same walk over the same cached
//! records, so string width and quad positions always agree.

use crate::foundation::math::Vec2;
use crate::raster::GlyphRasterizer;
use crate::render::{RenderBackend, TextureHandle};

use super::font::Font;
use super::TextResult;

/// Everything the renderer needs to place one glyph quad
///
/// `origin` is pen-relative in glyph space, +Y up; the flip into
/// screen space happens in the renderer, never here.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPlacement {
    /// Pen-relative origin of the quad: (left bearing, top bearing - height)
    pub origin: Vec2,
    /// Quad size: the bitmap dimensions in pixels
    pub size: Vec2,
    /// Normalized texture-coordinate extent of the glyph bitmap
    pub uv_max: Vec2,
    /// GPU texture holding the glyph
    pub texture: TextureHandle,
    /// Pen movement to apply after this glyph
    pub advance: f32,
}

/// Layout engine over the currently bound font
///
/// Walks code points in string order, populating the glyph cache lazily.
/// Glyphs the rasterizer cannot produce are skipped: they emit no quad
/// and contribute zero width.
pub struct TextLayout<'a, R: GlyphRasterizer> {
    rasterizer: &'a R,
    font: &'a mut Font<R>,
}

impl<'a, R: GlyphRasterizer> TextLayout<'a, R> {
    /// Create a layout engine borrowing the bound font
    pub fn new(rasterizer: &'a R, font: &'a mut Font<R>) -> Self {
        Self { rasterizer, font }
    }

    /// Total horizontal advance of `text`
    pub fn measure<B: RenderBackend>(&mut self, backend: &mut B, text: &str) -> TextResult<f32> {
        let mut width = 0.0;
        for ch in text.chars() {
            if self.font.ensure_glyph(self.rasterizer, backend, ch)? {
                if let Some(record) = self.font.record(ch) {
                    width += record.advance;
                }
            }
        }
        Ok(width)
    }

    /// Per-glyph placements for `text`, in string order
    pub fn layout<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        text: &str,
    ) -> TextResult<Vec<GlyphPlacement>> {
        let mut placements = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if !self.font.ensure_glyph(self.rasterizer, backend, ch)? {
                continue;
            }
            let Some(record) = self.font.record(ch) else {
                continue;
            };
            placements.push(GlyphPlacement {
                origin: Vec2::new(record.left, record.top - record.height as f32),
                size: Vec2::new(record.width as f32, record.height as f32),
                uv_max: record.uv_extent,
                texture: record.texture,
                advance: record.advance,
            });
        }
        Ok(placements)
    }

    /// Pen offset that horizontally centers `text` on the anchor point
    pub fn centered_origin<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        text: &str,
    ) -> TextResult<f32> {
        Ok(-self.measure(backend, text)? / 2.0)
    }
}
