//! Per-font glyph cache
//!
//! Maps code points to GPU-resident glyph textures with their metrics.
//! Rasterization happens on first access; failures are memoized so a
//! missing glyph never hits the rasterizer twice. Each glyph owns its
//! texture: the smallest power-of-two container holding the bitmap, with
//! the unused border left fully transparent.

use std::collections::HashMap;

use crate::foundation::math::Vec2;
use crate::raster::{GlyphRasterizer, RasterizedGlyph};
use crate::render::{RenderBackend, RenderResult, TextureHandle, TextureImage, TextureParams};

use super::texture_size::{next_power_of_two, uv_extent};

/// A cached, GPU-resident glyph with its metrics
///
/// Immutable once stored; the texture is reused for the lifetime of the
/// owning font.
#[derive(Debug, Clone)]
pub struct GlyphRecord {
    /// Rasterized bitmap width in pixels
    pub width: u32,
    /// Rasterized bitmap height in pixels
    pub height: u32,
    /// Power-of-two container width
    pub tex_width: u32,
    /// Power-of-two container height
    pub tex_height: u32,
    /// Pixels to move the pen rightward after this glyph
    pub advance: f32,
    /// How far below the baseline the glyph's box extends (top bearing
    /// minus bitmap height). Kept in the data model; single-line layout
    /// never consumes it.
    pub advance_y: f32,
    /// Horizontal offset from the pen position to the bitmap's left edge
    pub left: f32,
    /// Vertical offset from the baseline up to the bitmap's top edge
    pub top: f32,
    /// Fraction of the container actually covered by the bitmap
    pub uv_extent: Vec2,
    /// Owned GPU texture
    pub texture: TextureHandle,
}

/// Cached outcome for one code point
#[derive(Debug, Clone)]
enum GlyphSlot {
    /// Rasterization failed; do not retry
    Failed,
    /// Glyph is resident on the GPU
    Ready(GlyphRecord),
}

/// Glyph cache for a single font
#[derive(Debug, Default)]
pub struct GlyphCache {
    slots: HashMap<char, GlyphSlot>,
}

impl GlyphCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Make sure `ch` has a GPU-resident glyph, rasterizing and uploading
    /// on a miss.
    ///
    /// Returns `Ok(true)` when a record is available and `Ok(false)` when
    /// the rasterizer cannot produce this glyph; that outcome is memoized
    /// and never retried. Backend upload failures propagate as errors and
    /// leave no cache entry.
    pub fn ensure_glyph<R, B>(
        &mut self,
        rasterizer: &R,
        face: &R::Face,
        backend: &mut B,
        ch: char,
    ) -> RenderResult<bool>
    where
        R: GlyphRasterizer,
        B: RenderBackend,
    {
        match self.slots.get(&ch) {
            Some(GlyphSlot::Ready(_)) => return Ok(true),
            Some(GlyphSlot::Failed) => return Ok(false),
            None => {}
        }

        let glyph = match rasterizer.rasterize(face, ch) {
            Ok(glyph) => glyph,
            Err(e) => {
                log::debug!("Glyph '{}' (U+{:04X}) unavailable: {}", ch, ch as u32, e);
                self.slots.insert(ch, GlyphSlot::Failed);
                return Ok(false);
            }
        };

        let record = upload_glyph(backend, &glyph)?;
        self.slots.insert(ch, GlyphSlot::Ready(record));
        Ok(true)
    }

    /// Look up the record for an already-cached code point.
    ///
    /// Returns `None` for code points that were never ensured or whose
    /// rasterization failed.
    pub fn record(&self, ch: char) -> Option<&GlyphRecord> {
        match self.slots.get(&ch) {
            Some(GlyphSlot::Ready(record)) => Some(record),
            _ => None,
        }
    }

    /// Number of GPU-resident glyphs
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, GlyphSlot::Ready(_)))
            .count()
    }

    /// True when no glyph is resident
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destroy every owned texture through the backend.
    ///
    /// Each texture is destroyed exactly once; the cache is left empty.
    pub fn release_textures<B: RenderBackend>(&mut self, backend: &mut B) -> RenderResult<()> {
        for (_, slot) in self.slots.drain() {
            if let GlyphSlot::Ready(record) = slot {
                backend.destroy_texture(record.texture)?;
            }
        }
        Ok(())
    }
}

/// Build the padded two-channel container for a bitmap and upload it.
fn upload_glyph<B: RenderBackend>(
    backend: &mut B,
    glyph: &RasterizedGlyph,
) -> RenderResult<GlyphRecord> {
    // Empty bitmaps (spaces) still get a container; their uv extent is zero.
    let tex_width = next_power_of_two(glyph.width.max(1));
    let tex_height = next_power_of_two(glyph.height.max(1));

    // Luminance + alpha, identical value in both channels. The container
    // is zero-initialized, so everything outside the bitmap region stays
    // fully transparent.
    let mut pixels = vec![0u8; (tex_width * tex_height * 2) as usize];
    for row in 0..glyph.height {
        for col in 0..glyph.width {
            let value = glyph.coverage[(row * glyph.width + col) as usize];
            let idx = 2 * (row * tex_width + col) as usize;
            pixels[idx] = value;
            pixels[idx + 1] = value;
        }
    }

    let image = TextureImage {
        width: tex_width,
        height: tex_height,
        channels: 2,
        pixels,
    };
    let texture = backend.create_texture(&image, &TextureParams::default())?;

    Ok(GlyphRecord {
        width: glyph.width,
        height: glyph.height,
        tex_width,
        tex_height,
        advance: glyph.advance,
        advance_y: glyph.top - glyph.height as f32,
        left: glyph.left,
        top: glyph.top,
        uv_extent: Vec2::new(
            uv_extent(glyph.width, tex_width),
            uv_extent(glyph.height, tex_height),
        ),
        texture,
    })
}
