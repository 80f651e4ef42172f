//! A loaded font: an opened rasterization face plus its glyph cache

use std::path::{Path, PathBuf};

use crate::raster::{GlyphRasterizer, RasterResult};
use crate::render::{RenderBackend, RenderResult};

use super::glyph_cache::{GlyphCache, GlyphRecord};

/// One loaded font at a fixed pixel size
///
/// Owns the opened face and every GPU texture its cache has created.
/// Replacing the font in a registry slot discards the cache wholesale;
/// caches are never merged across loads.
pub struct Font<R: GlyphRasterizer> {
    path: PathBuf,
    pixel_size: u32,
    face: R::Face,
    cache: GlyphCache,
}

impl<R: GlyphRasterizer> Font<R> {
    /// Open `path` at `pixel_size` with an empty glyph cache
    pub fn open(rasterizer: &R, path: &Path, pixel_size: u32) -> RasterResult<Self> {
        let face = rasterizer.open(path, pixel_size)?;
        Ok(Self {
            path: path.to_path_buf(),
            pixel_size,
            face,
            cache: GlyphCache::new(),
        })
    }

    /// Pixel size the face was opened at
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Source path of the font
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distance between baselines for this font
    pub fn line_height(&self) -> f32 {
        self.pixel_size as f32 * 1.2 // 120% of pixel size is a reasonable default
    }

    /// Number of GPU-resident glyphs
    pub fn glyph_count(&self) -> usize {
        self.cache.len()
    }

    /// Ensure `ch` is cached; see [`GlyphCache::ensure_glyph`]
    pub fn ensure_glyph<B: RenderBackend>(
        &mut self,
        rasterizer: &R,
        backend: &mut B,
        ch: char,
    ) -> RenderResult<bool> {
        self.cache.ensure_glyph(rasterizer, &self.face, backend, ch)
    }

    /// Cached record for `ch`, if rasterization previously succeeded
    pub fn record(&self, ch: char) -> Option<&GlyphRecord> {
        self.cache.record(ch)
    }

    /// Destroy every texture owned by this font's cache
    pub fn release_textures<B: RenderBackend>(&mut self, backend: &mut B) -> RenderResult<()> {
        self.cache.release_textures(backend)
    }
}
