//! Engine facade: font slots, binding, drawing, and measurement
//!
//! `TextEngine` owns the rasterizer-driven font registry and the GPU
//! backend, and exposes the string-level operations callers use. All
//! draw and measure calls operate on the currently bound font.

use std::path::Path;

use crate::config::TextEngineConfig;
use crate::foundation::math::Vec2;
use crate::raster::{FontdueRasterizer, GlyphRasterizer};
use crate::render::RenderBackend;
use crate::text::layout::TextLayout;
use crate::text::registry::{FontHandle, FontRegistry};
use crate::text::renderer::draw_placements;
use crate::text::{TextError, TextResult};

/// Text rendering engine over a rasterizer and a GPU backend
///
/// The engine owns every font slot and the binding state; callers
/// interleaving multiple fonts rebind between calls. Dropping the engine
/// releases every GPU texture its fonts own.
pub struct TextEngine<R: GlyphRasterizer, B: RenderBackend> {
    registry: FontRegistry<R>,
    backend: B,
    config: TextEngineConfig,
}

impl<B: RenderBackend> TextEngine<FontdueRasterizer, B> {
    /// Create an engine with the fontdue rasterizer and default config
    pub fn new(backend: B) -> Self {
        Self::with_rasterizer(FontdueRasterizer, backend, TextEngineConfig::default())
    }
}

impl<R: GlyphRasterizer, B: RenderBackend> TextEngine<R, B> {
    /// Create an engine around a custom rasterizer and configuration
    pub fn with_rasterizer(rasterizer: R, backend: B, config: TextEngineConfig) -> Self {
        Self {
            registry: FontRegistry::new(rasterizer),
            backend,
            config,
        }
    }

    /// Allocate `count` fresh font slots
    pub fn generate_fonts(&mut self, count: usize) -> Vec<FontHandle> {
        self.registry.generate(count)
    }

    /// Make `handle` the font used by subsequent draw and measure calls
    pub fn bind_font(&mut self, handle: FontHandle) -> TextResult<()> {
        self.registry.bind(handle)
    }

    /// Load a font into the bound slot and run the configured warm-up
    pub fn load_font(&mut self, path: impl AsRef<Path>, pixel_size: u32) -> TextResult<()> {
        let handle = self.registry.current().ok_or(TextError::NoFontBound)?;
        self.registry.load(
            &mut self.backend,
            handle,
            path.as_ref(),
            pixel_size,
            self.config.warmup,
        )
    }

    /// Render `text` with the pen origin at `(x, y)`.
    ///
    /// Lazily caches any glyph outside the warm set. Glyphs the font
    /// cannot produce are skipped; the rest of the string still draws.
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str) -> TextResult<()> {
        let (rasterizer, font) = self.registry.bound_font_mut()?;
        let placements = TextLayout::new(rasterizer, font).layout(&mut self.backend, text)?;
        draw_placements(&mut self.backend, Vec2::new(x, y), &placements)?;
        Ok(())
    }

    /// Render `text` horizontally centered on `x`
    pub fn draw_text_centered(&mut self, x: f32, y: f32, text: &str) -> TextResult<()> {
        let (rasterizer, font) = self.registry.bound_font_mut()?;
        let mut layout = TextLayout::new(rasterizer, font);
        let offset = layout.centered_origin(&mut self.backend, text)?;
        let placements = layout.layout(&mut self.backend, text)?;
        draw_placements(&mut self.backend, Vec2::new(x + offset, y), &placements)?;
        Ok(())
    }

    /// Total advance of `text` in pixels, populating the cache as needed
    pub fn measure_text_width(&mut self, text: &str) -> TextResult<f32> {
        let (rasterizer, font) = self.registry.bound_font_mut()?;
        TextLayout::new(rasterizer, font).measure(&mut self.backend, text)
    }

    /// Pre-populate the glyph cache for every code point of `text`.
    ///
    /// Pure warm-up: nothing is drawn. Useful for strings known ahead of
    /// time that reach outside the configured warm range.
    pub fn cache_string(&mut self, text: &str) -> TextResult<()> {
        let (rasterizer, font) = self.registry.bound_font_mut()?;
        for ch in text.chars() {
            font.ensure_glyph(rasterizer, &mut self.backend, ch)?;
        }
        Ok(())
    }

    /// Destroy the named fonts and release their GPU textures
    pub fn delete_fonts(&mut self, handles: &[FontHandle]) -> TextResult<()> {
        self.registry.release(&mut self.backend, handles)
    }

    /// Currently bound font handle, if any
    pub fn bound_font(&self) -> Option<FontHandle> {
        self.registry.current()
    }

    /// Pixel size of the currently bound, loaded font
    pub fn font_pixel_size(&self) -> TextResult<u32> {
        Ok(self.registry.bound_font()?.pixel_size())
    }

    /// Baseline-to-baseline distance of the currently bound, loaded font
    pub fn font_line_height(&self) -> TextResult<f32> {
        Ok(self.registry.bound_font()?.line_height())
    }

    /// Engine configuration
    pub fn config(&self) -> &TextEngineConfig {
        &self.config
    }

    /// The GPU backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the GPU backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<R: GlyphRasterizer, B: RenderBackend> Drop for TextEngine<R, B> {
    fn drop(&mut self) {
        if let Err(e) = self.registry.release_all(&mut self.backend) {
            log::warn!("Texture release during engine teardown failed: {}", e);
        }
    }
}
