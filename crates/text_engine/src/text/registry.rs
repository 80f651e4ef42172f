//! Font slot bookkeeping and the current-font binding
//!
//! The registry owns every font by opaque handle and tracks which handle
//! is current: the implicit binding draw and measure calls operate on.
//! The binding is explicit state on the registry value, not process-wide
//! state; callers interleaving fonts rebind between calls.

use std::collections::HashMap;
use std::path::Path;

use crate::config::WarmupRange;
use crate::raster::GlyphRasterizer;
use crate::render::RenderBackend;

use super::font::Font;
use super::{TextError, TextResult};

/// Opaque handle for an allocated font slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Owns every font slot and the current binding
///
/// Handles are issued strictly increasing and never reused. A slot
/// starts unloaded; loading replaces its font wholesale, destroying any
/// textures the previous font owned.
pub struct FontRegistry<R: GlyphRasterizer> {
    rasterizer: R,
    slots: HashMap<FontHandle, Option<Font<R>>>,
    current: Option<FontHandle>,
    next_handle: u32,
}

impl<R: GlyphRasterizer> FontRegistry<R> {
    /// Create an empty registry around a rasterizer
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            slots: HashMap::new(),
            current: None,
            next_handle: 1, // Start from 1, reserve 0 for "no font"
        }
    }

    /// Allocate `n` fresh, unloaded font slots
    pub fn generate(&mut self, n: usize) -> Vec<FontHandle> {
        let mut handles = Vec::with_capacity(n);
        for _ in 0..n {
            let handle = FontHandle(self.next_handle);
            self.next_handle += 1;
            self.slots.insert(handle, None);
            handles.push(handle);
        }
        log::debug!("Allocated {} font slots", n);
        handles
    }

    /// Set the current binding.
    ///
    /// Binding an unloaded slot is legal; draw and measure calls against
    /// it fail with [`TextError::FontNotLoaded`] until a font is loaded.
    pub fn bind(&mut self, handle: FontHandle) -> TextResult<()> {
        if !self.slots.contains_key(&handle) {
            return Err(TextError::InvalidHandle(handle));
        }
        self.current = Some(handle);
        Ok(())
    }

    /// Currently bound handle, if any
    pub fn current(&self) -> Option<FontHandle> {
        self.current
    }

    /// Load a font into `handle`'s slot, replacing whatever was there.
    ///
    /// The previous font's textures are destroyed before the new source
    /// is opened; an open failure therefore leaves the slot unloaded. On
    /// success the `warmup` range, if any, is rasterized eagerly,
    /// continuing through individual glyph failures.
    pub fn load<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        handle: FontHandle,
        path: &Path,
        pixel_size: u32,
        warmup: Option<WarmupRange>,
    ) -> TextResult<()> {
        let slot = self
            .slots
            .get_mut(&handle)
            .ok_or(TextError::InvalidHandle(handle))?;

        // Replace, don't merge: the old font goes away whether or not
        // the new one opens.
        if let Some(mut old) = slot.take() {
            old.release_textures(backend)?;
        }

        let font = match Font::open(&self.rasterizer, path, pixel_size) {
            Ok(font) => font,
            Err(source) => {
                log::warn!("Failed to load font '{}': {}", path.display(), source);
                return Err(TextError::LoadFailed {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let font = slot.insert(font);

        if let Some(range) = warmup {
            // Individual glyphs may be missing from the face; the cache
            // memoizes those and the warm-up moves on.
            for ch in range.chars() {
                font.ensure_glyph(&self.rasterizer, backend, ch)?;
            }
            log::info!(
                "Loaded font '{}' at {}px, warmed {} glyphs",
                path.display(),
                pixel_size,
                font.glyph_count()
            );
        } else {
            log::info!("Loaded font '{}' at {}px", path.display(), pixel_size);
        }

        Ok(())
    }

    /// Destroy the named fonts and free their slots.
    ///
    /// Every handle is validated before anything is destroyed; an unknown
    /// handle fails the whole call. Released handles become unknown to
    /// [`bind`](Self::bind).
    pub fn release<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        handles: &[FontHandle],
    ) -> TextResult<()> {
        for handle in handles {
            if !self.slots.contains_key(handle) {
                return Err(TextError::InvalidHandle(*handle));
            }
        }
        for handle in handles {
            if let Some(Some(mut font)) = self.slots.remove(handle) {
                font.release_textures(backend)?;
            }
            log::debug!("Released font slot {:?}", handle);
        }
        Ok(())
    }

    /// Destroy every font and texture; used on engine teardown
    pub fn release_all<B: RenderBackend>(&mut self, backend: &mut B) -> TextResult<()> {
        for (_, slot) in self.slots.drain() {
            if let Some(mut font) = slot {
                font.release_textures(backend)?;
            }
        }
        self.current = None;
        Ok(())
    }

    /// Resolve the current binding to the rasterizer and its loaded font
    pub fn bound_font_mut(&mut self) -> TextResult<(&R, &mut Font<R>)> {
        let handle = self.current.ok_or(TextError::NoFontBound)?;
        let slot = self
            .slots
            .get_mut(&handle)
            .ok_or(TextError::InvalidHandle(handle))?;
        match slot {
            Some(font) => Ok((&self.rasterizer, font)),
            None => Err(TextError::FontNotLoaded(handle)),
        }
    }

    /// Shared access to the currently bound, loaded font
    pub fn bound_font(&self) -> TextResult<&Font<R>> {
        let handle = self.current.ok_or(TextError::NoFontBound)?;
        match self.slots.get(&handle) {
            Some(Some(font)) => Ok(font),
            Some(None) => Err(TextError::FontNotLoaded(handle)),
            None => Err(TextError::InvalidHandle(handle)),
        }
    }

    /// The rasterizer driving this registry
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SyntheticRasterizer;
    use crate::render::HeadlessBackend;

    fn registry() -> FontRegistry<SyntheticRasterizer> {
        FontRegistry::new(SyntheticRasterizer::new())
    }

    #[test]
    fn handles_are_fresh_and_strictly_increasing() {
        let mut registry = registry();
        let first = registry.generate(3);
        let second = registry.generate(2);

        let all: Vec<u32> = first.iter().chain(&second).map(|h| h.0).collect();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn bind_rejects_unknown_handles() {
        let mut registry = registry();
        let result = registry.bind(FontHandle(99));
        assert!(matches!(result, Err(TextError::InvalidHandle(_))));
    }

    #[test]
    fn binding_an_unloaded_slot_is_legal_but_unusable() {
        let mut registry = registry();
        let handles = registry.generate(1);

        registry.bind(handles[0]).unwrap();
        assert_eq!(registry.current(), Some(handles[0]));
        assert!(matches!(
            registry.bound_font_mut(),
            Err(TextError::FontNotLoaded(_))
        ));
    }

    #[test]
    fn load_rejects_unknown_handles() {
        let mut registry = registry();
        let mut backend = HeadlessBackend::new();
        registry.generate(1);

        let result = registry.load(&mut backend, FontHandle(77), Path::new("a.ttf"), 16, None);
        assert!(matches!(result, Err(TextError::InvalidHandle(_))));
    }

    #[test]
    fn warmup_populates_the_configured_range() {
        let mut registry = registry();
        let mut backend = HeadlessBackend::new();
        let handles = registry.generate(1);
        registry.bind(handles[0]).unwrap();

        let digits = WarmupRange {
            first: 48,
            last: 57,
        };
        registry
            .load(&mut backend, handles[0], Path::new("a.ttf"), 16, Some(digits))
            .unwrap();

        let font = registry.bound_font().unwrap();
        assert_eq!(font.glyph_count(), 10);
        assert_eq!(backend.created_count(), 10);
    }

    #[test]
    fn reload_discards_the_previous_cache() {
        let mut registry = registry();
        let mut backend = HeadlessBackend::new();
        let handles = registry.generate(1);
        registry.bind(handles[0]).unwrap();

        let digits = WarmupRange {
            first: 48,
            last: 57,
        };
        registry
            .load(&mut backend, handles[0], Path::new("a.ttf"), 16, Some(digits))
            .unwrap();
        assert_eq!(backend.live_texture_count(), 10);

        registry
            .load(&mut backend, handles[0], Path::new("b.ttf"), 32, Some(digits))
            .unwrap();

        // The old ten are gone; only the new warm set remains.
        assert_eq!(backend.destroyed_count(), 10);
        assert_eq!(backend.live_texture_count(), 10);
        assert_eq!(registry.bound_font().unwrap().pixel_size(), 32);
    }

    #[test]
    fn release_validates_before_destroying() {
        let mut registry = registry();
        let mut backend = HeadlessBackend::new();
        let handles = registry.generate(2);
        registry.bind(handles[0]).unwrap();
        registry
            .load(
                &mut backend,
                handles[0],
                Path::new("a.ttf"),
                16,
                Some(WarmupRange::ASCII),
            )
            .unwrap();

        let bogus = FontHandle(1234);
        let result = registry.release(&mut backend, &[handles[0], bogus]);
        assert!(matches!(result, Err(TextError::InvalidHandle(_))));
        // Nothing was destroyed by the failed call.
        assert_eq!(backend.destroyed_count(), 0);

        registry.release(&mut backend, &[handles[0], handles[1]]).unwrap();
        assert_eq!(backend.live_texture_count(), 0);
        assert!(matches!(
            registry.bind(handles[0]),
            Err(TextError::InvalidHandle(_))
        ));
    }

    #[test]
    fn release_all_clears_binding_and_textures() {
        let mut registry = registry();
        let mut backend = HeadlessBackend::new();
        let handles = registry.generate(1);
        registry.bind(handles[0]).unwrap();
        registry
            .load(
                &mut backend,
                handles[0],
                Path::new("a.ttf"),
                16,
                Some(WarmupRange::ASCII),
            )
            .unwrap();

        registry.release_all(&mut backend).unwrap();
        assert_eq!(backend.live_texture_count(), 0);
        assert_eq!(registry.current(), None);
    }
}
