//! Synthetic rasterizer for tests and headless tooling
//!
//! Produces deterministic solid-block glyphs without touching the
//! filesystem or a font library, the same role the headless drivers play
//! in display stacks: every code point gets a coverage block whose
//! dimensions derive from the pixel size, with a fixed advance, so cache
//! and layout behavior can be asserted exactly.

use std::cell::Cell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{GlyphRasterizer, RasterError, RasterResult, RasterizedGlyph};

/// Deterministic rasterizer producing solid-block glyphs.
///
/// Code points registered as missing fail with
/// [`RasterError::GlyphNotFound`], and every `rasterize` call is counted,
/// which lets tests assert cache hits and failure memoization.
#[derive(Debug, Default)]
pub struct SyntheticRasterizer {
    missing: HashSet<char>,
    unopenable: HashSet<PathBuf>,
    calls: Cell<usize>,
}

/// A synthetic face: just the pixel size it was opened at
#[derive(Debug, Clone, Copy)]
pub struct SyntheticFace {
    /// Pixel size passed to `open`
    pub pixel_size: u32,
}

impl SyntheticRasterizer {
    /// Create a rasterizer where every code point has a glyph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rasterizer that reports the given code points as absent
    pub fn with_missing(missing: impl IntoIterator<Item = char>) -> Self {
        Self {
            missing: missing.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Create a rasterizer that refuses to open the given paths
    pub fn with_unopenable<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            unopenable: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of `rasterize` calls made so far, hits and failures alike
    pub fn rasterize_calls(&self) -> usize {
        self.calls.get()
    }
}

impl GlyphRasterizer for SyntheticRasterizer {
    type Face = SyntheticFace;

    fn open(&self, path: &Path, pixel_size: u32) -> RasterResult<Self::Face> {
        if self.unopenable.contains(path) {
            return Err(RasterError::OpenFailed {
                path: path.display().to_string(),
                reason: "synthetic open failure".to_string(),
            });
        }
        Ok(SyntheticFace { pixel_size })
    }

    fn rasterize(&self, face: &Self::Face, ch: char) -> RasterResult<RasterizedGlyph> {
        self.calls.set(self.calls.get() + 1);

        if self.missing.contains(&ch) {
            return Err(RasterError::GlyphNotFound(ch));
        }

        // Spaces rasterize to an empty bitmap but still advance the pen.
        let (width, height) = if ch == ' ' {
            (0, 0)
        } else {
            let width = face.pixel_size / 2 + (ch as u32) % 4;
            let height = (face.pixel_size * 3) / 4;
            (width.max(1), height.max(1))
        };

        Ok(RasterizedGlyph {
            width,
            height,
            coverage: vec![0xFF; (width * height) as usize],
            left: 1.0,
            top: height as f32,
            advance: (width + 2) as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_are_deterministic() {
        let rasterizer = SyntheticRasterizer::new();
        let face = rasterizer.open(Path::new("any.ttf"), 16).unwrap();

        let a = rasterizer.rasterize(&face, 'A').unwrap();
        let b = rasterizer.rasterize(&face, 'A').unwrap();
        assert_eq!(a.width, b.width);
        assert_eq!(a.height, b.height);
        assert_eq!(a.advance, b.advance);
        assert_eq!(a.coverage.len(), (a.width * a.height) as usize);
        assert_eq!(rasterizer.rasterize_calls(), 2);
    }

    #[test]
    fn space_is_empty_but_advances() {
        let rasterizer = SyntheticRasterizer::new();
        let face = rasterizer.open(Path::new("any.ttf"), 16).unwrap();

        let space = rasterizer.rasterize(&face, ' ').unwrap();
        assert_eq!(space.width, 0);
        assert_eq!(space.height, 0);
        assert!(space.coverage.is_empty());
        assert!(space.advance > 0.0);
    }

    #[test]
    fn missing_code_points_fail() {
        let rasterizer = SyntheticRasterizer::with_missing(['\u{FFFD}']);
        let face = rasterizer.open(Path::new("any.ttf"), 16).unwrap();

        let result = rasterizer.rasterize(&face, '\u{FFFD}');
        assert!(matches!(result, Err(RasterError::GlyphNotFound(_))));
    }
}
