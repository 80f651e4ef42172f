//! fontdue-backed rasterizer
//!
//! Pure Rust glyph rasterization via the `fontdue` crate.

use std::path::Path;

use fontdue::{Font, FontSettings};

use super::{GlyphRasterizer, RasterError, RasterResult, RasterizedGlyph};

/// Rasterizer backed by the `fontdue` crate.
///
/// Faces are parsed once on open; each `rasterize` call produces a fresh
/// coverage bitmap at the face's pixel size.
#[derive(Debug, Default, Clone)]
pub struct FontdueRasterizer;

/// An opened fontdue face fixed at one pixel size
pub struct FontdueFace {
    font: Font,
    pixel_size: u32,
}

impl GlyphRasterizer for FontdueRasterizer {
    type Face = FontdueFace;

    fn open(&self, path: &Path, pixel_size: u32) -> RasterResult<Self::Face> {
        let bytes = std::fs::read(path).map_err(|e| RasterError::OpenFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let font =
            Font::from_bytes(bytes, FontSettings::default()).map_err(|e| RasterError::OpenFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        log::info!("Opened font '{}' at {}px", path.display(), pixel_size);

        Ok(FontdueFace { font, pixel_size })
    }

    fn rasterize(&self, face: &Self::Face, ch: char) -> RasterResult<RasterizedGlyph> {
        if face.font.lookup_glyph_index(ch) == 0 {
            return Err(RasterError::GlyphNotFound(ch));
        }

        let (metrics, coverage) = face.font.rasterize(ch, face.pixel_size as f32);

        // fontdue reports the bitmap offset from the baseline through
        // xmin/ymin; the top bearing is the bitmap's upper edge.
        Ok(RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
            left: metrics.xmin as f32,
            top: (metrics.ymin + metrics.height as i32) as f32,
            advance: metrics.advance_width.floor(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fails_for_missing_file() {
        let rasterizer = FontdueRasterizer;
        let result = rasterizer.open(Path::new("no/such/font.ttf"), 24);
        assert!(matches!(result, Err(RasterError::OpenFailed { .. })));
    }

    #[test]
    fn open_fails_for_garbage_data() {
        let dir = std::env::temp_dir();
        let path = dir.join("text_engine_not_a_font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let rasterizer = FontdueRasterizer;
        let result = rasterizer.open(&path, 24);
        assert!(matches!(result, Err(RasterError::OpenFailed { .. })));

        std::fs::remove_file(&path).ok();
    }
}
