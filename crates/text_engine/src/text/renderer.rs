//! Quad emission for laid-out glyphs
//!
//! Converts glyph-space placements into screen-space textured quads.
//! Screen space has +Y pointing down and glyph space +Y up; the vertical
//! flip happens here and only here.

use crate::foundation::math::Vec2;
use crate::render::{RenderBackend, RenderResult, TexturedQuad};

use super::layout::GlyphPlacement;

/// Draw `placements` with the pen starting at `origin` in screen space.
///
/// Blending and texturing state is scoped: saved before the first glyph
/// and restored after the last, even when a draw fails partway through
/// or the placement list is empty. The first draw error is reported
/// after the state has been restored.
pub fn draw_placements<B: RenderBackend>(
    backend: &mut B,
    origin: Vec2,
    placements: &[GlyphPlacement],
) -> RenderResult<()> {
    backend.begin_blended()?;
    let outcome = draw_quads(backend, origin, placements);
    let restored = backend.end_blended();
    outcome.and(restored)
}

fn draw_quads<B: RenderBackend>(
    backend: &mut B,
    origin: Vec2,
    placements: &[GlyphPlacement],
) -> RenderResult<()> {
    let mut pen_x = origin.x;
    for placement in placements {
        // Glyph space to screen space: the quad's top edge sits `top`
        // above the baseline, which is `top` less in screen Y.
        let top = placement.origin.y + placement.size.y;
        let quad = TexturedQuad {
            position: Vec2::new(pen_x + placement.origin.x, origin.y - top),
            size: placement.size,
            uv_min: Vec2::new(0.0, 0.0),
            uv_max: placement.uv_max,
        };
        backend.draw_quad(placement.texture, &quad)?;
        pen_x += placement.advance;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SyntheticRasterizer;
    use crate::render::{HeadlessBackend, RenderError};
    use crate::text::font::Font;
    use crate::text::layout::TextLayout;
    use approx::assert_relative_eq;
    use std::path::Path;

    fn laid_out(
        text: &str,
    ) -> (HeadlessBackend, Vec<GlyphPlacement>) {
        let rasterizer = SyntheticRasterizer::new();
        let mut backend = HeadlessBackend::new();
        let mut font = Font::open(&rasterizer, Path::new("test.ttf"), 16).unwrap();
        let placements = TextLayout::new(&rasterizer, &mut font)
            .layout(&mut backend, text)
            .unwrap();
        (backend, placements)
    }

    #[test]
    fn empty_text_still_brackets_draw_state() {
        let (mut backend, placements) = laid_out("");
        draw_placements(&mut backend, Vec2::new(10.0, 20.0), &placements).unwrap();

        assert!(backend.draws().is_empty());
        assert_eq!(backend.state_saves(), 1);
        assert_eq!(backend.state_depth(), 0);
    }

    #[test]
    fn one_quad_per_placement_with_accumulating_pen() {
        let (mut backend, placements) = laid_out("abc");
        draw_placements(&mut backend, Vec2::new(5.0, 100.0), &placements).unwrap();

        let draws = backend.draws();
        assert_eq!(draws.len(), 3);

        let mut pen_x = 5.0;
        for (draw, placement) in draws.iter().zip(&placements) {
            assert_relative_eq!(draw.quad.position.x, pen_x + placement.origin.x);
            let top = placement.origin.y + placement.size.y;
            assert_relative_eq!(draw.quad.position.y, 100.0 - top);
            assert_relative_eq!(draw.quad.uv_max.x, placement.uv_max.x);
            pen_x += placement.advance;
        }
    }

    #[test]
    fn state_is_restored_when_a_draw_fails() {
        let (mut backend, placements) = laid_out("abc");

        // Destroying a texture between layout and draw forces a draw error.
        backend.destroy_texture(placements[1].texture).unwrap();

        let result = draw_placements(&mut backend, Vec2::new(0.0, 0.0), &placements);
        assert!(matches!(result, Err(RenderError::InvalidTexture(_))));
        assert_eq!(backend.state_depth(), 0);
        assert_eq!(backend.draws().len(), 1);
    }
}
