//! Recording backend for tests and headless measurement
//!
//! Keeps every upload and draw in memory so callers can assert on GPU
//! traffic without a device. Handle misuse that a real backend's
//! validation layer would flag (draws against destroyed textures, double
//! destroys, unbalanced state restores) fails loudly here too.

use std::collections::HashMap;

use super::{
    RenderBackend, RenderError, RenderResult, TextureHandle, TextureImage, TextureParams,
    TexturedQuad,
};

/// A texture kept alive by the headless backend
#[derive(Debug, Clone)]
pub struct HeadlessTexture {
    /// The uploaded pixel data
    pub image: TextureImage,
    /// Creation parameters
    pub params: TextureParams,
}

/// One recorded draw call
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    /// Texture the quad sampled from
    pub texture: TextureHandle,
    /// The emitted quad
    pub quad: TexturedQuad,
}

/// In-memory recording backend
///
/// Tracks live textures with their pixel data, allocation and
/// destruction counters, recorded draw calls, and the draw state
/// nesting depth.
#[derive(Debug)]
pub struct HeadlessBackend {
    textures: HashMap<TextureHandle, HeadlessTexture>,
    next_handle: u32,
    created: usize,
    destroyed: usize,
    draws: Vec<DrawCall>,
    state_depth: usize,
    state_saves: usize,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_handle: 1, // Start from 1, reserve 0 for "no texture"
            created: 0,
            destroyed: 0,
            draws: Vec::new(),
            state_depth: 0,
            state_saves: 0,
        }
    }

    /// Number of textures currently alive
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Total number of textures ever created
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Total number of textures destroyed
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Recorded draw calls, in submission order
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Number of completed save/restore brackets
    pub fn state_saves(&self) -> usize {
        self.state_saves
    }

    /// Current save/restore nesting depth
    pub fn state_depth(&self) -> usize {
        self.state_depth
    }

    /// Look up a live texture
    pub fn texture(&self, handle: TextureHandle) -> Option<&HeadlessTexture> {
        self.textures.get(&handle)
    }

    /// Forget recorded draw calls, keeping textures alive
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_texture(
        &mut self,
        image: &TextureImage,
        params: &TextureParams,
    ) -> RenderResult<TextureHandle> {
        if image.pixels.len() != image.expected_len() {
            return Err(RenderError::TextureCreationFailed(format!(
                "pixel buffer is {} bytes, expected {}",
                image.pixels.len(),
                image.expected_len()
            )));
        }

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.textures.insert(
            handle,
            HeadlessTexture {
                image: image.clone(),
                params: params.clone(),
            },
        );

        log::debug!(
            "Created texture {:?} ({}x{}, {} channels)",
            handle,
            image.width,
            image.height,
            image.channels
        );

        Ok(handle)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> RenderResult<()> {
        if self.textures.remove(&handle).is_none() {
            return Err(RenderError::InvalidTexture(handle));
        }
        self.destroyed += 1;
        log::debug!("Destroyed texture {:?}", handle);
        Ok(())
    }

    fn begin_blended(&mut self) -> RenderResult<()> {
        self.state_depth += 1;
        Ok(())
    }

    fn end_blended(&mut self) -> RenderResult<()> {
        if self.state_depth == 0 {
            return Err(RenderError::StateUnderflow);
        }
        self.state_depth -= 1;
        self.state_saves += 1;
        Ok(())
    }

    fn draw_quad(&mut self, texture: TextureHandle, quad: &TexturedQuad) -> RenderResult<()> {
        if !self.textures.contains_key(&texture) {
            return Err(RenderError::InvalidTexture(texture));
        }
        if self.state_depth == 0 {
            return Err(RenderError::DrawFailed(
                "draw outside a blended state bracket".to_string(),
            ));
        }
        self.draws.push(DrawCall {
            texture,
            quad: *quad,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn image_2x2() -> TextureImage {
        TextureImage {
            width: 2,
            height: 2,
            channels: 2,
            pixels: vec![0; 8],
        }
    }

    fn quad() -> TexturedQuad {
        TexturedQuad {
            position: Vec2::new(0.0, 0.0),
            size: Vec2::new(2.0, 2.0),
            uv_min: Vec2::new(0.0, 0.0),
            uv_max: Vec2::new(1.0, 1.0),
        }
    }

    #[test]
    fn create_and_destroy_are_paired() {
        let mut backend = HeadlessBackend::new();
        let handle = backend
            .create_texture(&image_2x2(), &TextureParams::default())
            .unwrap();
        assert_eq!(backend.live_texture_count(), 1);

        backend.destroy_texture(handle).unwrap();
        assert_eq!(backend.live_texture_count(), 0);
        assert_eq!(backend.created_count(), 1);
        assert_eq!(backend.destroyed_count(), 1);
    }

    #[test]
    fn double_destroy_is_an_error() {
        let mut backend = HeadlessBackend::new();
        let handle = backend
            .create_texture(&image_2x2(), &TextureParams::default())
            .unwrap();
        backend.destroy_texture(handle).unwrap();

        let result = backend.destroy_texture(handle);
        assert!(matches!(result, Err(RenderError::InvalidTexture(_))));
    }

    #[test]
    fn rejects_short_pixel_buffer() {
        let mut backend = HeadlessBackend::new();
        let image = TextureImage {
            width: 4,
            height: 4,
            channels: 2,
            pixels: vec![0; 3],
        };
        let result = backend.create_texture(&image, &TextureParams::default());
        assert!(matches!(
            result,
            Err(RenderError::TextureCreationFailed(_))
        ));
    }

    #[test]
    fn draw_requires_live_texture_and_state() {
        let mut backend = HeadlessBackend::new();
        let handle = backend
            .create_texture(&image_2x2(), &TextureParams::default())
            .unwrap();

        // Outside a bracket
        assert!(backend.draw_quad(handle, &quad()).is_err());

        backend.begin_blended().unwrap();
        backend.draw_quad(handle, &quad()).unwrap();
        backend.end_blended().unwrap();
        assert_eq!(backend.draws().len(), 1);

        backend.destroy_texture(handle).unwrap();
        backend.begin_blended().unwrap();
        let result = backend.draw_quad(handle, &quad());
        assert!(matches!(result, Err(RenderError::InvalidTexture(_))));
        backend.end_blended().unwrap();
    }

    #[test]
    fn unbalanced_restore_is_an_error() {
        let mut backend = HeadlessBackend::new();
        assert!(matches!(
            backend.end_blended(),
            Err(RenderError::StateUnderflow)
        ));

        backend.begin_blended().unwrap();
        backend.end_blended().unwrap();
        assert_eq!(backend.state_saves(), 1);
        assert_eq!(backend.state_depth(), 0);
    }
}
