//! Backend abstraction traits for texture upload and quad drawing
//!
//! This module defines the trait that rendering backends implement to
//! provide a consistent interface for the text renderer, along with the
//! texture and quad vocabulary shared between the engine and backends.

use crate::foundation::math::Vec2;

use super::RenderResult;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureParams {
    /// Texture filtering mode
    pub filter_mode: FilterMode,
    /// Texture wrapping mode
    pub wrap_mode: WrapMode,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Linear,
            wrap_mode: WrapMode::ClampToEdge,
        }
    }
}

/// Pixel data staged for upload
///
/// `channels` is the number of bytes per pixel. Glyph uploads use 2:
/// luminance and alpha, with identical values in both channels.
#[derive(Debug, Clone)]
pub struct TextureImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per pixel
    pub channels: u8,
    /// Row-major pixel data, `width * height * channels` bytes
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Expected length of `pixels` for the stated dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * usize::from(self.channels)
    }
}

/// A textured quad in screen space
///
/// `position` is the top-left corner with +Y pointing down; `uv_min`
/// maps to that corner and `uv_max` to the bottom-right one.
#[derive(Debug, Clone, Copy)]
pub struct TexturedQuad {
    /// Top-left corner in screen space
    pub position: Vec2,
    /// Quad extent in pixels
    pub size: Vec2,
    /// Texture coordinates at the top-left corner
    pub uv_min: Vec2,
    /// Texture coordinates at the bottom-right corner
    pub uv_max: Vec2,
}

/// Texture upload and quad drawing backend
///
/// This trait abstracts over rendering backends and provides the
/// operations the text renderer needs. Backends are single-threaded and
/// synchronous; every call runs to completion before the next begins.
pub trait RenderBackend {
    /// Upload pixel data as a new texture and return an opaque handle.
    fn create_texture(
        &mut self,
        image: &TextureImage,
        params: &TextureParams,
    ) -> RenderResult<TextureHandle>;

    /// Destroy a texture previously returned by
    /// [`create_texture`](Self::create_texture).
    ///
    /// Destroying a handle twice is an error, not a no-op.
    fn destroy_texture(&mut self, handle: TextureHandle) -> RenderResult<()>;

    /// Save the current draw state and enable alpha-blended texturing.
    fn begin_blended(&mut self) -> RenderResult<()>;

    /// Restore the draw state saved by the matching
    /// [`begin_blended`](Self::begin_blended).
    fn end_blended(&mut self) -> RenderResult<()>;

    /// Draw a textured quad with the currently active draw state.
    fn draw_quad(&mut self, texture: TextureHandle, quad: &TexturedQuad) -> RenderResult<()>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    fn create_texture(
        &mut self,
        image: &TextureImage,
        params: &TextureParams,
    ) -> RenderResult<TextureHandle> {
        (**self).create_texture(image, params)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> RenderResult<()> {
        (**self).destroy_texture(handle)
    }

    fn begin_blended(&mut self) -> RenderResult<()> {
        (**self).begin_blended()
    }

    fn end_blended(&mut self) -> RenderResult<()> {
        (**self).end_blended()
    }

    fn draw_quad(&mut self, texture: TextureHandle, quad: &TexturedQuad) -> RenderResult<()> {
        (**self).draw_quad(texture, quad)
    }
}
