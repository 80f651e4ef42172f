//! # Text Engine
//!
//! A lazy glyph-cache text rendering engine with pluggable rasterization
//! and GPU backends.
//!
//! Glyphs are rasterized on first use, uploaded into their own
//! power-of-two GPU texture, and composited as alpha-blended quads along
//! a baseline. Measurement and rendering read the same cached metrics,
//! so string widths always agree with quad placement.
//!
//! ## Architecture
//!
//! - **Rasterization** is behind the [`raster::GlyphRasterizer`] trait;
//!   the default implementation uses `fontdue`.
//! - **GPU access** is behind the [`render::RenderBackend`] trait; the
//!   crate ships a recording [`render::HeadlessBackend`] for tests and
//!   headless measurement.
//! - **The core** lives in [`text`]: per-font glyph caches, the font
//!   registry with its current binding, the layout walk, and the quad
//!   renderer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = TextEngine::new(HeadlessBackend::new());
//!
//!     let fonts = engine.generate_fonts(1);
//!     engine.bind_font(fonts[0])?;
//!     engine.load_font("resources/fonts/default.ttf", 24)?;
//!
//!     let width = engine.measure_text_width("Hello, world!")?;
//!     engine.draw_text_centered(320.0, 240.0, "Hello, world!")?;
//!     assert!(width > 0.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod raster;
pub mod render;
pub mod text;

mod engine;

pub use engine::TextEngine;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{TextEngineConfig, WarmupRange},
        foundation::math::Vec2,
        raster::{FontdueRasterizer, GlyphRasterizer, RasterizedGlyph},
        render::{HeadlessBackend, RenderBackend, TextureHandle},
        text::{FontHandle, TextError, TextResult},
        TextEngine,
    };
}
