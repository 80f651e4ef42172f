//! Math utilities and types
//!
//! Provides the fundamental math types used for glyph metrics, texture
//! coordinates, and quad geometry.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;
