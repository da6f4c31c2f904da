//! GPU-side presentation of fields.
//!
//! This module turns [`Field`](crate::field::Field)s into visible shapes:
//! - Plug a graphics API in by implementing [`RenderBackend`].
//! - Drive uploads and draws through [`FieldRenderer`].
//! - Tune a draw with [`DrawParams`] and [`PowerAxis`].
use glam::Vec4;

pub mod backend;
pub mod renderer;
mod shaders;

pub use backend::{
    AttributeLocation, DrawCall, ProgramHandle, RenderBackend, ShaderHandle, ShaderStage,
    TextureDesc, TextureFilter, TextureHandle, TextureWrap, UniformLocation, UniformValue,
    Viewport,
};
pub use renderer::{DrawParams, FieldRenderer, PowerAxis};

/// Straight-alpha RGBA color with `f32` components.
///
/// The alpha component scales the field mask rather than the color channels;
/// the fragment stage outputs `(r, g, b, mask * a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with a replaced alpha component.
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Component order matches the `f_color` uniform layout.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
