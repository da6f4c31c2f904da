//! Rendering backend capability consumed by [`FieldRenderer`].
//!
//! This module defines how a concrete graphics API plugs into the renderer:
//! - Implement [`RenderBackend`] over your context (GL, wgpu, a test double).
//! - Handles ([`ShaderHandle`], [`ProgramHandle`], [`TextureHandle`]) are
//!   opaque tokens minted by the backend; the renderer never interprets them.
//! - Draws are submitted as a single [`DrawCall`] value, which keeps doubles
//!   trivial to record and assert against.
//!
//! All calls must happen on the thread owning the active rendering context;
//! the trait deliberately carries no `Send`/`Sync` bounds.
//!
//! [`FieldRenderer`]: crate::render::FieldRenderer
use glam::{Mat4, Vec4};

use crate::error::Result;

/// Pipeline stage a shader source targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Opaque handle to a compiled shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to a linked program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Opaque handle to a 2D texture. Callers own these and their lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolved location of a program uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Resolved location of a vertex attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeLocation(pub i32);

/// Value assigned to a uniform for the duration of one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec4(Vec4),
    Mat4(Mat4),
    /// Texture unit index for a sampler uniform.
    Sampler(i32),
}

/// Texture filtering mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToBorder,
    ClampToEdge,
    Repeat,
}

/// Storage and sampling parameters for a single-channel float texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap: TextureWrap,
}

/// Current viewport rectangle in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One triangle-list submission.
///
/// `vertices` holds 2-component positions, three per triangle, bound to
/// `position_attribute`. Uniform assignments and texture-unit bindings apply
/// only for this call.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    pub program: ProgramHandle,
    pub position_attribute: AttributeLocation,
    pub vertices: &'a [[f32; 2]],
    pub uniforms: &'a [(UniformLocation, UniformValue)],
    pub textures: &'a [(u32, TextureHandle)],
}

/// Capability contract for compiling programs, managing float textures, and
/// submitting draws.
///
/// Compile and link failures carry the backend's diagnostic text in
/// [`Error::Backend`]; everything else is treated as infallible at this
/// layer.
///
/// [`Error::Backend`]: crate::error::Error::Backend
pub trait RenderBackend {
    /// Compiles a shader from source.
    fn compile(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle>;

    /// Links shaders into a program.
    fn link(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle>;

    /// Releases a shader. Linked programs are unaffected.
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Releases a program.
    fn delete_program(&mut self, program: ProgramHandle);

    /// Resolves a uniform by name, `None` if the program does not expose it.
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Resolves a vertex attribute by name.
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation>;

    /// Mints a new texture handle.
    fn create_texture(&mut self) -> TextureHandle;

    /// Releases a texture handle.
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Allocates or replaces single-channel float storage for `texture`.
    fn texture_image_r32f(&mut self, texture: TextureHandle, desc: &TextureDesc, samples: &[f32]);

    /// Queries the active viewport.
    fn viewport(&self) -> Viewport;

    /// Submits a triangle list.
    fn draw(&mut self, call: DrawCall<'_>);
}
