//! Field renderer: program lifecycle, texture upload, and quad draws.
//!
//! [`FieldRenderer`] owns two GPU programs built from the embedded sources in
//! this module's sibling `shaders` module: a plain field draw and a
//! dual-field morph blend. It is generic over a [`RenderBackend`] so a real
//! context and a recording test double share one code path.
use glam::Mat4;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::field::Field;
use crate::render::backend::{
    AttributeLocation, DrawCall, ProgramHandle, RenderBackend, ShaderStage, TextureDesc,
    TextureFilter, TextureHandle, TextureWrap, UniformLocation, UniformValue, Viewport,
};
use crate::render::shaders;
use crate::render::Rgba;

/// Full-viewport quad, two triangles in normalized device coordinates.
const QUAD: [[f32; 2]; 6] = [
    [-1.0, 1.0],
    [1.0, 1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [-1.0, -1.0],
    [1.0, -1.0],
];

/// Viewport axis the draw power scales with.
///
/// Field samples are stored in normalized units, but the visible fade edge
/// should keep a pixel-proportional width. Scaling the power uniform by a
/// viewport dimension at draw time reconciles the two without
/// re-rasterizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerAxis {
    /// Scale power by the viewport width.
    Width,
    /// Scale power by the viewport height.
    #[default]
    Height,
}

impl PowerAxis {
    fn extent(self, viewport: Viewport) -> f32 {
        match self {
            PowerAxis::Width => viewport.width as f32,
            PowerAxis::Height => viewport.height as f32,
        }
    }
}

/// Per-draw parameters: color, edge power, and the two affine transforms.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    /// Flat color; alpha scales the computed mask.
    pub color: Rgba,
    /// Edge sharpness before viewport scaling (see [`PowerAxis`]).
    pub power: f32,
    /// Position transform applied to the unit quad.
    pub mvp: Mat4,
    /// Transform applied to the derived texture coordinates.
    pub tex_mvp: Mat4,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            power: 1.0,
            mvp: Mat4::IDENTITY,
            tex_mvp: Mat4::IDENTITY,
        }
    }
}

impl DrawParams {
    /// Creates parameters with identity transforms.
    pub fn new(color: Rgba, power: f32) -> Self {
        Self {
            color,
            power,
            ..Default::default()
        }
    }

    /// Sets the position transform.
    pub fn with_mvp(mut self, mvp: Mat4) -> Self {
        self.mvp = mvp;
        self
    }

    /// Sets the texture-coordinate transform.
    pub fn with_tex_mvp(mut self, tex_mvp: Mat4) -> Self {
        self.tex_mvp = tex_mvp;
        self
    }
}

struct RenderProgram {
    program: ProgramHandle,
    a_pos: AttributeLocation,
    u_mvp: UniformLocation,
    u_tex_mvp: UniformLocation,
    u_color: UniformLocation,
    u_power: UniformLocation,
    u_field: UniformLocation,
}

struct MorphProgram {
    program: ProgramHandle,
    a_pos: AttributeLocation,
    u_mvp: UniformLocation,
    u_tex_mvp: UniformLocation,
    u_color: UniformLocation,
    u_power: UniformLocation,
    u_progress: UniformLocation,
    u_field_a: UniformLocation,
    u_field_b: UniformLocation,
}

/// Both linked programs with every location resolved. Held behind an
/// `Option` so partial initialization is unrepresentable.
struct Programs {
    render: RenderProgram,
    morph: MorphProgram,
}

/// Draws [`Field`] textures with power/threshold shaping, color, affine
/// transforms, and dual-texture morphing.
///
/// The renderer owns its backend and its two program handles. Field textures
/// are caller-owned: create them through [`RenderBackend::create_texture`]
/// (or [`FieldRenderer::upload_new`]) and release them when done.
///
/// Lifecycle: constructed uninitialized, [`init`](FieldRenderer::init) once,
/// draw, [`uninit`](FieldRenderer::uninit) or drop. Draw calls on an
/// uninitialized renderer are silent no-ops.
pub struct FieldRenderer<B: RenderBackend> {
    backend: B,
    power_axis: PowerAxis,
    programs: Option<Programs>,
}

impl<B: RenderBackend> FieldRenderer<B> {
    /// Creates an uninitialized renderer over `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            power_axis: PowerAxis::default(),
            programs: None,
        }
    }

    /// Sets the power scaling axis.
    pub fn with_power_axis(mut self, power_axis: PowerAxis) -> Self {
        self.power_axis = power_axis;
        self
    }

    pub fn set_power_axis(&mut self, power_axis: PowerAxis) {
        self.power_axis = power_axis;
    }

    pub fn power_axis(&self) -> PowerAxis {
        self.power_axis
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether [`init`](FieldRenderer::init) has run.
    pub fn is_init(&self) -> bool {
        self.programs.is_some()
    }

    /// Compiles and links both programs and caches their locations.
    ///
    /// Fails with [`Error::State`] when already initialized. Backend compile
    /// and link errors propagate untranslated; on any failure every resource
    /// created so far is released and the renderer stays uninitialized.
    pub fn init(&mut self) -> Result<()> {
        if self.is_init() {
            return Err(Error::State("already initialized".into()));
        }

        let render = build_render_program(&mut self.backend)?;
        let morph = match build_morph_program(&mut self.backend) {
            Ok(morph) => morph,
            Err(err) => {
                self.backend.delete_program(render.program);
                return Err(err);
            }
        };

        debug!("Linked field render and morph programs.");
        self.programs = Some(Programs { render, morph });
        Ok(())
    }

    /// Releases both programs and returns to the uninitialized state.
    ///
    /// Kept distinct from drop so the caller can pick the release point
    /// while the rendering context is still current.
    pub fn uninit(&mut self) -> Result<()> {
        match self.programs.take() {
            Some(programs) => {
                self.backend.delete_program(programs.render.program);
                self.backend.delete_program(programs.morph.program);
                debug!("Released field render and morph programs.");
                Ok(())
            }
            None => Err(Error::State("not initialized".into())),
        }
    }

    /// Fills `texture` with the field's samples as single-channel float
    /// storage, linear filtering, edges clamped to border.
    pub fn upload(&mut self, field: &Field, texture: TextureHandle) {
        let desc = TextureDesc {
            width: field.width(),
            height: field.height(),
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
            wrap: TextureWrap::ClampToBorder,
        };
        trace!("Uploading {}x{} field texture.", desc.width, desc.height);
        self.backend.texture_image_r32f(texture, &desc, field.samples());
    }

    /// Creates a texture and uploads `field` into it. The caller owns the
    /// returned handle.
    pub fn upload_new(&mut self, field: &Field) -> TextureHandle {
        let texture = self.backend.create_texture();
        self.upload(field, texture);
        texture
    }

    /// Draws a full-viewport quad sampling `texture` through the render
    /// program. Silently does nothing when uninitialized.
    pub fn render(&mut self, texture: TextureHandle, params: &DrawParams) {
        let programs = match &self.programs {
            Some(programs) => programs,
            None => {
                warn!("Skipping field draw, renderer is not initialized.");
                return;
            }
        };
        let prog = &programs.render;

        let power = params.power * self.power_axis.extent(self.backend.viewport());
        let uniforms = [
            (prog.u_field, UniformValue::Sampler(0)),
            (prog.u_color, UniformValue::Vec4(params.color.to_vec4())),
            (prog.u_power, UniformValue::Float(power)),
            (prog.u_mvp, UniformValue::Mat4(params.mvp)),
            (prog.u_tex_mvp, UniformValue::Mat4(params.tex_mvp)),
        ];

        self.backend.draw(DrawCall {
            program: prog.program,
            position_attribute: prog.a_pos,
            vertices: &QUAD,
            uniforms: &uniforms,
            textures: &[(0, texture)],
        });
    }

    /// Draws the morph blend of two field textures, `progress` worth of
    /// `texture_b` over `texture_a`. Same contract as
    /// [`render`](FieldRenderer::render).
    pub fn render_morph(
        &mut self,
        texture_a: TextureHandle,
        texture_b: TextureHandle,
        progress: f32,
        params: &DrawParams,
    ) {
        let programs = match &self.programs {
            Some(programs) => programs,
            None => {
                warn!("Skipping morph draw, renderer is not initialized.");
                return;
            }
        };
        let prog = &programs.morph;

        let power = params.power * self.power_axis.extent(self.backend.viewport());
        let uniforms = [
            (prog.u_field_a, UniformValue::Sampler(0)),
            (prog.u_field_b, UniformValue::Sampler(1)),
            (prog.u_progress, UniformValue::Float(progress)),
            (prog.u_color, UniformValue::Vec4(params.color.to_vec4())),
            (prog.u_power, UniformValue::Float(power)),
            (prog.u_mvp, UniformValue::Mat4(params.mvp)),
            (prog.u_tex_mvp, UniformValue::Mat4(params.tex_mvp)),
        ];

        self.backend.draw(DrawCall {
            program: prog.program,
            position_attribute: prog.a_pos,
            vertices: &QUAD,
            uniforms: &uniforms,
            textures: &[(0, texture_a), (1, texture_b)],
        });
    }
}

impl<B: RenderBackend> Drop for FieldRenderer<B> {
    fn drop(&mut self) {
        // Discards only the "not initialized" condition.
        let _ = self.uninit();
    }
}

fn link_program<B: RenderBackend>(
    backend: &mut B,
    vert_src: &str,
    frag_src: &str,
) -> Result<ProgramHandle> {
    let vert = backend.compile(ShaderStage::Vertex, vert_src)?;
    let frag = match backend.compile(ShaderStage::Fragment, frag_src) {
        Ok(frag) => frag,
        Err(err) => {
            backend.delete_shader(vert);
            return Err(err);
        }
    };

    // Shaders are no longer needed once the program exists, and they are
    // equally stale if linking failed.
    let program = backend.link(&[vert, frag]);
    backend.delete_shader(vert);
    backend.delete_shader(frag);
    program
}

fn build_render_program<B: RenderBackend>(backend: &mut B) -> Result<RenderProgram> {
    let program = link_program(backend, shaders::QUAD_VERT, shaders::FIELD_FRAG)?;

    let locations = (|| -> Result<RenderProgram> {
        Ok(RenderProgram {
            program,
            a_pos: attribute(backend, program, "v_pos")?,
            u_mvp: uniform(backend, program, "u_mvp")?,
            u_tex_mvp: uniform(backend, program, "u_tex_mvp")?,
            u_color: uniform(backend, program, "f_color")?,
            u_power: uniform(backend, program, "f_power")?,
            u_field: uniform(backend, program, "f_field")?,
        })
    })();

    match locations {
        Ok(resolved) => Ok(resolved),
        Err(err) => {
            backend.delete_program(program);
            Err(err)
        }
    }
}

fn build_morph_program<B: RenderBackend>(backend: &mut B) -> Result<MorphProgram> {
    let program = link_program(backend, shaders::QUAD_VERT, shaders::MORPH_FRAG)?;

    let locations = (|| -> Result<MorphProgram> {
        Ok(MorphProgram {
            program,
            a_pos: attribute(backend, program, "v_pos")?,
            u_mvp: uniform(backend, program, "u_mvp")?,
            u_tex_mvp: uniform(backend, program, "u_tex_mvp")?,
            u_color: uniform(backend, program, "f_color")?,
            u_power: uniform(backend, program, "f_power")?,
            u_progress: uniform(backend, program, "f_progress")?,
            u_field_a: uniform(backend, program, "f_field_a")?,
            u_field_b: uniform(backend, program, "f_field_b")?,
        })
    })();

    match locations {
        Ok(resolved) => Ok(resolved),
        Err(err) => {
            backend.delete_program(program);
            Err(err)
        }
    }
}

fn uniform<B: RenderBackend>(
    backend: &B,
    program: ProgramHandle,
    name: &str,
) -> Result<UniformLocation> {
    backend
        .uniform_location(program, name)
        .ok_or_else(|| Error::Backend(format!("program exposes no uniform '{name}'")))
}

fn attribute<B: RenderBackend>(
    backend: &B,
    program: ProgramHandle,
    name: &str,
) -> Result<AttributeLocation> {
    backend
        .attribute_location(program, name)
        .ok_or_else(|| Error::Backend(format!("program exposes no attribute '{name}'")))
}
