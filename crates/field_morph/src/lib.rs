#![forbid(unsafe_code)]
//! field_morph: distance-field shapes with power/threshold rendering and morphing.
//!
//! Modules:
//! - field: scalar distance-field grids (stamping, binary persistence)
//! - render: backend capability trait and the field renderer (upload, draw, morph blend)
//!
//! A shape is rasterized once into a [`field::Field`] on the CPU, uploaded
//! once as a single-channel float texture, and drawn every frame with live
//! color/power/transform parameters. Cross-fading two uploaded fields is a
//! single [`render::FieldRenderer::render_morph`] call.
pub mod error;
pub mod field;
pub mod render;

/// Convenient re-exports for common types. Import with `use field_morph::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{Field, FIELD_MAGIC};
    pub use crate::render::{
        DrawParams, FieldRenderer, PowerAxis, RenderBackend, Rgba, TextureHandle,
    };
}
