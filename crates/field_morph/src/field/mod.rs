//! Scalar distance fields on a 2D texel grid.
//!
//! This module defines [`Field`], a width x height grid of signed,
//! distance-like samples:
//! - Construct with [`Field::new`] or decode a persisted stream with
//!   [`Field::read_from`].
//! - Rasterize primitives into the grid with [`Field::stamp_disc`] or an
//!   arbitrary distance function with [`Field::stamp_with`].
//! - Persist with [`Field::write_to`].
//!
//! Samples start at negative infinity ("outside everything") and stamping
//! max-accumulates, so repeated stamps union their shapes.
use glam::Vec2;

mod codec;

pub use codec::FIELD_MAGIC;

/// A 2D grid of scalar samples approximating a signed distance field.
///
/// Samples are stored row-major with the origin at the top-left texel.
/// Positive values are inside the stamped shapes, negative values outside,
/// zero on the boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl Field {
    /// Creates a field of the given dimensions with every sample set to
    /// [`f32::NEG_INFINITY`].
    ///
    /// Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "field dimensions must be non-zero");
        Self {
            width,
            height,
            samples: vec![f32::NEG_INFINITY; width as usize * height as usize],
        }
    }

    /// Width of the grid in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major sample storage.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable access to the sample storage. The grid cannot be resized
    /// through this view.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Reads the sample at the given texel, returning [`f32::NEG_INFINITY`]
    /// ("outside") if the coordinates fall off the grid.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return f32::NEG_INFINITY;
        }
        self.samples[(y * self.width + x) as usize]
    }

    /// Maps a texel to its normalized device position in `[-1, 1]^2`.
    ///
    /// Stamping and sampling agree on this mapping, so distances stored in
    /// the grid are in normalized units regardless of resolution.
    pub fn grid_position(&self, px: u32, py: u32) -> Vec2 {
        Vec2::new(
            2.0 * px as f32 / self.width as f32 - 1.0,
            2.0 * py as f32 / self.height as f32 - 1.0,
        )
    }

    /// Unions an arbitrary signed distance function into the grid.
    ///
    /// Every texel's normalized position is passed to `distance`, and the
    /// stored sample keeps the maximum of its current value and the result.
    /// A texel inside at least one stamped shape therefore stays inside.
    pub fn stamp_with<F>(&mut self, distance: F)
    where
        F: Fn(Vec2) -> f32,
    {
        for py in 0..self.height {
            for px in 0..self.width {
                let d = distance(self.grid_position(px, py));
                let sample = &mut self.samples[(py * self.width + px) as usize];
                *sample = sample.max(d);
            }
        }
    }

    /// Unions a disc into the grid.
    ///
    /// `center` is in normalized device coordinates, `radius` in the same
    /// units. The stamped value is `radius - distance(texel, center)`:
    /// positive inside the disc, zero on its boundary, negative outside.
    pub fn stamp_disc(&mut self, center: Vec2, radius: f32) {
        self.stamp_with(|g| radius - g.distance(center));
    }
}
