/// Static background stars
use nalgebra::Point3;
use rand::Rng;

use crate::config::StarfieldConfig;
use crate::render::{Color, Surface};
use crate::transform::MatrixStack;

/// Stars never come closer than this along -Z
pub const NEAREST_STAR_Z: f32 = -5.0;

pub type Star = Point3<f32>;

/// A fixed set of points scattered behind the ship
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    point_size: f32,
    color: Color,
}

impl Starfield {
    /// Scatter `count` stars using the thread-local generator
    pub fn generate(count: usize, range_x: f32, range_y: f32, range_z: f32) -> Self {
        Self::generate_with(&mut rand::rng(), count, range_x, range_y, range_z)
    }

    /// Scatter `count` stars with x in [-range_x, range_x], y in
    /// [-range_y, range_y] and z in [-range_z, -5].
    pub fn generate_with<R: Rng>(
        rng: &mut R,
        count: usize,
        range_x: f32,
        range_y: f32,
        range_z: f32,
    ) -> Self {
        let (range_x, range_y) = (range_x.abs(), range_y.abs());
        let far_z = -range_z.abs();

        let stars = (0..count)
            .map(|_| {
                let x = rng.random_range(-range_x..=range_x);
                let y = rng.random_range(-range_y..=range_y);
                // A field shallower than the nearest allowed depth collapses onto it
                let z = if far_z < NEAREST_STAR_Z {
                    rng.random_range(far_z..=NEAREST_STAR_Z)
                } else {
                    NEAREST_STAR_Z
                };
                Point3::new(x, y, z)
            })
            .collect();

        let defaults = StarfieldConfig::default();
        Self {
            stars,
            point_size: defaults.point_size,
            color: defaults.color,
        }
    }

    pub fn from_config(config: &StarfieldConfig) -> Self {
        Self::generate(config.count, config.range_x, config.range_y, config.range_z)
            .with_style(config.point_size, config.color)
    }

    pub fn with_style(mut self, point_size: f32, color: Color) -> Self {
        self.point_size = point_size;
        self.color = color;
        self
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Draw every star against the active transform; the stack is left untouched
    pub fn render<S: Surface>(&self, surface: &mut S, stack: &MatrixStack) -> Result<(), S::Error> {
        surface.draw_points(&self.stars, &stack.top(), self.point_size, self.color)
    }
}
