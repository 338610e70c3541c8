//! Sum-of-sines ocean surface: wave descriptors, random generation and the grid mesh.
//!
//! The surface height at plane point `p = (x, z)` and time `t` is
//!
//! ```text
//! h(p, t) = Σ a_i · sin(f_i · (k · dot(d_i, p) + t) + φ_i)
//! ```
//!
//! with `k` the spatial scale. The vertex shader evaluates the same sum.

mod generator;
mod mesh;

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

pub use generator::{generate, WaveFieldGenerator};
pub use mesh::{PlaneMesh, Vertex};

/// One sinusoidal summand of the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDescriptor {
    /// Wave height (world units, > 0)
    pub amplitude: f32,
    /// Angular rate (> 0)
    pub frequency: f32,
    /// Phase offset in [0, 2π)
    pub phase: f32,
    /// Horizontal travel direction, unit length
    pub direction: Vec2,
}

impl WaveDescriptor {
    fn argument(&self, p: Vec2, time_s: f32, spatial_scale: f32) -> f32 {
        self.frequency * (spatial_scale * self.direction.dot(p) + time_s) + self.phase
    }
}

/// Ordered wave set; index `i` means the same wave in every uniform array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveFieldParams {
    waves: Vec<WaveDescriptor>,
}

impl WaveFieldParams {
    /// Wrap an explicit wave list. Directions must already be unit length.
    pub fn new(waves: Vec<WaveDescriptor>) -> Self {
        Self { waves }
    }

    /// The hand-tuned three-wave field the first demo shipped with
    pub fn preset_calm() -> Self {
        let amplitudes = [0.07, 0.09, 0.04];
        let frequencies = [0.65, 1.0, 0.65];
        let phases = [1.7, PI, 1.7];
        let directions = [
            Vec2::X,
            Vec2::Y,
            Vec2::new(0.7, 0.7).normalize(),
        ];

        let waves = (0..3)
            .map(|i| WaveDescriptor {
                amplitude: amplitudes[i],
                frequency: frequencies[i],
                phase: phases[i],
                direction: directions[i],
            })
            .collect();

        Self { waves }
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn waves(&self) -> &[WaveDescriptor] {
        &self.waves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaveDescriptor> {
        self.waves.iter()
    }

    /// Surface height at plane point `p` (x, z)
    pub fn height_at(&self, p: Vec2, time_s: f32, spatial_scale: f32) -> f32 {
        self.waves
            .iter()
            .map(|w| w.amplitude * w.argument(p, time_s, spatial_scale).sin())
            .sum()
    }

    /// Unit surface normal at plane point `p`, from the analytic gradient
    pub fn normal_at(&self, p: Vec2, time_s: f32, spatial_scale: f32) -> Vec3 {
        let gradient: Vec2 = self
            .waves
            .iter()
            .map(|w| {
                let slope = w.amplitude
                    * w.argument(p, time_s, spatial_scale).cos()
                    * w.frequency
                    * spatial_scale;
                w.direction * slope
            })
            .sum();

        Vec3::new(-gradient.x, 1.0, -gradient.y).normalize()
    }
}

impl<'a> IntoIterator for &'a WaveFieldParams {
    type Item = &'a WaveDescriptor;
    type IntoIter = std::slice::Iter<'a, WaveDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.waves.iter()
    }
}
