//! Randomized wave-field generation biased by a wind direction.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{WaveDescriptor, WaveFieldParams};
use crate::error::{Error, Result};
use crate::params::{FrequencyPolicy, WaveGenConfig};

/// Generate `num_waves` independent waves around `wind_angle` (radians).
///
/// Each wave draws, in order: a direction offset in
/// `[-max_angle_offset, +max_angle_offset]`, its amplitude/frequency per the
/// configured [`FrequencyPolicy`], then a phase. Waves keep insertion order.
///
/// Configuration errors are reported before any entropy is consumed.
pub fn generate<R: Rng + ?Sized>(
    wind_angle: f32,
    num_waves: usize,
    config: &WaveGenConfig,
    rng: &mut R,
) -> Result<WaveFieldParams> {
    if num_waves < 1 {
        return Err(Error::InvalidConfiguration(
            "num_waves must be at least 1".to_string(),
        ));
    }
    if !wind_angle.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "wind angle must be finite, got {}",
            wind_angle
        )));
    }
    config.validate()?;

    let max_offset = config.max_angle_offset_rad;
    let (phase_min, phase_max) = config.phase_range;

    let waves = (0..num_waves)
        .map(|_| {
            let angle = wind_angle + rng.gen_range(-max_offset..=max_offset);
            let direction = Vec2::from_angle(angle);

            let (amplitude, frequency) = match config.policy {
                FrequencyPolicy::Uniform {
                    amplitude_range,
                    frequency_range,
                } => (
                    rng.gen_range(amplitude_range.0..=amplitude_range.1),
                    rng.gen_range(frequency_range.0..=frequency_range.1),
                ),
                FrequencyPolicy::MedianWavelength {
                    speed,
                    base_frequency,
                    wavelength_ratio,
                } => {
                    let median_wavelength = speed / (TAU * base_frequency);
                    let wavelength = median_wavelength * rng.gen_range(0.5f32..=1.5);
                    (wavelength_ratio * wavelength, speed / wavelength)
                }
            };

            let phase = wrap_phase(rng.gen_range(phase_min..=phase_max));

            WaveDescriptor {
                amplitude,
                frequency,
                phase,
                direction,
            }
        })
        .collect();

    log::debug!(
        "Generated {} waves (policy: {}, wind: {:.1}°)",
        num_waves,
        config.policy.name(),
        wind_angle.to_degrees()
    );

    Ok(WaveFieldParams::new(waves))
}

/// Map any angle into [0, 2π)
fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wave generator owning its random stream
pub struct WaveFieldGenerator<R = StdRng> {
    rng: R,
}

impl WaveFieldGenerator<StdRng> {
    /// Reproducible stream: same seed and config give bit-identical fields
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Non-deterministic stream seeded from the OS
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> WaveFieldGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a new field, advancing this generator's stream
    pub fn generate(
        &mut self,
        wind_angle: f32,
        num_waves: usize,
        config: &WaveGenConfig,
    ) -> Result<WaveFieldParams> {
        generate(wind_angle, num_waves, config, &mut self.rng)
    }
}
