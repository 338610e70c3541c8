//! Wave-field sampling parameters.

use std::f32::consts::TAU;

use crate::error::{Error, Result};

/// Number of wave slots the surface shader declares (`array<vec4<f32>, 32>`)
pub const MAX_WAVES: usize = 32;

/// How amplitude and frequency are drawn for each wave.
///
/// A configuration carries exactly one policy, so a single generation call
/// never mixes the two derivations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyPolicy {
    /// Amplitude and frequency sampled directly and independently
    Uniform {
        /// Wave height range (world units)
        amplitude_range: (f32, f32),
        /// Frequency range (radians per unit of time)
        frequency_range: (f32, f32),
    },

    /// Wavelength sampled around a median, amplitude and frequency derived from it.
    ///
    /// `median = speed / (2π · base_frequency)`, `λ ~ U(0.5, 1.5) · median`,
    /// `amplitude = wavelength_ratio · λ`, `frequency = speed / λ`.
    MedianWavelength {
        /// Phase speed (world units per second)
        speed: f32,
        /// Base frequency (Hz)
        base_frequency: f32,
        /// Amplitude as a fraction of wavelength
        wavelength_ratio: f32,
    },
}

impl Default for FrequencyPolicy {
    fn default() -> Self {
        Self::Uniform {
            amplitude_range: (0.01, 0.1),
            frequency_range: (0.05, 0.8),
        }
    }
}

impl FrequencyPolicy {
    /// Median-wavelength policy with the values the tuned demo shipped with
    pub fn median_wavelength() -> Self {
        Self::MedianWavelength {
            speed: 0.5,
            base_frequency: 1.0,
            wavelength_ratio: 0.2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::MedianWavelength { .. } => "median-wavelength",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Uniform {
                amplitude_range,
                frequency_range,
            } => {
                check_range("amplitude_range", amplitude_range)?;
                check_range("frequency_range", frequency_range)?;
                if amplitude_range.0 <= 0.0 {
                    return Err(Error::InvalidConfiguration(format!(
                        "amplitude_range must be positive, got {:?}",
                        amplitude_range
                    )));
                }
                if frequency_range.0 <= 0.0 {
                    return Err(Error::InvalidConfiguration(format!(
                        "frequency_range must be positive, got {:?}",
                        frequency_range
                    )));
                }
            }
            Self::MedianWavelength {
                speed,
                base_frequency,
                wavelength_ratio,
            } => {
                for (label, value) in [
                    ("speed", speed),
                    ("base_frequency", base_frequency),
                    ("wavelength_ratio", wavelength_ratio),
                ] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(Error::InvalidConfiguration(format!(
                            "{} must be a positive number, got {}",
                            label, value
                        )));
                    }
                }

                // Extremes of the derived values over λ in [0.5, 1.5]·median
                let median = speed / (TAU * base_frequency);
                for (label, value) in [
                    ("shortest wavelength", 0.5 * median),
                    ("longest wavelength", 1.5 * median),
                    ("smallest amplitude", wavelength_ratio * 0.5 * median),
                    ("largest amplitude", wavelength_ratio * 1.5 * median),
                    ("lowest frequency", speed / (1.5 * median)),
                    ("highest frequency", speed / (0.5 * median)),
                ] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(Error::InvalidConfiguration(format!(
                            "median-wavelength policy gives a {} of {} \
                             (speed {}, base_frequency {}, wavelength_ratio {})",
                            label, value, speed, base_frequency, wavelength_ratio
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Sampling ranges for one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct WaveGenConfig {
    /// Largest per-wave deviation from the wind direction (radians)
    pub max_angle_offset_rad: f32,

    /// Phase range (radians), results are wrapped into [0, 2π)
    pub phase_range: (f32, f32),

    /// Amplitude/frequency derivation
    pub policy: FrequencyPolicy,
}

impl Default for WaveGenConfig {
    fn default() -> Self {
        Self {
            max_angle_offset_rad: 20f32.to_radians(),
            phase_range: (0.0, TAU),
            policy: FrequencyPolicy::default(),
        }
    }
}

impl WaveGenConfig {
    /// Reject degenerate or non-finite ranges
    pub fn validate(&self) -> Result<()> {
        if !self.max_angle_offset_rad.is_finite() || self.max_angle_offset_rad < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "max_angle_offset_rad must be finite and >= 0, got {}",
                self.max_angle_offset_rad
            )));
        }
        check_range(
            "max_angle_offset_rad",
            (-self.max_angle_offset_rad, self.max_angle_offset_rad),
        )?;
        check_range("phase_range", self.phase_range)?;
        self.policy.validate()
    }
}

fn check_range(label: &str, (min, max): (f32, f32)) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "{} bounds must be finite, got ({}, {})",
            label, min, max
        )));
    }
    if min > max {
        return Err(Error::InvalidConfiguration(format!(
            "{} is empty: min {} > max {}",
            label, min, max
        )));
    }
    // Uniform sampling scales the width up slightly, so keep headroom below f32::MAX
    if max - min > f32::MAX / 2.0 {
        return Err(Error::InvalidConfiguration(format!(
            "{} is too wide to sample: ({}, {})",
            label, min, max
        )));
    }
    Ok(())
}

/// Ocean setup: how many waves, where the wind blows, how to sample
#[derive(Debug, Clone)]
pub struct OceanPhysics {
    /// Number of summed sinusoids (observed variants: 3, 8, 32)
    pub num_waves: usize,

    /// Dominant wave travel direction (radians, counter-clockwise from +X)
    pub wind_angle_rad: f32,

    /// Seed for the wave RNG, `None` draws from OS entropy
    pub seed: Option<u64>,

    /// Per-wave sampling ranges
    pub sampling: WaveGenConfig,

    /// Spatial scale applied to `dot(direction, p)` in the surface function.
    /// The mesh spans [-1, 1], so this sets how many crests fit on it.
    pub spatial_scale: f32,
}

impl OceanPhysics {
    /// Reject wave counts the surface shader cannot hold, then check sampling
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WAVES).contains(&self.num_waves) {
            return Err(Error::InvalidConfiguration(format!(
                "num_waves must be in 1..={}, got {}",
                MAX_WAVES, self.num_waves
            )));
        }
        if !self.wind_angle_rad.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "wind_angle_rad must be finite, got {}",
                self.wind_angle_rad
            )));
        }
        self.sampling.validate()
    }
}

impl Default for OceanPhysics {
    fn default() -> Self {
        Self {
            num_waves: 8,
            wind_angle_rad: 30f32.to_radians(),
            seed: None,
            sampling: WaveGenConfig::default(),
            spatial_scale: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WaveGenConfig::default().validate().is_ok());

        let median = WaveGenConfig {
            policy: FrequencyPolicy::median_wavelength(),
            ..Default::default()
        };
        assert!(median.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = WaveGenConfig {
            policy: FrequencyPolicy::Uniform {
                amplitude_range: (0.1, 0.01),
                frequency_range: (0.05, 0.8),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_degenerate_ranges_rejected() {
        let nan_phase = WaveGenConfig {
            phase_range: (0.0, f32::NAN),
            ..Default::default()
        };
        assert!(nan_phase.validate().is_err());

        let negative_offset = WaveGenConfig {
            max_angle_offset_rad: -0.1,
            ..Default::default()
        };
        assert!(negative_offset.validate().is_err());

        let zero_speed = WaveGenConfig {
            policy: FrequencyPolicy::MedianWavelength {
                speed: 0.0,
                base_frequency: 1.0,
                wavelength_ratio: 0.2,
            },
            ..Default::default()
        };
        assert!(zero_speed.validate().is_err());
    }

    #[test]
    fn test_overflowing_width_rejected() {
        let wide_amplitude = WaveGenConfig {
            policy: FrequencyPolicy::Uniform {
                amplitude_range: (0.01, f32::MAX),
                frequency_range: (0.05, 0.8),
            },
            ..Default::default()
        };
        assert!(matches!(
            wide_amplitude.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let wide_phase = WaveGenConfig {
            phase_range: (-f32::MAX, f32::MAX),
            ..Default::default()
        };
        assert!(matches!(
            wide_phase.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let wide_offset = WaveGenConfig {
            max_angle_offset_rad: f32::MAX,
            ..Default::default()
        };
        assert!(wide_offset.validate().is_err());
    }

    #[test]
    fn test_median_wavelength_overflow_rejected() {
        let overflowing = WaveGenConfig {
            policy: FrequencyPolicy::MedianWavelength {
                speed: 1e30,
                base_frequency: 1e-30,
                wavelength_ratio: 0.2,
            },
            ..Default::default()
        };
        assert!(matches!(
            overflowing.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let vanishing_amplitude = WaveGenConfig {
            policy: FrequencyPolicy::MedianWavelength {
                speed: 0.5,
                base_frequency: 1.0,
                wavelength_ratio: 1e-45,
            },
            ..Default::default()
        };
        assert!(vanishing_amplitude.validate().is_err());
    }

    #[test]
    fn test_wave_count_bounded_by_shader_capacity() {
        assert!(OceanPhysics::default().validate().is_ok());

        let full = OceanPhysics {
            num_waves: MAX_WAVES,
            ..Default::default()
        };
        assert!(full.validate().is_ok());

        for num_waves in [0, MAX_WAVES + 1] {
            let physics = OceanPhysics {
                num_waves,
                ..Default::default()
            };
            assert!(matches!(
                physics.validate(),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_single_point_range_is_allowed() {
        let config = WaveGenConfig {
            policy: FrequencyPolicy::Uniform {
                amplitude_range: (0.05, 0.05),
                frequency_range: (0.5, 0.5),
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
