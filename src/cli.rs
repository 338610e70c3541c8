//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

use wavefield::params::{FrequencyPolicy, OceanPhysics, RenderConfig, MAX_WAVES};

/// How the wave field is produced at startup and on regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Amplitude and frequency sampled independently
    Uniform,
    /// Amplitude and frequency derived from a sampled wavelength
    MedianWavelength,
    /// Fixed three-wave preset, no sampling
    Calm,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Wavefield")]
#[command(about = "Sum-of-sines water surface viewer", long_about = None)]
pub struct Args {
    /// Number of summed waves (the surface shader holds at most 32)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..=MAX_WAVES as i64)
    )]
    pub waves: u32,

    /// Dominant wind direction (degrees, counter-clockwise from +X)
    #[arg(long, value_name = "DEGREES", default_value_t = 30.0)]
    pub wind_deg: f32,

    /// Largest per-wave deviation from the wind (degrees)
    #[arg(long, value_name = "DEGREES", default_value_t = 20.0)]
    pub max_offset_deg: f32,

    /// Seed for reproducible wave fields
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Amplitude/frequency sampling policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Uniform)]
    pub policy: PolicyArg,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 546)]
    pub height: u32,
}

impl Args {
    /// Ocean setup with command-line overrides applied
    pub fn ocean_physics(&self) -> OceanPhysics {
        let mut physics = OceanPhysics {
            num_waves: self.waves as usize,
            wind_angle_rad: self.wind_deg.to_radians(),
            seed: self.seed,
            ..OceanPhysics::default()
        };
        physics.sampling.max_angle_offset_rad = self.max_offset_deg.to_radians();
        if self.policy == PolicyArg::MedianWavelength {
            physics.sampling.policy = FrequencyPolicy::median_wavelength();
        }
        physics
    }

    pub fn use_calm_preset(&self) -> bool {
        self.policy == PolicyArg::Calm
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wavefield"]);
        let physics = args.ocean_physics();
        assert_eq!(physics.num_waves, 8);
        assert!((physics.wind_angle_rad - 30f32.to_radians()).abs() < 1e-6);
        assert_eq!(physics.seed, None);
        assert_eq!(physics.sampling.policy, FrequencyPolicy::default());
        assert!(!args.use_calm_preset());

        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (720, 546));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "wavefield",
            "--waves",
            "32",
            "--seed",
            "7",
            "--policy",
            "median-wavelength",
            "--max-offset-deg",
            "0",
        ]);
        let physics = args.ocean_physics();
        assert_eq!(physics.num_waves, 32);
        assert_eq!(physics.seed, Some(7));
        assert_eq!(physics.sampling.policy, FrequencyPolicy::median_wavelength());
        assert_eq!(physics.sampling.max_angle_offset_rad, 0.0);
    }

    #[test]
    fn test_wave_count_limited_to_shader_capacity() {
        let full = Args::try_parse_from(["wavefield", "--waves", "32"]).unwrap();
        assert_eq!(full.ocean_physics().num_waves, MAX_WAVES);

        assert!(Args::try_parse_from(["wavefield", "--waves", "33"]).is_err());
        assert!(Args::try_parse_from(["wavefield", "--waves", "0"]).is_err());
    }

    #[test]
    fn test_calm_policy() {
        let args = Args::parse_from(["wavefield", "--policy", "calm"]);
        assert!(args.use_calm_preset());
    }
}
