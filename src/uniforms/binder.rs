//! Flattens wave/view/lighting parameters into the named-uniform contract.

use glam::{Mat4, Vec2, Vec3};

use super::{names, RenderSurface, UniformValue};
use crate::error::Result;
use crate::ocean::WaveFieldParams;
use crate::params::{LightingConfig, RenderConfig};

/// Model/view/projection transforms for one draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Fragment-stage lighting inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingParams {
    pub lightpos: Vec3,
    pub camerapos: Vec3,
}

/// The four index-aligned arrays a wave set flattens into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveUniformArrays {
    pub amplitudes: Vec<f32>,
    pub frequencies: Vec<f32>,
    pub phases: Vec<f32>,
    pub directions: Vec<Vec2>,
}

impl WaveUniformArrays {
    /// Directions as interleaved `x, y` floats (2N values)
    pub fn direction_floats(&self) -> Vec<f32> {
        self.directions.iter().flat_map(|d| d.to_array()).collect()
    }
}

/// Split a wave set into parallel arrays, preserving wave order
pub fn flatten(waves: &WaveFieldParams) -> WaveUniformArrays {
    let mut arrays = WaveUniformArrays {
        amplitudes: Vec::with_capacity(waves.len()),
        frequencies: Vec::with_capacity(waves.len()),
        phases: Vec::with_capacity(waves.len()),
        directions: Vec::with_capacity(waves.len()),
    };

    for wave in waves {
        arrays.amplitudes.push(wave.amplitude);
        arrays.frequencies.push(wave.frequency);
        arrays.phases.push(wave.phase);
        arrays.directions.push(wave.direction);
    }

    arrays
}

/// Write `u_amplitudes`, `u_frequencies`, `u_phases` and `u_wavedirs` in one batch
pub fn bind<S: RenderSurface + ?Sized>(surface: &mut S, waves: &WaveFieldParams) -> Result<()> {
    let arrays = flatten(waves);
    surface.apply_uniforms(&[
        (names::AMPLITUDES, UniformValue::FloatArray(arrays.amplitudes)),
        (names::FREQUENCIES, UniformValue::FloatArray(arrays.frequencies)),
        (names::PHASES, UniformValue::FloatArray(arrays.phases)),
        (names::WAVE_DIRS, UniformValue::Vec2Array(arrays.directions)),
    ])
}

/// Write `u_model`, `u_view` and `u_projection`
pub fn bind_view<S: RenderSurface + ?Sized>(surface: &mut S, view: &ViewParams) -> Result<()> {
    surface.apply_uniforms(&[
        (names::MODEL, UniformValue::Mat4(view.model)),
        (names::VIEW, UniformValue::Mat4(view.view)),
        (names::PROJECTION, UniformValue::Mat4(view.projection)),
    ])
}

/// Write `u_lightpos` and `u_camerapos`
pub fn bind_lighting<S: RenderSurface + ?Sized>(
    surface: &mut S,
    lighting: &LightingParams,
) -> Result<()> {
    surface.apply_uniforms(&[
        (names::LIGHT_POS, UniformValue::Vec3(lighting.lightpos)),
        (names::CAMERA_POS, UniformValue::Vec3(lighting.camerapos)),
    ])
}

/// Write `u_time` (seconds)
pub fn bind_time<S: RenderSurface + ?Sized>(surface: &mut S, time_s: f32) -> Result<()> {
    surface.apply_uniforms(&[(names::TIME, UniformValue::Float(time_s))])
}

/// Transforms for a camera at `eye` looking at the origin
///
/// Y is the fixed up reference; projection uses the configured vertical FOV,
/// clip planes and the window aspect ratio.
pub fn view_params(eye: Vec3, render_config: &RenderConfig) -> ViewParams {
    ViewParams {
        model: Mat4::IDENTITY,
        view: Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y),
        projection: Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        ),
    }
}

pub fn lighting_params(camera_pos: Vec3, lighting: &LightingConfig) -> LightingParams {
    LightingParams {
        lightpos: Vec3::from_array(lighting.light_position),
        camerapos: camera_pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ocean::WaveFieldGenerator;
    use crate::params::WaveGenConfig;
    use crate::uniforms::UniformTable;

    fn sample_field(n: usize) -> WaveFieldParams {
        WaveFieldGenerator::from_seed(2024)
            .generate(0.3, n, &WaveGenConfig::default())
            .unwrap()
    }

    #[test]
    fn test_flatten_lengths_and_order() {
        let field = sample_field(8);
        let arrays = flatten(&field);

        assert_eq!(arrays.amplitudes.len(), 8);
        assert_eq!(arrays.frequencies.len(), 8);
        assert_eq!(arrays.phases.len(), 8);
        assert_eq!(arrays.directions.len(), 8);
        assert_eq!(arrays.direction_floats().len(), 16);

        for (i, wave) in field.iter().enumerate() {
            assert_eq!(arrays.amplitudes[i], wave.amplitude);
            assert_eq!(arrays.frequencies[i], wave.frequency);
            assert_eq!(arrays.phases[i], wave.phase);
            assert_eq!(arrays.directions[i], wave.direction);
        }

        let floats = arrays.direction_floats();
        assert_eq!(floats[2], field.waves()[1].direction.x);
        assert_eq!(floats[3], field.waves()[1].direction.y);
    }

    #[test]
    fn test_bind_writes_wave_arrays() {
        let field = sample_field(5);
        let mut table = UniformTable::wave_surface(32);
        bind(&mut table, &field).unwrap();

        assert_eq!(table.get(names::AMPLITUDES).map(|v| v.len()), Some(5));
        assert_eq!(table.get(names::FREQUENCIES).map(|v| v.len()), Some(5));
        assert_eq!(table.get(names::PHASES).map(|v| v.len()), Some(5));
        assert_eq!(
            table.get(names::WAVE_DIRS),
            Some(&UniformValue::Vec2Array(flatten(&field).directions))
        );
    }

    #[test]
    fn test_bind_is_idempotent() {
        let field = sample_field(6);

        let mut once = UniformTable::wave_surface(32);
        bind(&mut once, &field).unwrap();

        let mut twice = UniformTable::wave_surface(32);
        bind(&mut twice, &field).unwrap();
        bind(&mut twice, &field).unwrap();

        for name in [
            names::AMPLITUDES,
            names::FREQUENCIES,
            names::PHASES,
            names::WAVE_DIRS,
        ] {
            assert_eq!(once.get(name), twice.get(name));
        }
    }

    #[test]
    fn test_bind_over_capacity_fails_without_writes() {
        let field = sample_field(8);
        let mut table = UniformTable::wave_surface(3);

        let result = bind(&mut table, &field);
        assert!(matches!(
            result,
            Err(Error::UniformContractMismatch { requested: 8, capacity: 3, .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_view_params() {
        let eye = Vec3::new(0.0, 3.0, -5.0);
        let config = RenderConfig::default();
        let params = view_params(eye, &config);

        assert_eq!(params.model, Mat4::IDENTITY);

        // The origin lands straight ahead of the camera
        let origin_in_view = params.view.transform_point3(Vec3::ZERO);
        assert!(origin_in_view.x.abs() < 1e-5);
        assert!(origin_in_view.y.abs() < 1e-5);
        assert!((origin_in_view.z + eye.length()).abs() < 1e-5);

        let expected = Mat4::perspective_rh(45f32.to_radians(), 720.0 / 546.0, 0.1, 100.0);
        assert_eq!(params.projection, expected);
    }

    #[test]
    fn test_bind_view_lighting_time() {
        let config = RenderConfig::default();
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let mut table = UniformTable::wave_surface(32);

        bind_view(&mut table, &view_params(eye, &config)).unwrap();
        bind_lighting(&mut table, &lighting_params(eye, &LightingConfig::default())).unwrap();
        bind_time(&mut table, 4.25).unwrap();

        assert_eq!(table.float(names::TIME), Some(4.25));
        assert_eq!(
            table.get(names::LIGHT_POS),
            Some(&UniformValue::Vec3(Vec3::new(0.0, 1.0, 0.0)))
        );
        assert_eq!(table.get(names::CAMERA_POS), Some(&UniformValue::Vec3(eye)));
        assert!(matches!(table.get(names::PROJECTION), Some(UniformValue::Mat4(_))));
        assert_eq!(table.len(), 6);
    }
}
