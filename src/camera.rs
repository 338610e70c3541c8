//! Orbit camera: spherical state around the origin, updated by pure input functions.

use glam::Vec3;

use crate::params::{OrbitControls, RenderConfig};
use crate::uniforms::{view_params, ViewParams};

/// Camera orbit around the origin.
///
/// `elevation` is the polar angle from the +Y axis, so `π/2` sits on the
/// horizon and smaller values look down from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Rotation about +Y (radians, counter-clockwise from +X towards +Z)
    pub azimuth: f32,
    /// Angle from +Y (radians)
    pub elevation: f32,
    /// Distance from the origin (world units)
    pub radius: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_controls(&OrbitControls::default())
    }
}

impl CameraState {
    /// Starting orbit from the control settings
    pub fn from_controls(controls: &OrbitControls) -> Self {
        Self {
            azimuth: controls.initial_azimuth_rad,
            elevation: controls.initial_elevation_rad,
            radius: controls.initial_radius,
        }
    }

    /// Cartesian eye position
    pub fn position(&self) -> Vec3 {
        spherical_to_cartesian(self.radius, self.elevation, self.azimuth)
    }

    /// Look-at-origin transforms for this orbit
    pub fn view_params(&self, render_config: &RenderConfig) -> ViewParams {
        view_params(self.position(), render_config)
    }
}

/// Spherical (radius, polar angle from +Y, azimuth) to Cartesian
pub fn spherical_to_cartesian(radius: f32, elevation: f32, azimuth: f32) -> Vec3 {
    let xz_radius = radius * elevation.sin();
    Vec3::new(
        xz_radius * azimuth.cos(),
        radius * elevation.cos(),
        xz_radius * azimuth.sin(),
    )
}

/// Rotate the orbit by a cursor drag of `(dx, dy)` pixels.
///
/// Dragging right swings the camera clockwise, dragging down lowers it
/// towards the horizon. Elevation is clamped so the camera never crosses a pole.
pub fn apply_drag(state: CameraState, dx: f32, dy: f32, controls: &OrbitControls) -> CameraState {
    CameraState {
        azimuth: state.azimuth - dx * controls.drag_sensitivity,
        elevation: (state.elevation + dy * controls.drag_sensitivity)
            .clamp(controls.min_elevation_rad, controls.max_elevation_rad),
        ..state
    }
}

/// Zoom by `dy` scroll notches (positive moves closer)
pub fn apply_scroll(state: CameraState, dy: f32, controls: &OrbitControls) -> CameraState {
    CameraState {
        radius: (state.radius - dy * controls.scroll_step)
            .clamp(controls.min_radius, controls.max_radius),
        ..state
    }
}

/// Tracks a left-button drag and turns cursor motion into deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    active: bool,
    last_cursor: Option<(f32, f32)>,
}

impl DragState {
    pub fn press(&mut self) {
        self.active = true;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.active
    }

    /// Record a cursor position; returns the motion since the last one while dragging
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let previous = self.last_cursor.replace((x, y));
        match (self.active, previous) {
            (true, Some((last_x, last_y))) => Some((x - last_x, y - last_y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_spherical_to_cartesian_on_horizon() {
        let eye = spherical_to_cartesian(5.0, FRAC_PI_2, FRAC_PI_2);
        assert!(eye.x.abs() < 1e-5);
        assert!(eye.y.abs() < 1e-5);
        assert!((eye.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_position_matches_radius() {
        let state = CameraState::default();
        assert!((state.position().length() - state.radius).abs() < 1e-4);
        // Default orbit sits above the water
        assert!(state.position().y > 0.0);
    }

    #[test]
    fn test_view_params_look_at_origin() {
        let state = CameraState {
            azimuth: FRAC_PI_2,
            elevation: FRAC_PI_2,
            radius: 5.0,
        };
        let view = state.view_params(&RenderConfig::default()).view;
        let origin = view.transform_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-5 && origin.y.abs() < 1e-5);
        assert!((origin.z + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_rotates_and_clamps() {
        let controls = OrbitControls::default();
        let start = CameraState::default();

        let moved = apply_drag(start, 10.0, 0.0, &controls);
        assert!((moved.azimuth - (start.azimuth - 0.1)).abs() < 1e-6);
        assert_eq!(moved.elevation, start.elevation);
        assert_eq!(moved.radius, start.radius);

        let over_top = apply_drag(start, 0.0, -10_000.0, &controls);
        assert_eq!(over_top.elevation, controls.min_elevation_rad);

        let under = apply_drag(start, 0.0, 10_000.0, &controls);
        assert_eq!(under.elevation, controls.max_elevation_rad);
    }

    #[test]
    fn test_scroll_zooms_and_clamps() {
        let controls = OrbitControls::default();
        let start = CameraState::default();

        let closer = apply_scroll(start, 2.0, &controls);
        assert!((closer.radius - (start.radius - 1.0)).abs() < 1e-6);

        let too_close = apply_scroll(start, 1000.0, &controls);
        assert_eq!(too_close.radius, controls.min_radius);

        let too_far = apply_scroll(start, -1000.0, &controls);
        assert_eq!(too_far.radius, controls.max_radius);
    }

    #[test]
    fn test_drag_state_deltas() {
        let mut drag = DragState::default();

        // Motion without a held button is only recorded
        assert_eq!(drag.cursor_moved(10.0, 10.0), None);

        drag.press();
        assert_eq!(drag.cursor_moved(15.0, 7.0), Some((5.0, -3.0)));
        assert_eq!(drag.cursor_moved(15.0, 9.0), Some((0.0, 2.0)));

        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.cursor_moved(40.0, 40.0), None);
    }
}
