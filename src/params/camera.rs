//! Orbit camera control parameters.

/// Mouse orbit/zoom tuning and the starting orbit
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Radians of rotation per pixel of drag
    pub drag_sensitivity: f32,

    /// Elevation limits, measured from the +Y axis (radians).
    /// 1°..179° keeps the camera 89° either side of the horizon so the
    /// look-at basis never flips.
    pub min_elevation_rad: f32,
    pub max_elevation_rad: f32,

    /// Radius change per scroll notch (world units)
    pub scroll_step: f32,

    /// Zoom limits (world units)
    pub min_radius: f32,
    pub max_radius: f32,

    /// Starting orbit
    pub initial_azimuth_rad: f32,
    pub initial_elevation_rad: f32,
    pub initial_radius: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            min_elevation_rad: 1f32.to_radians(),
            max_elevation_rad: 179f32.to_radians(),
            scroll_step: 0.5,
            min_radius: 0.3,
            max_radius: 50.0,
            initial_azimuth_rad: 45f32.to_radians(),
            // 30° above the horizon
            initial_elevation_rad: 60f32.to_radians(),
            initial_radius: 8.0,
        }
    }
}
