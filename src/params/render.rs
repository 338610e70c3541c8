//! Rendering and lighting configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Quads per side of the surface grid
    pub mesh_quads: u32,

    /// Grid spans [-half_extent, half_extent] on X and Z
    pub mesh_half_extent: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 720,
            window_height: 546,
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
            mesh_quads: 256,
            mesh_half_extent: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Light placement for the surface shader
#[derive(Debug, Clone)]
pub struct LightingConfig {
    /// Point light position (world units)
    pub light_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: [0.0, 1.0, 0.0],
        }
    }
}
