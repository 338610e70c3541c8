//! Parameter definitions with units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (radians, world units, pixels)
//! - Documented ranges and meanings
//! - Validation where a bad value would corrupt the wave field

mod camera;
mod ocean;
mod render;

// Re-export all types
pub use camera::OrbitControls;
pub use ocean::{FrequencyPolicy, OceanPhysics, WaveGenConfig, MAX_WAVES};
pub use render::{LightingConfig, RenderConfig};
