//! Wavefield - Sum-of-sines water surface with an orbit camera

pub mod camera;
pub mod error;
pub mod logging;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod uniforms;

pub use error::{Error, Result};
