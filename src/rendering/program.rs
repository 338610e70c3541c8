//! Closed set of shader programs sharing one capability interface.

use super::skybox::SkyboxProgram;
use super::wave_surface::WaveSurfaceProgram;
use crate::error::Result;
use crate::uniforms::{RenderSurface, UniformValue};

/// What every program can do: own geometry, accept uniforms, draw itself
pub trait ShaderProgram: RenderSurface {
    /// Create vertex/index buffers on the device
    fn upload_geometry(&mut self, device: &wgpu::Device);

    /// Push uniform changes to the GPU before drawing
    fn prepare(&mut self, queue: &wgpu::Queue);

    /// Record draw commands into an open render pass
    fn render(&self, pass: &mut wgpu::RenderPass<'_>);
}

/// Programs drawn by the render system, in draw order
pub enum Program {
    Skybox(SkyboxProgram),
    WaveSurface(WaveSurfaceProgram),
}

impl Program {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skybox(_) => "skybox",
            Self::WaveSurface(_) => "wave surface",
        }
    }
}

impl RenderSurface for Program {
    fn apply_uniforms(&mut self, batch: &[(&str, UniformValue)]) -> Result<()> {
        match self {
            Self::Skybox(program) => program.apply_uniforms(batch),
            Self::WaveSurface(program) => program.apply_uniforms(batch),
        }
    }
}

impl ShaderProgram for Program {
    fn upload_geometry(&mut self, device: &wgpu::Device) {
        match self {
            Self::Skybox(program) => program.upload_geometry(device),
            Self::WaveSurface(program) => program.upload_geometry(device),
        }
    }

    fn prepare(&mut self, queue: &wgpu::Queue) {
        match self {
            Self::Skybox(program) => program.prepare(queue),
            Self::WaveSurface(program) => program.prepare(queue),
        }
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        match self {
            Self::Skybox(program) => program.render(pass),
            Self::WaveSurface(program) => program.render(pass),
        }
    }
}
