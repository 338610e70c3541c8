//! Procedural sky backdrop drawn as a fullscreen triangle.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

use super::program::ShaderProgram;
use super::{uniform_bind_group, DEPTH_FORMAT};
use crate::error::Result;
use crate::uniforms::{names, RenderSurface, UniformTable, UniformValue};

const HORIZON_COLOR: [f32; 4] = [0.65, 0.80, 0.95, 1.0];
const ZENITH_COLOR: [f32; 4] = [0.15, 0.35, 0.70, 1.0];

/// Uniform buffer for skybox shader (inverse rotation-only view-projection + gradient)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SkyboxUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub horizon_color: [f32; 4],
    pub zenith_color: [f32; 4],
}

impl SkyboxUniforms {
    /// Build from bound transforms; the view's translation is dropped so the
    /// sky stays at infinity. `None` until the transforms have been bound.
    pub fn from_table(table: &UniformTable) -> Option<Self> {
        if !table.is_complete() {
            return None;
        }
        let view = table.mat4(names::VIEW)?;
        let projection = table.mat4(names::PROJECTION)?;
        let rotation_only = Mat4::from_mat3(Mat3::from_mat4(view));

        Some(Self {
            inv_view_proj: (projection * rotation_only).inverse().to_cols_array_2d(),
            horizon_color: HORIZON_COLOR,
            zenith_color: ZENITH_COLOR,
        })
    }
}

pub struct SkyboxProgram {
    uniforms: UniformTable,
    dirty: bool,
    uploaded: bool,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SkyboxProgram {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let uniforms = UniformTable::view_only();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("skybox.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Skybox Uniform Buffer"),
            size: std::mem::size_of::<SkyboxUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (bind_group_layout, bind_group) =
            uniform_bind_group(device, "Skybox", &uniform_buffer);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skybox Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Drawn first and never occludes anything
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            uniforms,
            dirty: true,
            uploaded: false,
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }
}

impl RenderSurface for SkyboxProgram {
    fn apply_uniforms(&mut self, batch: &[(&str, UniformValue)]) -> Result<()> {
        self.uniforms.apply_uniforms(batch)?;
        self.dirty = true;
        Ok(())
    }
}

impl ShaderProgram for SkyboxProgram {
    fn upload_geometry(&mut self, _device: &wgpu::Device) {
        // Fullscreen triangle is generated from vertex_index
    }

    fn prepare(&mut self, queue: &wgpu::Queue) {
        if !self.dirty {
            return;
        }
        let Some(block) = SkyboxUniforms::from_table(&self.uniforms) else {
            return;
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[block]));
        self.dirty = false;
        self.uploaded = true;
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if !self.uploaded {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderConfig;
    use crate::uniforms::{bind_view, view_params};
    use glam::{Vec3, Vec4};

    #[test]
    fn test_sky_ignores_camera_translation() {
        let config = RenderConfig::default();
        let mut near = UniformTable::view_only();
        let mut far = UniformTable::view_only();

        // Same viewing direction, different distance from the origin
        bind_view(&mut near, &view_params(Vec3::new(0.0, 1.0, -2.0), &config)).unwrap();
        bind_view(&mut far, &view_params(Vec3::new(0.0, 5.0, -10.0), &config)).unwrap();

        let near_block = SkyboxUniforms::from_table(&near).unwrap();
        let far_block = SkyboxUniforms::from_table(&far).unwrap();
        let a = Mat4::from_cols_array_2d(&near_block.inv_view_proj);
        let b = Mat4::from_cols_array_2d(&far_block.inv_view_proj);

        let ray_a = a * Vec4::new(0.0, 0.0, 1.0, 1.0);
        let ray_b = b * Vec4::new(0.0, 0.0, 1.0, 1.0);
        let dir_a = (ray_a.truncate() / ray_a.w).normalize();
        let dir_b = (ray_b.truncate() / ray_b.w).normalize();
        assert!((dir_a - dir_b).length() < 1e-4);
    }

    #[test]
    fn test_no_block_before_view_is_bound() {
        assert!(SkyboxUniforms::from_table(&UniformTable::view_only()).is_none());
    }

    #[test]
    fn test_bound_view_gives_finite_block() {
        let mut table = UniformTable::view_only();
        let eye = Vec3::new(4.0, 3.0, 4.0);
        bind_view(&mut table, &view_params(eye, &RenderConfig::default())).unwrap();

        let block = SkyboxUniforms::from_table(&table).unwrap();
        assert!(block.inv_view_proj.iter().flatten().all(|v| v.is_finite()));
    }
}
