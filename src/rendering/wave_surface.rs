//! Sum-of-sines water surface program.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::program::ShaderProgram;
use super::{uniform_bind_group, DEPTH_FORMAT};
use crate::error::Result;
use crate::ocean::{PlaneMesh, Vertex};
use crate::params::MAX_WAVES;
use crate::uniforms::{names, RenderSurface, UniformTable, UniformValue};

/// Uniform block matching `WaveUniforms` in wave_surface.wgsl.
///
/// Per-wave scalars share one vec4 slot (amplitude, frequency, phase, unused)
/// because uniform arrays need a 16-byte stride.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaveUniformBlock {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub camera_pos: [f32; 4],
    pub time: f32,
    pub wave_count: u32,
    pub spatial_scale: f32,
    pub _padding: f32,
    pub waves: [[f32; 4]; MAX_WAVES],
    pub directions: [[f32; 4]; MAX_WAVES],
}

impl WaveUniformBlock {
    /// Pack the bound uniform values; `None` until every uniform has been bound
    pub fn from_table(table: &UniformTable, spatial_scale: f32) -> Option<Self> {
        if !table.is_complete() {
            return None;
        }

        let amplitudes = table.float_array(names::AMPLITUDES)?;
        let frequencies = table.float_array(names::FREQUENCIES)?;
        let phases = table.float_array(names::PHASES)?;
        let directions = table.vec2_array(names::WAVE_DIRS)?;

        let wave_count = amplitudes
            .len()
            .min(frequencies.len())
            .min(phases.len())
            .min(directions.len())
            .min(MAX_WAVES);

        let mut block = Self {
            model: table.mat4(names::MODEL)?.to_cols_array_2d(),
            view: table.mat4(names::VIEW)?.to_cols_array_2d(),
            projection: table.mat4(names::PROJECTION)?.to_cols_array_2d(),
            light_pos: table.vec3(names::LIGHT_POS)?.extend(1.0).to_array(),
            camera_pos: table.vec3(names::CAMERA_POS)?.extend(1.0).to_array(),
            time: table.float(names::TIME)?,
            wave_count: wave_count as u32,
            spatial_scale,
            _padding: 0.0,
            waves: [[0.0; 4]; MAX_WAVES],
            directions: [[0.0; 4]; MAX_WAVES],
        };

        for i in 0..wave_count {
            block.waves[i] = [amplitudes[i], frequencies[i], phases[i], 0.0];
            block.directions[i] = [directions[i].x, directions[i].y, 0.0, 0.0];
        }

        Some(block)
    }
}

struct GeometryBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub struct WaveSurfaceProgram {
    uniforms: UniformTable,
    spatial_scale: f32,
    dirty: bool,
    uploaded: bool,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    mesh: PlaneMesh,
    geometry: Option<GeometryBuffers>,
}

impl WaveSurfaceProgram {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        mesh: PlaneMesh,
        spatial_scale: f32,
    ) -> Self {
        let uniforms = UniformTable::wave_surface(MAX_WAVES);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wave Surface Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("wave_surface.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Wave Uniform Buffer"),
            size: std::mem::size_of::<WaveUniformBlock>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (bind_group_layout, bind_group) =
            uniform_bind_group(device, "Wave Surface", &uniform_buffer);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wave Surface Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wave Surface Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The orbit can dip below the surface
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            uniforms,
            spatial_scale,
            dirty: true,
            uploaded: false,
            pipeline,
            uniform_buffer,
            bind_group,
            mesh,
            geometry: None,
        }
    }

    /// Values currently bound, as the shader will see them after `prepare`
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }
}

impl RenderSurface for WaveSurfaceProgram {
    fn apply_uniforms(&mut self, batch: &[(&str, UniformValue)]) -> Result<()> {
        self.uniforms.apply_uniforms(batch)?;
        self.dirty = true;
        Ok(())
    }
}

impl ShaderProgram for WaveSurfaceProgram {
    fn upload_geometry(&mut self, device: &wgpu::Device) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wave Surface Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wave Surface Index Buffer"),
            contents: bytemuck::cast_slice(&self.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "Uploaded surface mesh: {} vertices, {} indices",
            self.mesh.vertices.len(),
            self.mesh.indices.len()
        );

        self.geometry = Some(GeometryBuffers {
            vertex_buffer,
            index_buffer,
            index_count: self.mesh.index_count(),
        });
    }

    fn prepare(&mut self, queue: &wgpu::Queue) {
        if !self.dirty {
            return;
        }
        let Some(block) = WaveUniformBlock::from_table(&self.uniforms, self.spatial_scale) else {
            return;
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[block]));
        self.dirty = false;
        self.uploaded = true;
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(geometry) = &self.geometry else {
            return;
        };
        if !self.uploaded {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
        pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..geometry.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::WaveFieldParams;
    use crate::params::{LightingConfig, RenderConfig};
    use crate::uniforms::{bind, bind_lighting, bind_time, bind_view, lighting_params, view_params};
    use glam::{Mat4, Vec3};

    fn fully_bound(field: &WaveFieldParams) -> UniformTable {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let mut table = UniformTable::wave_surface(MAX_WAVES);
        bind(&mut table, field).unwrap();
        bind_view(&mut table, &view_params(eye, &RenderConfig::default())).unwrap();
        bind_lighting(&mut table, &lighting_params(eye, &LightingConfig::default())).unwrap();
        bind_time(&mut table, 3.0).unwrap();
        table
    }

    #[test]
    fn test_block_layout_size() {
        // 3 mat4 + 2 vec4 + 4 scalars + 2 × 32 vec4
        assert_eq!(std::mem::size_of::<WaveUniformBlock>(), 192 + 32 + 16 + 2 * 512);
        assert_eq!(std::mem::size_of::<WaveUniformBlock>() % 16, 0);
    }

    #[test]
    fn test_pack_bound_waves() {
        let field = WaveFieldParams::preset_calm();
        let table = fully_bound(&field);

        let block = WaveUniformBlock::from_table(&table, 8.0).unwrap();
        assert_eq!(block.wave_count, 3);
        assert_eq!(block.time, 3.0);
        assert_eq!(block.spatial_scale, 8.0);
        assert_eq!(block.light_pos, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(block.camera_pos, [3.0, 4.0, 5.0, 1.0]);
        assert_eq!(block.model, Mat4::IDENTITY.to_cols_array_2d());

        for (i, wave) in field.iter().enumerate() {
            assert_eq!(
                block.waves[i],
                [wave.amplitude, wave.frequency, wave.phase, 0.0]
            );
            assert_eq!(block.directions[i][0], wave.direction.x);
            assert_eq!(block.directions[i][1], wave.direction.y);
        }
        assert_eq!(block.waves[3], [0.0; 4]);
    }

    #[test]
    fn test_no_block_until_every_uniform_is_bound() {
        let field = WaveFieldParams::preset_calm();

        let empty = UniformTable::wave_surface(MAX_WAVES);
        assert!(WaveUniformBlock::from_table(&empty, 1.0).is_none());

        // Waves and time bound, transforms and lighting still missing
        let mut partial = UniformTable::wave_surface(MAX_WAVES);
        bind(&mut partial, &field).unwrap();
        bind_time(&mut partial, 0.0).unwrap();
        assert!(WaveUniformBlock::from_table(&partial, 1.0).is_none());

        assert!(WaveUniformBlock::from_table(&fully_bound(&field), 1.0).is_some());
    }
}
