//! The batched renderer of the decorative particle field.

use crate::camera::OrbitCamera3d;
use crate::color::PARTICLE_CYAN;
use crate::context::Context;
use crate::scene::ParticleField;
use bytemuck::{Pod, Zeroable};
use glamx::Mat4;

/// Size of one particle sprite, in world units.
const PARTICLE_SIZE: f32 = 2.4;

/// Layout must match `FieldUniforms` in particles3d.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FieldUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// Sprite size in x, field opacity in y.
    params: [f32; 4],
}

/// Draws the particle field as additive camera-facing discs expanded from a
/// storage buffer, six vertices per particle. The particle positions are
/// static: they upload once, and the rigid group rotation rides in on the
/// model matrix.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
    position_buffer: Option<wgpu::Buffer>,
    particle_count: u32,
}

impl Default for ParticleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleRenderer {
    /// Creates the pipeline. Requires an initialized [`Context`].
    pub fn new() -> ParticleRenderer {
        let ctxt = Context::get();

        let bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particle_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(
            Some("particle_shader"),
            include_str!("particles3d.wgsl"),
        );

        let pipeline = ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
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
                    format: ctxt.surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Context::depth_format(),
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let uniform_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniform_buffer"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        ParticleRenderer {
            pipeline,
            uniform_buffer,
            bind_group_layout,
            bind_group: None,
            position_buffer: None,
            particle_count: 0,
        }
    }

    fn ensure_positions(&mut self, field: &ParticleField) {
        if self.position_buffer.is_some() {
            return;
        }

        let ctxt = Context::get();
        let data: Vec<[f32; 4]> = field
            .positions()
            .iter()
            .map(|p| [p.x, p.y, p.z, 1.0])
            .collect();
        let buffer = ctxt.create_buffer_init(
            Some("particle_positions"),
            bytemuck::cast_slice(&data),
            wgpu::BufferUsages::STORAGE,
        );

        self.bind_group = Some(ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particle_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
            ],
        }));
        self.position_buffer = Some(buffer);
        self.particle_count = data.len() as u32;
    }

    /// Draws the field with its current opacity and group rotation.
    pub fn draw(
        &mut self,
        field: &ParticleField,
        camera: &OrbitCamera3d,
        rpass: &mut wgpu::RenderPass<'_>,
    ) {
        self.ensure_positions(field);

        let ctxt = Context::get();
        let uniforms = FieldUniforms {
            view: camera.view().to_cols_array_2d(),
            proj: camera.proj().to_cols_array_2d(),
            model: Mat4::from_rotation_y(field.rotation()).to_cols_array_2d(),
            color: [
                PARTICLE_CYAN.r,
                PARTICLE_CYAN.g,
                PARTICLE_CYAN.b,
                PARTICLE_CYAN.a,
            ],
            params: [PARTICLE_SIZE, field.opacity(), 0.0, 0.0],
        };
        ctxt.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if let Some(bind_group) = &self.bind_group {
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw(0..self.particle_count * 6, 0..1);
        }
    }
}
