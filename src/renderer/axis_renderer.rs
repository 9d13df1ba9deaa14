//! Line renderer for the coordinate-axis indicator.

use crate::camera::OrbitCamera3d;
use crate::context::Context;
use crate::resource::GpuVec;
use crate::scene::{AxisIndicator, AXIS_LENGTH};
use bytemuck::{Pod, Zeroable};

/// Segments below this opacity are not worth a draw.
const OPACITY_CUTOFF: f32 = 0.003;

/// Layout must match `AxisUniforms` in axes3d.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct AxisUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

/// One line endpoint: position plus color with the segment opacity in
/// alpha.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct AxisVertex {
    pos: [f32; 3],
    color: [f32; 4],
}

/// Draws the six axis segments as an alpha-blended line list. The vertex
/// buffer is tiny and rewritten every frame with the current per-segment
/// opacities.
pub struct AxisRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertices: GpuVec<AxisVertex>,
}

impl Default for AxisRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisRenderer {
    /// Creates the pipeline. Requires an initialized [`Context`].
    pub fn new() -> AxisRenderer {
        let ctxt = Context::get();

        let bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("axis_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("axis_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(Some("axis_shader"), include_str!("axes3d.wgsl"));

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<AxisVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as u64,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        };

        let pipeline = ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("axis_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctxt.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
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
            label: Some("axis_uniform_buffer"),
            size: std::mem::size_of::<AxisUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("axis_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        AxisRenderer {
            pipeline,
            uniform_buffer,
            bind_group,
            vertices: GpuVec::new(Vec::new(), wgpu::BufferUsages::VERTEX),
        }
    }

    /// Draws whichever segments are currently visible.
    pub fn draw(
        &mut self,
        axes: &AxisIndicator,
        camera: &OrbitCamera3d,
        rpass: &mut wgpu::RenderPass<'_>,
    ) {
        let data = self.vertices.data_mut();
        data.clear();
        for segment in axes.segments() {
            if segment.opacity < OPACITY_CUTOFF {
                continue;
            }
            let tip = segment.direction * AXIS_LENGTH;
            let color = [
                segment.color.r,
                segment.color.g,
                segment.color.b,
                segment.opacity,
            ];
            data.push(AxisVertex {
                pos: [0.0; 3],
                color,
            });
            data.push(AxisVertex {
                pos: [tip.x, tip.y, tip.z],
                color,
            });
        }

        if self.vertices.is_empty() {
            return;
        }
        self.vertices.upload();

        let ctxt = Context::get();
        let uniforms = AxisUniforms {
            view: camera.view().to_cols_array_2d(),
            proj: camera.proj().to_cols_array_2d(),
        };
        ctxt.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if let Some(buffer) = self.vertices.buffer() {
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, buffer.slice(..));
            rpass.draw(0..self.vertices.len() as u32, 0..1);
        }
    }
}
