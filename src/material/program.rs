//! GPU program state backing a material: pipeline, uniform buffers and bind
//! groups, built lazily on first render and dropped on dispose.

use crate::context::Context;
use crate::material::uniforms::{FrameUniforms, ObjectUniforms, PointVertex};
use crate::material::{FrameState, ShadingMode};
use crate::resource::GpuMesh;
use crate::texture::Raster;

/// How the built pipeline consumes the mesh.
enum DrawKind {
    /// Six vertices per focal sample, expanded from the storage buffer.
    Points { quads: u32 },
    /// Indexed line list over the position buffer.
    Lines,
    /// Indexed triangle list over position/UV/normal buffers.
    Surface,
}

pub(crate) struct MaterialGpu {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    frame_group: wgpu::BindGroup,
    object_group: wgpu::BindGroup,
    texture_group: Option<wgpu::BindGroup>,
    // Kept so ownership of the expanded sample buffer is explicit; the bind
    // group holds it alive regardless.
    _point_buffer: Option<wgpu::Buffer>,
    draw_kind: DrawKind,
}

impl MaterialGpu {
    /// Builds the complete program state for `mode`.
    pub fn build(
        mode: ShadingMode,
        mesh: &GpuMesh,
        diffuse: Option<&Raster>,
        normal_map: Option<&Raster>,
    ) -> MaterialGpu {
        let ctxt = Context::get();

        let frame_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material_frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material_object_uniforms"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_frame_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let frame_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_frame_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Points bind their expanded sample buffer next to the object
        // uniforms; the other modes only bind the uniforms.
        let (object_layout, object_group, point_buffer, draw_kind) =
            if mode == ShadingMode::Points {
                let samples: Vec<PointVertex> = mesh
                    .coords()
                    .iter()
                    .zip(mesh.uvs().iter())
                    .map(|(c, uv)| PointVertex {
                        pos: [c.x, c.y, c.z, 1.0],
                        uv: [uv.x, uv.y, 0.0, 0.0],
                    })
                    .collect();
                let quads = samples.len() as u32;
                let buffer = ctxt.create_buffer_init(
                    Some("material_point_samples"),
                    bytemuck::cast_slice(&samples),
                    wgpu::BufferUsages::STORAGE,
                );

                let layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("material_points_layout"),
                    entries: &[
                        uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
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
                let group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("material_points_group"),
                    layout: &layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: object_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: buffer.as_entire_binding(),
                        },
                    ],
                });
                (layout, group, Some(buffer), DrawKind::Points { quads })
            } else {
                let layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("material_object_layout"),
                    entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
                });
                let group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("material_object_group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: object_buffer.as_entire_binding(),
                    }],
                });
                let kind = if mode == ShadingMode::Wireframe {
                    DrawKind::Lines
                } else {
                    DrawKind::Surface
                };
                (layout, group, None, kind)
            };

        // The surface modes bind diffuse + normal rasters; lit-surface has
        // no diffuse and reuses the normal raster as a placeholder behind a
        // zeroed use_diffuse flag.
        let mut texture_layout = None;
        let mut texture_group = None;
        if let (true, Some(normal_raster)) = (mode.lights_surface(), normal_map) {
            let diffuse_tex = diffuse.unwrap_or(normal_raster).gpu();
            let normal_tex = normal_raster.gpu();

            let layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("material_texture_layout"),
                entries: &[
                    texture_entry(0),
                    sampler_entry(1),
                    texture_entry(2),
                    sampler_entry(3),
                ],
            });
            texture_group = Some(ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("material_texture_group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&diffuse_tex.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&diffuse_tex.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&normal_tex.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&normal_tex.sampler),
                    },
                ],
            }));
            texture_layout = Some(layout);
        }

        let mut group_layouts: Vec<&wgpu::BindGroupLayout> = vec![&frame_layout, &object_layout];
        if let Some(tl) = &texture_layout {
            group_layouts.push(tl);
        }
        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("material_pipeline_layout"),
            bind_group_layouts: &group_layouts,
            push_constant_ranges: &[],
        });

        let source = match mode {
            ShadingMode::Points => include_str!("points3d.wgsl"),
            ShadingMode::Wireframe => include_str!("wireframe3d.wgsl"),
            ShadingMode::LitSurface | ShadingMode::TexturedSurface => {
                include_str!("surface3d.wgsl")
            }
        };
        let shader = ctxt.create_shader_module(Some("material_shader"), source);

        let pipeline = build_pipeline(&ctxt, mode, &pipeline_layout, &shader);

        MaterialGpu {
            pipeline,
            frame_buffer,
            object_buffer,
            frame_group,
            object_group,
            texture_group,
            _point_buffer: point_buffer,
            draw_kind,
        }
    }

    /// Uploads this frame's uniforms and issues the draw.
    pub fn draw(
        &self,
        mesh: &GpuMesh,
        object: &ObjectUniforms,
        frame: &FrameState<'_>,
        rpass: &mut wgpu::RenderPass<'_>,
    ) {
        let ctxt = Context::get();
        ctxt.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_frame(frame)),
        );
        ctxt.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(object));

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_group, &[]);
        rpass.set_bind_group(1, &self.object_group, &[]);
        if let Some(tg) = &self.texture_group {
            rpass.set_bind_group(2, tg, &[]);
        }

        match self.draw_kind {
            DrawKind::Points { quads } => {
                rpass.draw(0..quads * 6, 0..1);
            }
            DrawKind::Lines => {
                if let (Some(pos), Some((idx, count))) =
                    (mesh.coords_buffer(), mesh.line_indices())
                {
                    rpass.set_vertex_buffer(0, pos.slice(..));
                    rpass.set_index_buffer(idx.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..count, 0, 0..1);
                }
            }
            DrawKind::Surface => {
                if let (Some(pos), Some(uv), Some(normals), Some((idx, count))) = (
                    mesh.coords_buffer(),
                    mesh.uvs_buffer(),
                    mesh.normals_buffer(),
                    mesh.triangle_indices(),
                ) {
                    rpass.set_vertex_buffer(0, pos.slice(..));
                    rpass.set_vertex_buffer(1, uv.slice(..));
                    rpass.set_vertex_buffer(2, normals.slice(..));
                    rpass.set_index_buffer(idx.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..count, 0, 0..1);
                }
            }
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn build_pipeline(
    ctxt: &Context,
    mode: ShadingMode,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    let position_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };
    let uv_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x2,
        }],
    };
    let normal_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };

    let (buffers, topology, blend, depth_write, depth_compare): (
        Vec<wgpu::VertexBufferLayout>,
        wgpu::PrimitiveTopology,
        wgpu::BlendState,
        bool,
        wgpu::CompareFunction,
    ) = match mode {
        ShadingMode::Points => (
            vec![],
            wgpu::PrimitiveTopology::TriangleList,
            // Additive glow: sprites accumulate against the background.
            wgpu::BlendState {
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
            },
            false,
            wgpu::CompareFunction::Less,
        ),
        ShadingMode::Wireframe => (
            vec![position_layout.clone()],
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            true,
            wgpu::CompareFunction::LessEqual,
        ),
        ShadingMode::LitSurface | ShadingMode::TexturedSurface => (
            vec![position_layout.clone(), uv_layout, normal_layout],
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::ALPHA_BLENDING,
            true,
            wgpu::CompareFunction::Less,
        ),
    };

    ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("material_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctxt.surface_format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Imported soups are not guaranteed watertight; draw both sides.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Context::depth_format(),
            depth_write_enabled: depth_write,
            depth_compare,
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
    })
}
