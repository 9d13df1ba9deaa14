//! Frame rendering: one pass per tick drawing the particle field, the axis
//! indicator and the focal object.

pub use self::axis_renderer::AxisRenderer;
pub use self::particle_renderer::ParticleRenderer;

mod axis_renderer;
mod particle_renderer;

use crate::camera::OrbitCamera3d;
use crate::color::LAB_BACKGROUND;
use crate::context::Context;
use crate::light::LightRig;
use crate::material::FrameState;
use crate::scene::SceneComposer;
use glamx::Mat4;

/// Issues the scene's single render pass.
///
/// The renderer owns the decorative pipelines (particles, axes); the focal
/// object draws through its own material. Construction requires an
/// initialized [`Context`].
pub struct SceneRenderer {
    particles: ParticleRenderer,
    axes: AxisRenderer,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    /// Builds the decorative pipelines.
    pub fn new() -> SceneRenderer {
        SceneRenderer {
            particles: ParticleRenderer::new(),
            axes: AxisRenderer::new(),
        }
    }

    /// Renders one frame of the scene through `camera`. State is read only;
    /// every animated quantity was already updated by the loop.
    pub fn render(
        &mut self,
        scene: &mut SceneComposer,
        camera: &OrbitCamera3d,
        lights: &LightRig,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let ctxt = Context::get();
        let mut encoder = ctxt.create_command_encoder(Some("scene_frame"));

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: LAB_BACKGROUND.r as f64,
                            g: LAB_BACKGROUND.g as f64,
                            b: LAB_BACKGROUND.b as f64,
                            a: LAB_BACKGROUND.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.particles.draw(scene.particles(), camera, &mut rpass);
            self.axes.draw(scene.axes(), camera, &mut rpass);

            if scene.focal_visible() {
                let frame = FrameState {
                    view: camera.view(),
                    proj: camera.proj(),
                    eye: camera.eye(),
                    lights,
                };
                if let Some(focal) = scene.focal_mut() {
                    let rotation = focal.rotation;
                    let model = Mat4::from_rotation_y(rotation.y)
                        * Mat4::from_rotation_x(rotation.x)
                        * Mat4::from_rotation_z(rotation.z);
                    focal
                        .material
                        .render(&mut focal.geometry, model, &frame, &mut rpass);
                }
            }
        }

        ctxt.submit(Some(encoder.finish()));
    }
}
