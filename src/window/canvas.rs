//! Window and surface management for native targets.
//!
//! The canvas owns the winit window, the wgpu surface and the depth buffer,
//! and drives the frame loop: it pumps input events, hands the caller a
//! [`Frame`] per presented image, and — when the view is torn down — stops
//! requesting frames and releases the context. One tick of the animation
//! loop corresponds to exactly one presented frame.

use crate::context::Context;
use crate::renderer::SceneRenderer;
use glamx::Vec2;
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

// winit allows a single EventLoop per program; it lives in thread-local
// storage like the pending-event queue the pump callback fills.
thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
    static PENDING_EVENTS: RefCell<Vec<RawEvent>> = const { RefCell::new(Vec::new()) };
}

enum RawEvent {
    Close,
    Resized(u32, u32),
    CursorMoved(f64, f64),
    Wheel(f32),
    Key(KeyCode),
}

/// An input event delivered to the frame callback.
///
/// These are instantaneous, idempotent state writes: the loop consumes the
/// most recent values on its next tick, and no ordering guarantee beyond
/// that is provided.
#[derive(Copy, Clone, Debug)]
pub enum InputEvent {
    /// Pointer position, normalized to [-1, 1]² with +y upward.
    PointerMoved(Vec2),
    /// Wheel steps; positive zooms out.
    Wheel(f32),
    /// New framebuffer size in pixels.
    Resized(u32, u32),
    /// A key press (no repeats).
    Key(KeyCode),
}

/// Everything a frame callback may touch: the scene renderer and this
/// frame's attachments, plus the input events since the previous frame.
pub struct Frame<'a> {
    /// The renderer issuing this frame's pass.
    pub renderer: &'a mut SceneRenderer,
    /// The surface color attachment.
    pub color_view: &'a wgpu::TextureView,
    /// The depth attachment.
    pub depth_view: &'a wgpu::TextureView,
    /// Input events since the previous frame.
    pub events: &'a [InputEvent],
    /// Current framebuffer size.
    pub size: (u32, u32),
}

/// A native window with a configured wgpu surface and depth buffer.
#[allow(dead_code)] // depth_texture is held to keep its view alive
pub struct Canvas {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    size: (u32, u32),
}

impl Canvas {
    /// Opens a window, initializes the wgpu [`Context`] and configures the
    /// surface. Blocks on adapter and device acquisition.
    pub fn new(title: &str) -> Canvas {
        Canvas::with_size(title, 1280, 800)
    }

    /// Opens a window with an explicit logical size.
    pub fn with_size(title: &str, width: u32, height: u32) -> Canvas {
        let window_attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64));

        let window = EVENT_LOOP.with(|event_loop_cell| {
            let mut event_loop_opt = event_loop_cell.borrow_mut();
            if event_loop_opt.is_none() {
                *event_loop_opt = Some(EventLoop::new().expect("Failed to create event loop"));
            }
            let event_loop = event_loop_opt.as_ref().unwrap();
            #[allow(deprecated)]
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window")
        });
        let window = Arc::new(window);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to find an appropriate adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("uvlab device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        }))
        .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        Context::init(instance, device, queue, surface_format);
        let ctxt = Context::get();

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctxt.device, &surface_config);

        let (depth_texture, depth_view) = create_depth_texture(&ctxt.device, width, height);

        log::info!("canvas opened: {}x{} {:?}", width, height, surface_format);
        Canvas {
            window,
            surface,
            surface_config,
            depth_texture,
            depth_view,
            size: (width, height),
        }
    }

    /// Current framebuffer size.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Runs the frame loop until the window is closed, calling `frame_fn`
    /// once per presented frame.
    ///
    /// On teardown the loop stops requesting frames and the wgpu context is
    /// reset, releasing the renderer's underlying resources.
    pub fn run<F: FnMut(&mut Frame<'_>)>(mut self, mut frame_fn: F) {
        let mut renderer = SceneRenderer::new();
        let mut events = Vec::new();
        let mut pace_start = web_time::Instant::now();
        let mut pace_frames = 0u32;

        loop {
            events.clear();
            if !self.pump_events(&mut events) {
                break;
            }

            let surface_texture = match self.surface.get_current_texture() {
                Ok(texture) => texture,
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    let ctxt = Context::get();
                    self.surface.configure(&ctxt.device, &self.surface_config);
                    continue;
                }
                Err(err) => {
                    log::warn!("skipping frame: {:?}", err);
                    continue;
                }
            };
            let color_view = surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            {
                let mut frame = Frame {
                    renderer: &mut renderer,
                    color_view: &color_view,
                    depth_view: &self.depth_view,
                    events: &events,
                    size: self.size,
                };
                frame_fn(&mut frame);
            }

            self.window.pre_present_notify();
            surface_texture.present();

            pace_frames += 1;
            if pace_frames == 240 {
                let elapsed = pace_start.elapsed().as_secs_f32();
                log::debug!("{:.1} fps", pace_frames as f32 / elapsed.max(1e-6));
                pace_start = web_time::Instant::now();
                pace_frames = 0;
            }
        }

        log::info!("canvas closed, releasing the gpu context");
        drop(renderer);
        drop(self.surface);
        Context::reset();
    }

    /// Pumps the window system, translating raw events. Returns `false`
    /// once the window asked to close.
    fn pump_events(&mut self, out: &mut Vec<InputEvent>) -> bool {
        use winit::platform::pump_events::EventLoopExtPumpEvents;

        struct EventCollector;

        impl ApplicationHandler for EventCollector {
            fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

            fn window_event(
                &mut self,
                _event_loop: &ActiveEventLoop,
                _window_id: WindowId,
                event: WindowEvent,
            ) {
                let raw = match event {
                    WindowEvent::CloseRequested => Some(RawEvent::Close),
                    WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                        Some(RawEvent::Resized(size.width, size.height))
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        Some(RawEvent::CursorMoved(position.x, position.y))
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let steps = match delta {
                            MouseScrollDelta::LineDelta(_, dy) => -dy,
                            MouseScrollDelta::PixelDelta(delta) => -(delta.y as f32) / 40.0,
                        };
                        Some(RawEvent::Wheel(steps))
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        match (event.state.is_pressed(), event.repeat, event.physical_key) {
                            (true, false, PhysicalKey::Code(code)) => Some(RawEvent::Key(code)),
                            _ => None,
                        }
                    }
                    _ => None,
                };

                if let Some(raw) = raw {
                    PENDING_EVENTS.with(|storage| storage.borrow_mut().push(raw));
                }
            }
        }

        EVENT_LOOP.with(|event_loop_cell| {
            if let Some(event_loop) = event_loop_cell.borrow_mut().as_mut() {
                let _ = event_loop.pump_app_events(Some(Duration::ZERO), &mut EventCollector);
            }
        });

        let raw_events = PENDING_EVENTS.with(|storage| storage.borrow_mut().split_off(0));
        for raw in raw_events {
            match raw {
                RawEvent::Close => return false,
                RawEvent::Resized(width, height) => {
                    self.resize(width, height);
                    out.push(InputEvent::Resized(width, height));
                }
                RawEvent::CursorMoved(x, y) => {
                    let (w, h) = (self.size.0 as f64, self.size.1 as f64);
                    out.push(InputEvent::PointerMoved(Vec2::new(
                        (x / w * 2.0 - 1.0) as f32,
                        (1.0 - y / h * 2.0) as f32,
                    )));
                }
                RawEvent::Wheel(steps) => out.push(InputEvent::Wheel(steps)),
                RawEvent::Key(code) => out.push(InputEvent::Key(code)),
            }
        }

        true
    }

    fn resize(&mut self, width: u32, height: u32) {
        let ctxt = Context::get();
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&ctxt.device, &self.surface_config);

        let (depth_texture, depth_view) = create_depth_texture(&ctxt.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
        self.size = (width, height);
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("canvas_depth_texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: Context::depth_format(),
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
