/*!
# uvlab

An interactive 3D mesh laboratory.

**uvlab** renders a single *focal* mesh — a procedural primitive or an
imported triangle soup — in one of four shading modes (points, wireframe,
lit surface, textured surface), and can morph it between its native 3D pose
and a flattened UV-space layout. Around the focal mesh live a decorative
particle field and a coordinate-axis indicator, all driven by one
cooperative, per-frame animation loop.

## Features

* procedural primitives: subdivided box, UV-sphere, helix (polyline or
  swept tube);
* imported triangle soups with optional UVs and diffuse/normal rasters;
* procedural textures: a UV checker grid and a tangent-space normal map,
  synthesized once per process and cached;
* a shader-driven UV-unwrap morph shared by the point and textured modes;
* an eased orbit camera with clamped zoom;
* a windowed canvas for native targets, plus a synthetic tick source so the
  whole animation loop can be driven from tests.

As an example, opening a laboratory on a textured sphere:

```no_run
use uvlab::prelude::*;

fn main() {
    let canvas = Canvas::new("uvlab: sphere");
    let mut lab = Lab::new();

    lab.select_shading(ShadingMode::TexturedSurface);
    lab.select_primitive(Some(Primitive::Sphere));

    canvas.run(move |frame| lab.tick(frame));
}
```

Pointer motion orbits the camera, the mouse wheel zooms, and toggling the
unwrap flag in the interaction state flattens the mesh onto its UV chart.
*/
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;
pub use winit;

#[cfg(not(target_arch = "wasm32"))]
#[doc(hidden)]
pub use pollster;

pub mod camera;
pub mod color;
pub mod context;
pub mod import;
pub mod insight;
pub mod light;
pub mod material;
pub mod procedural;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod sim;
pub mod texture;
pub mod window;

pub mod prelude {
    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::context::*;
    pub use crate::import::*;
    pub use crate::insight::*;
    pub use crate::light::*;
    pub use crate::material::*;
    pub use crate::procedural::*;
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use crate::sim::*;
    pub use crate::texture::*;
    pub use crate::window::*;
    pub use glamx::{Mat3, Mat4, Quat, Vec2, Vec3};
}
