//! Procedural generation of the laboratory's focal meshes.
//!
//! Everything here is CPU-side: builders produce [`MeshData`] (triangles) or
//! [`PolylineData`] (connected samples) that the resource layer uploads
//! lazily when a GPU context exists.

pub use self::facet_box::facet_box;
pub use self::helix::{helix_polyline, helix_tube};
pub use self::mesh_data::{MeshData, PolylineData, NEUTRAL_UV};
pub use self::uv_sphere::uv_sphere;

mod facet_box;
mod helix;
mod mesh_data;
pub mod utils;
mod uv_sphere;

/// The procedural primitives the laboratory can display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primitive {
    /// A subdivided cube.
    Box,
    /// A high-resolution UV-sphere.
    Sphere,
    /// A parametric helix, drawn as a curve or swept into a tube.
    Helix,
}

/// Side length of the box primitive.
pub const BOX_SIDE: f32 = 320.0;
/// Facets per box face edge.
pub const BOX_FACETS: u32 = 4;
/// Radius of the sphere primitive.
pub const SPHERE_RADIUS: f32 = 200.0;
/// Rings and segments of the sphere primitive.
pub const SPHERE_SUBDIV: u32 = 64;
/// Number of samples along the helix curve.
pub const HELIX_SAMPLES: u32 = 3000;
/// Full turns traced by the helix.
pub const HELIX_TURNS: f32 = 10.0;
/// Radius of the helix coil.
pub const HELIX_RADIUS: f32 = 150.0;
/// Total height of the helix.
pub const HELIX_HEIGHT: f32 = 400.0;
/// Centerline segments of the swept helix tube.
pub const HELIX_TUBE_SEGMENTS: u32 = 400;
/// Radial subdivisions of the helix tube cross-section.
pub const HELIX_TUBE_SUBDIV: u32 = 12;
/// Radius of the helix tube cross-section.
pub const HELIX_TUBE_RADIUS: f32 = 18.0;
