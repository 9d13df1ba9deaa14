//! GPU-side resources: lazily uploaded buffers, meshes and textures.

pub use self::gpu_mesh::GpuMesh;
pub use self::gpu_vec::GpuVec;
pub use self::texture::Texture;

mod gpu_mesh;
mod gpu_vec;
mod texture;
