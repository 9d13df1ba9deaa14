//! GPU-side representation of the focal geometry.

use crate::procedural::{MeshData, PolylineData};
use crate::resource::GpuVec;
use glamx::{Vec2, Vec3};
use std::collections::HashSet;

/// The mesh buffers a shading program can bind: separate position / UV /
/// normal vertex buffers plus optional triangle and line index buffers.
///
/// Construction is CPU-only; buffers are uploaded by
/// [`upload`](GpuMesh::upload) when a frame first draws the mesh.
pub struct GpuMesh {
    coords: GpuVec<Vec3>,
    uvs: GpuVec<Vec2>,
    normals: Option<GpuVec<Vec3>>,
    triangles: Option<GpuVec<u32>>,
    lines: Option<GpuVec<u32>>,
}

impl GpuMesh {
    /// Builds the GPU mesh for a triangle mesh.
    ///
    /// Missing UVs are replaced by the neutral pair and, when `lit` is
    /// requested, missing normals are computed from face winding.
    /// `with_edges` additionally derives the unique-edge line list used by
    /// wireframe rendering.
    pub fn from_mesh(mut mesh: MeshData, lit: bool, with_edges: bool) -> GpuMesh {
        mesh.ensure_uvs();
        if lit {
            mesh.ensure_normals();
        }

        let lines = with_edges.then(|| {
            GpuVec::new(unique_edges(&mesh.indices), wgpu::BufferUsages::INDEX)
        });
        let triangles: Vec<u32> = mesh.indices.iter().flatten().copied().collect();

        GpuMesh {
            coords: GpuVec::new(mesh.coords, wgpu::BufferUsages::VERTEX),
            uvs: GpuVec::new(mesh.uvs.unwrap(), wgpu::BufferUsages::VERTEX),
            normals: mesh
                .normals
                .map(|ns| GpuVec::new(ns, wgpu::BufferUsages::VERTEX)),
            triangles: Some(GpuVec::new(triangles, wgpu::BufferUsages::INDEX)),
            lines,
        }
    }

    /// Builds the GPU mesh for a raw sample list (point rendering, or a
    /// connected line strip when `with_strip` is set).
    pub fn from_polyline(line: PolylineData, with_strip: bool) -> GpuMesh {
        let lines = with_strip.then(|| {
            let mut strip = Vec::with_capacity(line.coords.len().saturating_sub(1) * 2);
            for i in 1..line.coords.len() as u32 {
                strip.push(i - 1);
                strip.push(i);
            }
            GpuVec::new(strip, wgpu::BufferUsages::INDEX)
        });

        GpuMesh {
            coords: GpuVec::new(line.coords, wgpu::BufferUsages::VERTEX),
            uvs: GpuVec::new(line.uvs, wgpu::BufferUsages::VERTEX),
            normals: None,
            triangles: None,
            lines,
        }
    }

    /// The number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    /// CPU copy of the positions.
    #[inline]
    pub fn coords(&self) -> &[Vec3] {
        self.coords.data()
    }

    /// CPU copy of the texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &[Vec2] {
        self.uvs.data()
    }

    /// The position buffer, once uploaded.
    #[inline]
    pub fn coords_buffer(&self) -> Option<&wgpu::Buffer> {
        self.coords.buffer()
    }

    /// The UV buffer, once uploaded.
    #[inline]
    pub fn uvs_buffer(&self) -> Option<&wgpu::Buffer> {
        self.uvs.buffer()
    }

    /// The normal buffer, once uploaded.
    #[inline]
    pub fn normals_buffer(&self) -> Option<&wgpu::Buffer> {
        self.normals.as_ref().and_then(|n| n.buffer())
    }

    /// Triangle index buffer and index count, once uploaded.
    pub fn triangle_indices(&self) -> Option<(&wgpu::Buffer, u32)> {
        let t = self.triangles.as_ref()?;
        Some((t.buffer()?, t.len() as u32))
    }

    /// Line index buffer and index count, once uploaded.
    pub fn line_indices(&self) -> Option<(&wgpu::Buffer, u32)> {
        let l = self.lines.as_ref()?;
        Some((l.buffer()?, l.len() as u32))
    }

    /// Whether this mesh carries triangles (vs. a raw sample list).
    #[inline]
    pub fn has_triangles(&self) -> bool {
        self.triangles.is_some()
    }

    /// Number of triangle indices, counted on the RAM copy.
    #[inline]
    pub fn triangle_index_count(&self) -> usize {
        self.triangles.as_ref().map(|t| t.len()).unwrap_or(0)
    }

    /// Uploads every buffer this mesh carries.
    pub fn upload(&mut self) {
        self.coords.upload();
        self.uvs.upload();
        if let Some(ns) = &mut self.normals {
            ns.upload();
        }
        if let Some(ts) = &mut self.triangles {
            ts.upload();
        }
        if let Some(ls) = &mut self.lines {
            ls.upload();
        }
    }
}

/// Flattens a triangle list into its unique undirected edges, as a line
/// list index buffer.
fn unique_edges(triangles: &[[u32; 3]]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for t in triangles {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                out.push(key.0);
                out.push(key.1);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural::NEUTRAL_UV;

    #[test]
    fn shared_edges_are_not_duplicated() {
        // Two triangles sharing the edge (1, 2): 5 unique edges.
        let edges = unique_edges(&[[0, 1, 2], [2, 1, 3]]);
        assert_eq!(edges.len(), 10);
    }

    #[test]
    fn soup_without_uvs_gets_the_neutral_pair() {
        let soup = MeshData::new(vec![Vec3::ZERO; 6], None, None, None);
        let mesh = GpuMesh::from_mesh(soup, false, false);
        assert_eq!(mesh.uvs().len(), 6);
        assert!(mesh.uvs().iter().all(|uv| *uv == NEUTRAL_UV));
    }

    #[test]
    fn lit_mesh_carries_normals() {
        let soup = MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ZERO, Vec3::X, Vec3::Z],
            None,
            None,
            None,
        );
        let mesh = GpuMesh::from_mesh(soup, true, false);
        assert!(mesh.normals.is_some());
    }

    #[test]
    fn polyline_strip_connects_consecutive_samples() {
        let line = PolylineData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], None);
        let mesh = GpuMesh::from_polyline(line, true);
        assert_eq!(mesh.lines.as_ref().unwrap().data(), &[0, 1, 1, 2]);
        assert!(!mesh.has_triangles());
    }
}
