use crate::procedural::utils;
use glamx::{Vec2, Vec3};

/// The UV coordinate substituted for every vertex of a mesh that carries no
/// texture coordinates, so downstream shader logic never branches on absence.
pub const NEUTRAL_UV: Vec2 = Vec2::new(0.5, 0.5);

/// CPU-side description of a triangle mesh.
///
/// Vertex positions always describe whole triangles through `indices`;
/// normals and UVs are optional and are filled in on demand by
/// [`ensure_normals`](MeshData::ensure_normals) and
/// [`ensure_uvs`](MeshData::ensure_uvs).
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub coords: Vec<Vec3>,
    /// Per-vertex normals, if present.
    pub normals: Option<Vec<Vec3>>,
    /// Per-vertex texture coordinates, if present.
    pub uvs: Option<Vec<Vec2>>,
    /// Triangles as indices into `coords`.
    pub indices: Vec<[u32; 3]>,
}

impl MeshData {
    /// Creates a new mesh. If `indices` is `None`, trivial sequential
    /// indices are generated, treating `coords` as a triangle soup.
    pub fn new(
        coords: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<Vec2>>,
        indices: Option<Vec<[u32; 3]>>,
    ) -> MeshData {
        let indices = indices.unwrap_or_else(|| {
            (0..coords.len() as u32 / 3)
                .map(|i| [i * 3, i * 3 + 1, i * 3 + 2])
                .collect()
        });

        MeshData {
            coords,
            normals,
            uvs,
            indices,
        }
    }

    /// The number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    /// Whether this mesh has per-vertex normals.
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Whether this mesh has texture coordinates.
    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Computes per-vertex normals from face winding if none are present.
    pub fn ensure_normals(&mut self) {
        if self.normals.is_none() {
            self.normals = Some(utils::compute_vertex_normals(
                &self.coords,
                &self.indices,
            ));
        }
    }

    /// Substitutes the neutral UV for every vertex if no UVs are present.
    pub fn ensure_uvs(&mut self) {
        if self.uvs.is_none() {
            self.uvs = Some(vec![NEUTRAL_UV; self.coords.len()]);
        }
    }

    /// Scales every vertex position componentwise.
    pub fn scale_by(&mut self, scale: Vec3) {
        for c in &mut self.coords {
            *c *= scale;
        }
    }
}

/// CPU-side description of a connected curve: one position and one UV per
/// sample, rendered as points or as a line strip.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineData {
    /// Sample positions.
    pub coords: Vec<Vec3>,
    /// Per-sample texture coordinates.
    pub uvs: Vec<Vec2>,
}

impl PolylineData {
    /// Creates a new polyline. If `uvs` is `None`, the neutral UV is
    /// substituted for every sample.
    pub fn new(coords: Vec<Vec3>, uvs: Option<Vec<Vec2>>) -> PolylineData {
        let uvs = uvs.unwrap_or_else(|| vec![NEUTRAL_UV; coords.len()]);
        PolylineData { coords, uvs }
    }

    /// The number of samples.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soup_indices_cover_whole_triangles() {
        let coords = vec![Vec3::ZERO; 9];
        let mesh = MeshData::new(coords, None, None, None);
        assert_eq!(mesh.indices, vec![[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
    }

    #[test]
    fn neutral_uvs_fill_one_pair_per_vertex() {
        let coords = vec![Vec3::ZERO; 12];
        let mut mesh = MeshData::new(coords, None, None, None);
        mesh.ensure_uvs();
        let uvs = mesh.uvs.unwrap();
        assert_eq!(uvs.len(), 12);
        assert!(uvs.iter().all(|uv| *uv == NEUTRAL_UV));
    }

    #[test]
    fn ensure_normals_is_idempotent() {
        let coords = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh = MeshData::new(coords, None, None, None);
        mesh.ensure_normals();
        let first = mesh.normals.clone().unwrap();
        assert!((first[0].z - 1.0).abs() < 1e-6);
        mesh.ensure_normals();
        assert_eq!(mesh.normals.unwrap(), first);
    }
}
