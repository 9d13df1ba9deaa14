//! The mesh-import collaborator boundary.
//!
//! File parsing lives outside the core: an importer hands over a triangle
//! soup, optional UVs and optional rasters, already re-centered at the
//! origin and scaled so the largest bounding-box dimension equals
//! [`IMPORT_TARGET_SIZE`]. This module owns the boundary types, the shape
//! validation, and the normalization helper importers use to honor that
//! contract. A failed import must leave the current focal object untouched,
//! which the validation-first API makes natural: nothing is swapped until
//! [`ImportedMesh::validate`] has passed.

use crate::procedural::MeshData;
use crate::texture::Raster;
use glamx::{Vec2, Vec3};
use std::sync::Arc;
use thiserror::Error;

/// Largest bounding-box dimension of a normalized import, in world units.
pub const IMPORT_TARGET_SIZE: f32 = 400.0;

/// Why an imported buffer was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The blob produced no geometry at all.
    #[error("no geometry found in the imported data")]
    NoGeometry,
    /// The position buffer does not describe whole vertices.
    #[error("position buffer length {0} is not divisible by 3")]
    RaggedPositions(usize),
    /// The UV buffer does not pair up with the vertices.
    #[error("uv buffer holds {0} floats but the mesh has {1} vertices")]
    MismatchedUvs(usize, usize),
}

/// What an importer yields on success.
pub struct ImportedMesh {
    /// Flat position triples.
    pub positions: Vec<f32>,
    /// Flat UV pairs, one per vertex, if the source carried any.
    pub uvs: Option<Vec<f32>>,
    /// Diffuse color raster, if the source carried one.
    pub diffuse: Option<Arc<Raster>>,
    /// Tangent-space normal raster, if the source carried one.
    pub normal_map: Option<Arc<Raster>>,
}

impl ImportedMesh {
    /// Checks the basic shape contract. Callers must validate before
    /// swapping the focal object so a malformed import changes nothing.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.positions.is_empty() {
            return Err(ImportError::NoGeometry);
        }
        if self.positions.len() % 3 != 0 {
            return Err(ImportError::RaggedPositions(self.positions.len()));
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != self.vertex_count() * 2 {
                return Err(ImportError::MismatchedUvs(uvs.len(), self.vertex_count()));
            }
        }
        Ok(())
    }

    /// The number of vertices described by the position buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the source carried texture coordinates.
    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Re-centers the mesh at the origin and scales it uniformly so its
    /// largest bounding-box dimension equals [`IMPORT_TARGET_SIZE`].
    /// Importers call this to honor the normalization contract.
    pub fn normalize(&mut self) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in self.positions.chunks_exact(3) {
            let v = Vec3::new(p[0], p[1], p[2]);
            min = min.min(v);
            max = max.max(v);
        }

        let center = (min + max) * 0.5;
        let extent = max - min;
        let largest = extent.x.max(extent.y).max(extent.z);
        let scale = if largest > 0.0 {
            IMPORT_TARGET_SIZE / largest
        } else {
            1.0
        };

        for p in self.positions.chunks_exact_mut(3) {
            p[0] = (p[0] - center.x) * scale;
            p[1] = (p[1] - center.y) * scale;
            p[2] = (p[2] - center.z) * scale;
        }
    }

    /// Converts the validated buffers into mesh data, substituting the
    /// neutral UV pair when the source had none.
    pub fn to_mesh_data(&self) -> MeshData {
        let coords = self
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        let uvs = self.uvs.as_ref().map(|uvs| {
            uvs.chunks_exact(2)
                .map(|uv| Vec2::new(uv[0], uv[1]))
                .collect()
        });

        let mut mesh = MeshData::new(coords, None, uvs, None);
        mesh.ensure_uvs();
        mesh
    }
}

/// The import collaborator: turns an opaque blob into a normalized mesh, or
/// declares failure.
pub trait MeshImporter {
    /// Parses `blob`. Implementations return an already-normalized mesh.
    fn import(&self, blob: &[u8]) -> Result<ImportedMesh, ImportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural::NEUTRAL_UV;

    fn soup(positions: Vec<f32>) -> ImportedMesh {
        ImportedMesh {
            positions,
            uvs: None,
            diffuse: None,
            normal_map: None,
        }
    }

    #[test]
    fn ragged_buffer_is_rejected() {
        let mesh = soup(vec![0.0; 10]);
        assert!(matches!(
            mesh.validate(),
            Err(ImportError::RaggedPositions(10))
        ));
    }

    #[test]
    fn empty_buffer_is_a_distinct_failure() {
        let mesh = soup(Vec::new());
        assert!(matches!(mesh.validate(), Err(ImportError::NoGeometry)));
    }

    #[test]
    fn missing_uvs_become_the_neutral_pair() {
        let mesh = soup(vec![0.0; 18]).to_mesh_data();
        let uvs = mesh.uvs.unwrap();
        assert_eq!(uvs.len(), 6);
        assert!(uvs.iter().all(|uv| *uv == NEUTRAL_UV));
    }

    #[test]
    fn normalization_centers_and_scales_to_the_target() {
        let mut mesh = soup(vec![
            10.0, 0.0, 0.0, //
            30.0, 5.0, 0.0, //
            10.0, 5.0, 2.0,
        ]);
        mesh.normalize();

        let data = mesh.to_mesh_data();
        let min = data
            .coords
            .iter()
            .fold(Vec3::splat(f32::MAX), |acc, c| acc.min(*c));
        let max = data
            .coords
            .iter()
            .fold(Vec3::splat(f32::MIN), |acc, c| acc.max(*c));
        let extent = max - min;

        assert!((extent.x.max(extent.y).max(extent.z) - IMPORT_TARGET_SIZE).abs() < 1e-3);
        assert!(((min + max) * 0.5).length() < 1e-3);
    }
}
