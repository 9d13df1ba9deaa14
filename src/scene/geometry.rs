use crate::import::ImportedMesh;
use crate::material::ShadingMode;
use crate::procedural::{facet_box, helix_polyline, helix_tube, uv_sphere, Primitive};
use crate::resource::GpuMesh;

/// Where the focal geometry comes from.
pub enum GeometrySource {
    /// One of the procedural primitives.
    Primitive(Primitive),
    /// A validated, normalized triangle soup from the import boundary.
    Imported(ImportedMesh),
}

impl GeometrySource {
    /// Short label used for logging and benchmark requests.
    pub fn kind(&self) -> &'static str {
        match self {
            GeometrySource::Primitive(Primitive::Box) => "box",
            GeometrySource::Primitive(Primitive::Sphere) => "sphere",
            GeometrySource::Primitive(Primitive::Helix) => "helix",
            GeometrySource::Imported(_) => "imported",
        }
    }

    /// Whether the source carries real texture coordinates (primitives
    /// always do; imports may not).
    pub fn has_uvs(&self) -> bool {
        match self {
            GeometrySource::Primitive(_) => true,
            GeometrySource::Imported(imported) => imported.has_uvs(),
        }
    }
}

/// Builds the focal geometry for a source under a shading mode.
///
/// The mode decides the representation: surface modes get normals (and the
/// tube form of the helix), wireframe gets an edge list (or a connected
/// strip for the raw helix samples), points get bare samples. Imported
/// buffers are used verbatim; their missing UVs are substituted with the
/// neutral pair and normals are computed only when surface lighting needs
/// them.
pub fn build_geometry(source: &GeometrySource, mode: ShadingMode) -> GpuMesh {
    let lit = mode.lights_surface();
    let with_edges = mode == ShadingMode::Wireframe;

    let mesh = match source {
        GeometrySource::Primitive(Primitive::Box) => {
            GpuMesh::from_mesh(facet_box(), lit, with_edges)
        }
        GeometrySource::Primitive(Primitive::Sphere) => {
            GpuMesh::from_mesh(uv_sphere(), lit, with_edges)
        }
        GeometrySource::Primitive(Primitive::Helix) => {
            if mode.wants_surface_geometry() {
                GpuMesh::from_mesh(helix_tube(), lit, with_edges)
            } else {
                GpuMesh::from_polyline(helix_polyline(), with_edges)
            }
        }
        GeometrySource::Imported(imported) => {
            GpuMesh::from_mesh(imported.to_mesh_data(), lit, with_edges)
        }
    };

    log::debug!(
        "built {} geometry for {:?}: {} vertices",
        source.kind(),
        mode,
        mesh.vertex_count()
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural::{HELIX_SAMPLES, NEUTRAL_UV};

    #[test]
    fn every_primitive_builds_whole_triangles() {
        for primitive in [Primitive::Box, Primitive::Sphere, Primitive::Helix] {
            let mesh = build_geometry(
                &GeometrySource::Primitive(primitive),
                ShadingMode::TexturedSurface,
            );
            assert!(mesh.has_triangles());
            assert_eq!(mesh.triangle_index_count() % 3, 0);
            assert!(mesh.triangle_index_count() > 0);
        }
    }

    #[test]
    fn helix_switches_representation_with_the_mode() {
        let curve = build_geometry(
            &GeometrySource::Primitive(Primitive::Helix),
            ShadingMode::Points,
        );
        assert!(!curve.has_triangles());
        assert_eq!(curve.vertex_count(), HELIX_SAMPLES as usize);

        let tube = build_geometry(
            &GeometrySource::Primitive(Primitive::Helix),
            ShadingMode::LitSurface,
        );
        assert!(tube.has_triangles());
    }

    #[test]
    fn imported_soup_without_uvs_gets_neutral_pairs() {
        let imported = ImportedMesh {
            positions: vec![0.0; 27],
            uvs: None,
            diffuse: None,
            normal_map: None,
        };
        let mesh = build_geometry(&GeometrySource::Imported(imported), ShadingMode::Points);
        assert_eq!(mesh.uvs().len(), 9);
        assert!(mesh.uvs().iter().all(|uv| *uv == NEUTRAL_UV));
    }
}
