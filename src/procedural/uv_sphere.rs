use crate::procedural::mesh_data::MeshData;
use crate::procedural::utils;
use crate::procedural::{SPHERE_RADIUS, SPHERE_SUBDIV};
use glamx::{Vec2, Vec3};

/// Generates the laboratory's sphere primitive: a UV-sphere of radius
/// [`SPHERE_RADIUS`] with [`SPHERE_SUBDIV`] rings and segments, dense enough
/// for smooth surface shading.
///
/// The seam column is duplicated so texture coordinates wrap cleanly.
pub fn uv_sphere() -> MeshData {
    let rings = SPHERE_SUBDIV;
    let segments = SPHERE_SUBDIV;
    let cols = segments + 1;

    let mut coords = Vec::with_capacity(((rings + 1) * cols) as usize);
    let mut normals = Vec::with_capacity(coords.capacity());
    let mut uvs = Vec::with_capacity(coords.capacity());
    let mut indices = Vec::with_capacity((rings * segments * 2) as usize);

    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let dir = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            coords.push(dir * SPHERE_RADIUS);
            normals.push(dir);
            uvs.push(Vec2::new(u, v));
        }
    }

    for r in 0..rings {
        for s in 0..segments {
            let ul = r * cols + s + 1;
            let ur = r * cols + s;
            let dl = (r + 1) * cols + s + 1;
            let dr = (r + 1) * cols + s;
            utils::push_quad_indices(ul, ur, dl, dr, &mut indices);
        }
    }

    MeshData::new(coords, Some(normals), Some(uvs), Some(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let mesh = uv_sphere();
        for c in &mesh.coords {
            assert!((c.length() - SPHERE_RADIUS).abs() < 1e-2);
        }
    }

    #[test]
    fn sphere_resolution_matches_subdivision() {
        let mesh = uv_sphere();
        let cols = (SPHERE_SUBDIV + 1) as usize;
        assert_eq!(mesh.vertex_count(), cols * cols);
        assert_eq!(
            mesh.indices.len(),
            (SPHERE_SUBDIV * SPHERE_SUBDIV * 2) as usize
        );
    }

    #[test]
    fn sphere_faces_wind_outward() {
        let mesh = uv_sphere();
        let face_normals = utils::compute_vertex_normals(&mesh.coords, &mesh.indices);
        let mut checked = 0;
        for (c, n) in mesh.coords.iter().zip(face_normals.iter()) {
            // Pole vertices accumulate degenerate fans; skip near-zero sums.
            if n.length_squared() > 0.0 && c.length() > 0.0 {
                assert!(c.normalize().dot(*n) > 0.5);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }
}
