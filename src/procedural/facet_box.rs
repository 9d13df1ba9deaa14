use crate::procedural::mesh_data::MeshData;
use crate::procedural::utils;
use crate::procedural::{BOX_FACETS, BOX_SIDE};
use glamx::{Vec2, Vec3};

/// Generates the laboratory's box primitive: a cube of side [`BOX_SIDE`]
/// centered at the origin, each face subdivided into a
/// [`BOX_FACETS`]×[`BOX_FACETS`] grid with its own [0,1]² UV chart.
pub fn facet_box() -> MeshData {
    // (u axis, v axis, outward normal) per face, chosen so u × v = n and the
    // generated triangles wind counterclockwise seen from outside.
    let faces = [
        (-Vec3::Z, Vec3::Y, Vec3::X),
        (Vec3::Z, Vec3::Y, -Vec3::X),
        (Vec3::X, -Vec3::Z, Vec3::Y),
        (Vec3::X, Vec3::Z, -Vec3::Y),
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Y, -Vec3::Z),
    ];

    let n = BOX_FACETS;
    let verts_per_side = n + 1;
    let mut coords = Vec::with_capacity((verts_per_side * verts_per_side * 6) as usize);
    let mut normals = Vec::with_capacity(coords.capacity());
    let mut uvs = Vec::with_capacity(coords.capacity());
    let mut indices = Vec::with_capacity((n * n * 2 * 6) as usize);

    for (u_axis, v_axis, normal) in faces {
        let base = coords.len() as u32;
        let center = normal * (BOX_SIDE * 0.5);

        for j in 0..verts_per_side {
            for i in 0..verts_per_side {
                let fu = i as f32 / n as f32;
                let fv = j as f32 / n as f32;
                coords.push(
                    center
                        + u_axis * ((fu - 0.5) * BOX_SIDE)
                        + v_axis * ((fv - 0.5) * BOX_SIDE),
                );
                normals.push(normal);
                uvs.push(Vec2::new(fu, fv));
            }
        }

        for j in 0..n {
            for i in 0..n {
                let dl = base + j * verts_per_side + i;
                let dr = dl + 1;
                let ul = dl + verts_per_side;
                let ur = ul + 1;
                utils::push_quad_indices(ul, ur, dl, dr, &mut indices);
            }
        }
    }

    MeshData::new(coords, Some(normals), Some(uvs), Some(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_six_uv_charted_faces() {
        let mesh = facet_box();
        let per_face = ((BOX_FACETS + 1) * (BOX_FACETS + 1)) as usize;
        assert_eq!(mesh.vertex_count(), per_face * 6);
        assert_eq!(mesh.indices.len(), (BOX_FACETS * BOX_FACETS * 2 * 6) as usize);
        assert!(mesh.has_normals() && mesh.has_uvs());
    }

    #[test]
    fn box_vertices_lie_on_the_cube_surface() {
        let mesh = facet_box();
        let half = BOX_SIDE * 0.5;
        for c in &mesh.coords {
            let m = c.x.abs().max(c.y.abs()).max(c.z.abs());
            assert!((m - half).abs() < 1e-3);
        }
    }

    #[test]
    fn box_indices_stay_in_bounds() {
        let mesh = facet_box();
        let max = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().flatten().all(|i| *i < max));
    }

    #[test]
    fn box_uvs_cover_the_unit_square() {
        let mesh = facet_box();
        let uvs = mesh.uvs.as_ref().unwrap();
        assert!(uvs.iter().all(|uv| (0.0..=1.0).contains(&uv.x)
            && (0.0..=1.0).contains(&uv.y)));
    }
}
