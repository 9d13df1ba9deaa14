//! Index and normal helpers shared by the primitive builders.

use glamx::Vec3;

/// Given the four corners of a grid cell, pushes its two counterclockwise
/// triangles to `out`.
///
/// # Arguments
/// * `ul` - the up-left corner.
/// * `ur` - the up-right corner.
/// * `dl` - the down-left corner.
/// * `dr` - the down-right corner.
#[inline]
pub fn push_quad_indices(ul: u32, ur: u32, dl: u32, dr: u32, out: &mut Vec<[u32; 3]>) {
    out.push([ul, dl, dr]);
    out.push([dr, ur, ul]);
}

/// Connects two rings with the same subdivision count, leaving the seam open.
#[inline]
pub fn push_open_ring_indices(
    base_lower: u32,
    base_upper: u32,
    nsubdiv: u32,
    out: &mut Vec<[u32; 3]>,
) {
    assert!(nsubdiv > 0);

    for i in 0..nsubdiv - 1 {
        push_quad_indices(
            base_upper + i + 1,
            base_upper + i,
            base_lower + i + 1,
            base_lower + i,
            out,
        );
    }
}

/// Connects two rings with the same subdivision count, closing the seam.
#[inline]
pub fn push_ring_indices(
    base_lower: u32,
    base_upper: u32,
    nsubdiv: u32,
    out: &mut Vec<[u32; 3]>,
) {
    push_open_ring_indices(base_lower, base_upper, nsubdiv, out);

    push_quad_indices(
        base_upper,
        base_upper + nsubdiv - 1,
        base_lower,
        base_lower + nsubdiv - 1,
        out,
    );
}

/// Computes area-weighted per-vertex normals from face winding.
///
/// Faces contribute their unnormalized cross product, so larger faces weigh
/// more; the accumulated vector is normalized at the end. Degenerate faces
/// contribute nothing.
pub fn compute_vertex_normals(coords: &[Vec3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; coords.len()];

    for f in faces {
        let edge1 = coords[f[1] as usize] - coords[f[0] as usize];
        let edge2 = coords[f[2] as usize] - coords[f[0] as usize];
        let cross = edge1.cross(edge2);

        normals[f[0] as usize] += cross;
        normals[f[1] as usize] += cross;
        normals[f[2] as usize] += cross;
    }

    for n in &mut normals {
        if n.length_squared() > 0.0 {
            *n = n.normalize();
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_are_two_triangles() {
        let mut out = Vec::new();
        push_quad_indices(0, 1, 2, 3, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn ring_indices_close_the_seam() {
        let mut open = Vec::new();
        let mut closed = Vec::new();
        push_open_ring_indices(0, 4, 4, &mut open);
        push_ring_indices(0, 4, 4, &mut closed);
        assert_eq!(closed.len(), open.len() + 2);
    }

    #[test]
    fn flat_triangle_normals_point_up() {
        let coords = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
        ];
        let normals = compute_vertex_normals(&coords, &[[0, 1, 2]]);
        for n in normals {
            assert!((n - Vec3::Y).length() < 1e-6);
        }
    }
}
