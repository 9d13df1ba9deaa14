use crate::procedural::mesh_data::{MeshData, PolylineData};
use crate::procedural::utils;
use crate::procedural::{
    HELIX_HEIGHT, HELIX_RADIUS, HELIX_SAMPLES, HELIX_TUBE_RADIUS, HELIX_TUBE_SEGMENTS,
    HELIX_TUBE_SUBDIV, HELIX_TURNS,
};
use glamx::{Pose3, Vec2, Vec3};

/// A point of the parametric helix at curve parameter `t ∈ [0, 1]`.
fn helix_point(t: f32) -> Vec3 {
    let angle = t * HELIX_TURNS * std::f32::consts::TAU;
    Vec3::new(
        angle.cos() * HELIX_RADIUS,
        (t - 0.5) * HELIX_HEIGHT,
        angle.sin() * HELIX_RADIUS,
    )
}

/// Generates the helix as a raw sample list: [`HELIX_SAMPLES`] positions
/// tracing [`HELIX_TURNS`] turns, used by the point and wireframe modes.
///
/// UVs map `u` to the curve parameter and `v` to the phase within the
/// current turn, so the unwrap morph spreads the coil over the chart.
pub fn helix_polyline() -> PolylineData {
    let mut coords = Vec::with_capacity(HELIX_SAMPLES as usize);
    let mut uvs = Vec::with_capacity(HELIX_SAMPLES as usize);

    for i in 0..HELIX_SAMPLES {
        let t = i as f32 / (HELIX_SAMPLES - 1) as f32;
        coords.push(helix_point(t));
        uvs.push(Vec2::new(t, (t * HELIX_TURNS).fract()));
    }

    PolylineData::new(coords, Some(uvs))
}

/// Generates the helix as a swept tube for the surface modes: a circular
/// cross-section of [`HELIX_TUBE_SUBDIV`] points extruded along a smoothed
/// centerline through the same samples as [`helix_polyline`].
///
/// The cross-section seam is duplicated so the around-the-tube UV stays in
/// [0, 1] without wrapping artifacts.
pub fn helix_tube() -> MeshData {
    let centers = smoothed_centerline();
    let cols = HELIX_TUBE_SUBDIV + 1;

    let mut coords = Vec::with_capacity((HELIX_TUBE_SEGMENTS * cols) as usize);
    let mut normals = Vec::with_capacity(coords.capacity());
    let mut uvs = Vec::with_capacity(coords.capacity());
    let mut indices = Vec::new();
    let mut prev_base = 0u32;

    for (seg, center) in centers.iter().enumerate() {
        let t = seg as f32 / (centers.len() - 1) as f32;
        let dir = centerline_tangent(&centers, seg);

        // The frame maps local +Z onto the travel direction; guard the
        // vertical-tangent singularity the same way a path stroke does.
        let frame = if dir.x == 0.0 && dir.z == 0.0 {
            Pose3::face_towards(*center, *center + dir, Vec3::X)
        } else {
            Pose3::face_towards(*center, *center + dir, Vec3::Y)
        };

        let base = coords.len() as u32;
        for k in 0..cols {
            let around = k as f32 / HELIX_TUBE_SUBDIV as f32;
            let alpha = around * std::f32::consts::TAU;
            let local = Vec3::new(
                alpha.cos() * HELIX_TUBE_RADIUS,
                alpha.sin() * HELIX_TUBE_RADIUS,
                0.0,
            );
            let p = frame * local;
            coords.push(p);
            normals.push((p - *center).normalize());
            uvs.push(Vec2::new(t, around));
        }

        if seg != 0 {
            utils::push_open_ring_indices(base, prev_base, cols, &mut indices);
        }
        prev_base = base;
    }

    MeshData::new(coords, Some(normals), Some(uvs), Some(indices))
}

/// Resamples the helix at [`HELIX_TUBE_SEGMENTS`] points and relaxes the
/// result with one neighbor-averaging pass, standing in for a spline fit.
fn smoothed_centerline() -> Vec<Vec3> {
    let mut centers = Vec::with_capacity(HELIX_TUBE_SEGMENTS as usize);
    for i in 0..HELIX_TUBE_SEGMENTS {
        let t = i as f32 / (HELIX_TUBE_SEGMENTS - 1) as f32;
        centers.push(helix_point(t));
    }

    let raw = centers.clone();
    for i in 1..raw.len() - 1 {
        centers[i] = (raw[i - 1] + raw[i] * 2.0 + raw[i + 1]) / 4.0;
    }

    centers
}

fn centerline_tangent(centers: &[Vec3], i: usize) -> Vec3 {
    let prev = if i == 0 { i } else { i - 1 };
    let next = if i == centers.len() - 1 { i } else { i + 1 };
    (centers[next] - centers[prev]).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_sample_count_and_uv_range() {
        let line = helix_polyline();
        assert_eq!(line.vertex_count(), HELIX_SAMPLES as usize);
        assert!(line.uvs.iter().all(|uv| (0.0..=1.0).contains(&uv.x)
            && (0.0..=1.0).contains(&uv.y)));
    }

    #[test]
    fn polyline_spans_the_full_height() {
        let line = helix_polyline();
        let min = line.coords.iter().map(|c| c.y).fold(f32::MAX, f32::min);
        let max = line.coords.iter().map(|c| c.y).fold(f32::MIN, f32::max);
        assert!((max - min - HELIX_HEIGHT).abs() < 1.0);
    }

    #[test]
    fn tube_rings_connect_every_segment() {
        let tube = helix_tube();
        let cols = (HELIX_TUBE_SUBDIV + 1) as usize;
        assert_eq!(tube.vertex_count(), HELIX_TUBE_SEGMENTS as usize * cols);
        // Two triangles per quad, one quad strip between consecutive rings.
        assert_eq!(
            tube.indices.len(),
            (HELIX_TUBE_SEGMENTS as usize - 1) * (cols - 1) * 2
        );
        let max = tube.vertex_count() as u32;
        assert!(tube.indices.iter().flatten().all(|i| *i < max));
    }

    #[test]
    fn tube_stays_near_the_coil_radius() {
        let tube = helix_tube();
        for c in &tube.coords {
            let planar = (c.x * c.x + c.z * c.z).sqrt();
            assert!(planar > HELIX_RADIUS - 2.0 * HELIX_TUBE_RADIUS);
            assert!(planar < HELIX_RADIUS + 2.0 * HELIX_TUBE_RADIUS);
        }
    }
}
