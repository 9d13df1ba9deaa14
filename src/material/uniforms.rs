//! CPU mirrors of the WGSL uniform blocks.
//!
//! Field order and padding must match the structs declared in the `.wgsl`
//! programs; all three programs share the same two blocks so the layouts
//! are written down exactly once per side.

use crate::material::FrameState;
use bytemuck::{Pod, Zeroable};

/// Per-frame uniforms: camera matrices plus the light rig.
///
/// Layout matches `FrameUniforms` in the WGSL programs (224 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// Camera position; w unused.
    pub eye: [f32; 4],
    /// Ambient intensity in x; yzw unused.
    pub ambient: [f32; 4],
    /// Directional light travel direction; w unused.
    pub dir_direction: [f32; 4],
    /// Directional light color; intensity in w.
    pub dir_color: [f32; 4],
    /// Point light position; attenuation radius in w.
    pub point_position: [f32; 4],
    /// Point light color; intensity in w.
    pub point_color: [f32; 4],
}

impl FrameUniforms {
    pub fn from_frame(frame: &FrameState<'_>) -> FrameUniforms {
        let rig = frame.lights;
        FrameUniforms {
            view: frame.view.to_cols_array_2d(),
            proj: frame.proj.to_cols_array_2d(),
            eye: [frame.eye.x, frame.eye.y, frame.eye.z, 0.0],
            ambient: [rig.ambient, 0.0, 0.0, 0.0],
            dir_direction: [
                rig.directional.direction.x,
                rig.directional.direction.y,
                rig.directional.direction.z,
                0.0,
            ],
            dir_color: [
                rig.directional.color.r,
                rig.directional.color.g,
                rig.directional.color.b,
                rig.directional.intensity,
            ],
            point_position: [
                rig.point.position.x,
                rig.point.position.y,
                rig.point.position.z,
                rig.point.attenuation_radius,
            ],
            point_color: [
                rig.point.color.r,
                rig.point.color.g,
                rig.point.color.b,
                rig.point.intensity,
            ],
        }
    }
}

/// Per-object uniforms: model transform plus the mode's scalar knobs.
///
/// Layout matches `ObjectUniforms` in the WGSL programs (128 bytes). The
/// unwrap mix lives here once and is visible to both shader stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub unwrap_mix: f32,
    pub unwrap_spread: f32,
    pub normal_intensity: f32,
    pub uv_repeat: f32,
    pub point_size: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub use_diffuse: f32,
    pub _pad: [f32; 3],
}

/// One focal sample in the point-mode storage buffer: position in `pos.xyz`,
/// texture coordinate in `uv.xy`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointVertex {
    pub pos: [f32; 4],
    pub uv: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_blocks_have_their_declared_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 224);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 128);
        assert_eq!(std::mem::size_of::<PointVertex>(), 32);
    }
}
