//! The UV-unwrap morph, shared by the CPU and the shader programs.
//!
//! A vertex at mix 0 sits in its native pose; at mix 1 it sits on a flat
//! chart where its UV coordinate picks the spot. The WGSL programs mirror
//! [`flatten_position`] and [`morph_position`] exactly, so this module is
//! the single place the morph is defined (and the place tests exercise it).

use glamx::{Vec2, Vec3};

/// Side of the flattened chart, in world units. Matches the importer's
/// normalization target so a fully unwrapped mesh keeps its footprint.
pub const UNWRAP_SPREAD: f32 = 400.0;

/// Per-frame easing applied to the unwrap mix scalar.
pub const MIX_EASING: f32 = 0.05;

/// Distance below which the mix snaps onto its target.
pub const MIX_SNAP: f32 = 1e-3;

/// Mix values above this threshold suspend the idle spin and start easing
/// the focal rotation back to zero.
pub const SPIN_SUSPEND_THRESHOLD: f32 = 0.01;

/// Where a vertex with the given UV lands on the flattened chart.
#[inline]
pub fn flatten_position(uv: Vec2) -> Vec3 {
    Vec3::new(
        (uv.x - 0.5) * UNWRAP_SPREAD,
        (uv.y - 0.5) * UNWRAP_SPREAD,
        0.0,
    )
}

/// Blends a vertex between its native position and its chart position.
#[inline]
pub fn morph_position(native: Vec3, uv: Vec2, mix: f32) -> Vec3 {
    native.lerp(flatten_position(uv), mix)
}

/// Blends a normal toward the camera-facing chart normal.
#[inline]
pub fn morph_normal(native: Vec3, mix: f32) -> Vec3 {
    let blended = native.lerp(Vec3::Z, mix);
    if blended.length_squared() > 0.0 {
        blended.normalize()
    } else {
        Vec3::Z
    }
}

/// Advances the mix one frame toward `target` (0.0 or 1.0).
///
/// The result moves monotonically, never leaves [0, 1], and snaps exactly
/// onto the target once within [`MIX_SNAP`].
#[inline]
pub fn ease_mix(current: f32, target: f32) -> f32 {
    let next = current + (target - current) * MIX_EASING;
    if (target - next).abs() < MIX_SNAP {
        target
    } else {
        next.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_corners_span_the_spread() {
        let half = UNWRAP_SPREAD * 0.5;
        assert_eq!(
            flatten_position(Vec2::new(0.0, 0.0)),
            Vec3::new(-half, -half, 0.0)
        );
        assert_eq!(
            flatten_position(Vec2::new(1.0, 1.0)),
            Vec3::new(half, half, 0.0)
        );
        assert_eq!(flatten_position(Vec2::new(0.5, 0.5)), Vec3::ZERO);
    }

    #[test]
    fn mix_rises_monotonically_and_converges() {
        let mut mix = 0.0f32;
        let mut prev = mix;
        for _ in 0..500 {
            mix = ease_mix(mix, 1.0);
            assert!(mix >= prev);
            assert!((0.0..=1.0).contains(&mix));
            prev = mix;
        }
        assert_eq!(mix, 1.0);
    }

    #[test]
    fn mix_falls_monotonically_after_retarget() {
        let mut mix = 1.0f32;
        let mut prev = mix;
        for _ in 0..500 {
            mix = ease_mix(mix, 0.0);
            assert!(mix <= prev);
            prev = mix;
        }
        assert_eq!(mix, 0.0);
    }

    #[test]
    fn morph_at_full_mix_lands_on_the_chart() {
        let native = Vec3::new(123.0, -80.0, 311.0);
        let uv = Vec2::new(0.25, 0.75);
        assert_eq!(morph_position(native, uv, 1.0), flatten_position(uv));
        assert_eq!(morph_position(native, uv, 0.0), native);
    }

    #[test]
    fn morph_normal_faces_the_camera_when_flat() {
        let n = morph_normal(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!((n - Vec3::Z).length() < 1e-6);
    }
}
