//! The laboratory's fixed light rig.
//!
//! Surface shading uses exactly three contributions: a scene-wide ambient
//! term, one directional key light and one point accent light. The rig is
//! plain data; the material layer mirrors it into shader uniforms.

use crate::color::{Color, ACCENT_AMBER, WHITE};
use glamx::Vec3;

/// A directional light with parallel rays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionalLight {
    /// Direction the light travels (not the direction to the light).
    pub direction: Vec3,
    /// RGBA color; alpha is ignored.
    pub color: Color,
    /// Intensity multiplier.
    pub intensity: f32,
}

/// A point light with distance attenuation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
    /// RGBA color; alpha is ignored.
    pub color: Color,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Distance beyond which the contribution reaches zero.
    pub attenuation_radius: f32,
}

/// The complete rig: ambient + directional + point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightRig {
    /// Scene-wide ambient intensity.
    pub ambient: f32,
    /// The directional key light.
    pub directional: DirectionalLight,
    /// The point accent light.
    pub point: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        LightRig {
            ambient: 0.35,
            directional: DirectionalLight {
                direction: Vec3::new(-0.4, -1.0, -0.6),
                color: WHITE,
                intensity: 1.6,
            },
            point: PointLight {
                position: Vec3::new(420.0, 380.0, 420.0),
                color: ACCENT_AMBER,
                intensity: 1.1,
                attenuation_radius: 1600.0,
            },
        }
    }
}
