//! The laboratory scene: decorative particle field, axis indicator and the
//! single focal object.

pub use self::axes::{AxisIndicator, AxisSegment, AXIS_LENGTH};
pub use self::composer::{FocalObject, SceneComposer};
pub use self::geometry::{build_geometry, GeometrySource};
pub use self::particles::{ParticleField, PARTICLE_COUNT, PARTICLE_SPREAD};

mod axes;
mod composer;
mod geometry;
mod particles;

/// The two interaction modes of the laboratory view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionMode {
    /// No model selected yet: only the particle field is shown, at full
    /// opacity.
    IdleChaos,
    /// A model is under inspection: axes and focal object become visible
    /// while the particle field fades back.
    Focused,
}

/// Per-frame smoothing applied to every opacity fade in the scene.
pub const FADE_EASING: f32 = 0.05;
