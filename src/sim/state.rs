use crate::material::ShadingMode;
use crate::procedural::Primitive;
use crate::scene::InteractionMode;

/// The externally-driven inputs of the laboratory, as last written.
///
/// Collaborators (UI, input handlers) never mutate this directly: they call
/// the explicit transition methods on [`Lab`](crate::sim::Lab), which keep
/// this record and the scene in lockstep. There is no implicit reactive
/// graph — a transition happens exactly when its method is invoked. The
/// animation loop reads this on every tick; writes are last-writer-wins.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionState {
    /// The selected primitive, if the focal object is procedural.
    pub primitive: Option<Primitive>,
    /// The selected shading mode.
    pub shading: ShadingMode,
    /// The current interaction mode.
    pub mode: InteractionMode,
    /// Whether the UV-unwrap morph is toggled on.
    pub unwrap_enabled: bool,
    /// Normal-map intensity for the surface modes.
    pub normal_intensity: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        InteractionState {
            primitive: None,
            shading: ShadingMode::TexturedSurface,
            mode: InteractionMode::IdleChaos,
            unwrap_enabled: false,
            normal_intensity: 1.0,
        }
    }
}
