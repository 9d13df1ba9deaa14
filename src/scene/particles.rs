use crate::scene::{InteractionMode, FADE_EASING};
use glamx::Vec3;
use rand::Rng;

/// Number of particles in the decorative field.
pub const PARTICLE_COUNT: usize = 3000;
/// Half-side of the cube the particles are scattered in.
pub const PARTICLE_SPREAD: f32 = 900.0;
/// Rigid-group spin per frame, in radians.
const FIELD_SPIN: f32 = 0.0009;
/// Field opacity target while no model is selected.
const OPACITY_IDLE: f32 = 1.0;
/// Field opacity target while a model is under inspection.
const OPACITY_FOCUSED: f32 = 0.25;

/// The ambient particle field: static random positions rotating as one
/// rigid group, with an eased mode-dependent opacity. Purely decorative —
/// it never interacts with the focal object.
pub struct ParticleField {
    positions: Vec<Vec3>,
    rotation: f32,
    opacity: f32,
    opacity_target: f32,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleField {
    /// Scatters [`PARTICLE_COUNT`] particles uniformly in the field cube.
    pub fn new() -> ParticleField {
        let mut rng = rand::rng();
        let positions = (0..PARTICLE_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                    rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                    rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                )
            })
            .collect();

        ParticleField {
            positions,
            rotation: 0.0,
            opacity: OPACITY_IDLE,
            opacity_target: OPACITY_IDLE,
        }
    }

    /// The static particle positions (group rotation is applied at render
    /// time through [`rotation`](ParticleField::rotation)).
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current rigid-group rotation about +Y, in radians.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current eased opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The opacity the field is easing toward.
    #[inline]
    pub fn opacity_target(&self) -> f32 {
        self.opacity_target
    }

    /// Retargets the opacity for an interaction mode.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.opacity_target = match mode {
            InteractionMode::IdleChaos => OPACITY_IDLE,
            InteractionMode::Focused => OPACITY_FOCUSED,
        };
    }

    /// One frame: ease opacity toward its target and keep spinning — the
    /// rotation never pauses, whatever the mode.
    pub fn ease(&mut self) {
        self.opacity += (self.opacity_target - self.opacity) * FADE_EASING;
        self.rotation = (self.rotation + FIELD_SPIN) % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_has_its_fixed_cardinality() {
        let field = ParticleField::new();
        assert_eq!(field.positions().len(), PARTICLE_COUNT);
        assert!(field
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= PARTICLE_SPREAD));
    }

    #[test]
    fn focused_mode_fades_the_field_back() {
        let mut field = ParticleField::new();
        field.set_mode(InteractionMode::Focused);
        for _ in 0..400 {
            field.ease();
        }
        assert!((field.opacity() - OPACITY_FOCUSED).abs() < 1e-2);
    }

    #[test]
    fn rotation_advances_in_every_mode() {
        let mut field = ParticleField::new();
        field.set_mode(InteractionMode::Focused);
        let before = field.rotation();
        field.ease();
        assert!(field.rotation() > before);
    }
}
