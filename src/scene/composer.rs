use crate::material::Material;
use crate::resource::GpuMesh;
use crate::scene::{AxisIndicator, InteractionMode, ParticleField};
use glamx::Vec3;

/// The focal object: the one geometry/material pair under inspection, plus
/// its Euler rotation driven by the animation loop.
pub struct FocalObject {
    /// The geometry buffers.
    pub geometry: GpuMesh,
    /// The bound material.
    pub material: Material,
    /// Euler rotation (radians) applied as the model transform.
    pub rotation: Vec3,
}

/// Owner of the persistent scene: the particle field, the axis indicator
/// and at most one focal object.
///
/// Attaching a new focal pair always fully releases the previous one first;
/// no geometry or material instance is ever shared between two focal
/// states. Disposals are counted so resource-lifecycle behavior stays
/// observable.
pub struct SceneComposer {
    particles: ParticleField,
    axes: AxisIndicator,
    focal: Option<FocalObject>,
    mode: InteractionMode,
    material_disposals: u64,
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneComposer {
    /// Creates the scene in idle-chaos with no focal object.
    pub fn new() -> SceneComposer {
        SceneComposer {
            particles: ParticleField::new(),
            axes: AxisIndicator::new(),
            focal: None,
            mode: InteractionMode::IdleChaos,
            material_disposals: 0,
        }
    }

    /// Attaches a new focal pair, disposing the previous one (if any)
    /// first. Returns a handle to the attached object.
    pub fn set_focal_object(&mut self, geometry: GpuMesh, material: Material) -> &mut FocalObject {
        self.release_focal();

        log::debug!(
            "focal object attached: {} vertices, {:?}",
            geometry.vertex_count(),
            material.mode()
        );
        self.focal.insert(FocalObject {
            geometry,
            material,
            rotation: Vec3::ZERO,
        })
    }

    /// Returns to the valid "no model selected" steady state, disposing the
    /// focal pair if one was attached.
    pub fn clear_focal_object(&mut self) {
        self.release_focal();
    }

    fn release_focal(&mut self) {
        if let Some(mut prior) = self.focal.take() {
            prior.material.dispose();
            self.material_disposals += 1;
        }
    }

    /// The focal object, if a model is selected.
    #[inline]
    pub fn focal(&self) -> Option<&FocalObject> {
        self.focal.as_ref()
    }

    /// Mutable access to the focal object.
    #[inline]
    pub fn focal_mut(&mut self) -> Option<&mut FocalObject> {
        self.focal.as_mut()
    }

    /// How many materials have been disposed over this scene's lifetime.
    #[inline]
    pub fn material_disposals(&self) -> u64 {
        self.material_disposals
    }

    /// The current interaction mode.
    #[inline]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switches interaction mode, retargeting the mode-driven visibility
    /// fades. The actual easing happens frame by frame in the loop.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            log::debug!("interaction mode -> {:?}", mode);
        }
        self.mode = mode;
        self.particles.set_mode(mode);
    }

    /// Whether the focal object should be drawn this frame.
    pub fn focal_visible(&self) -> bool {
        self.mode == InteractionMode::Focused && self.focal.is_some()
    }

    /// The decorative particle field.
    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// The axis indicator.
    #[inline]
    pub fn axes(&self) -> &AxisIndicator {
        &self.axes
    }

    /// One frame of decorative easing: particle fade + spin, axis
    /// retargeting and fade. `unwrap_mix` feeds the axis visibility rule.
    pub fn ease_decor(&mut self, unwrap_mix: f32) {
        self.particles.ease();
        self.axes.retarget(self.mode, unwrap_mix);
        self.axes.ease();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::ShadingMode;
    use crate::procedural::Primitive;
    use crate::scene::{build_geometry, GeometrySource};
    use crate::texture::TextureCache;

    fn focal_pair(cache: &TextureCache, mode: ShadingMode) -> (GpuMesh, Material) {
        let source = GeometrySource::Primitive(Primitive::Box);
        (
            build_geometry(&source, mode),
            Material::select(mode, cache, None, None, 1.0),
        )
    }

    #[test]
    fn n_mode_switches_dispose_exactly_n_minus_one_materials() {
        let cache = TextureCache::new();
        let mut scene = SceneComposer::new();

        let modes = [
            ShadingMode::Points,
            ShadingMode::Wireframe,
            ShadingMode::LitSurface,
            ShadingMode::TexturedSurface,
            ShadingMode::Points,
        ];
        for mode in modes {
            let (geometry, material) = focal_pair(&cache, mode);
            scene.set_focal_object(geometry, material);
        }

        assert_eq!(scene.material_disposals(), modes.len() as u64 - 1);
        let live = scene.focal().unwrap();
        assert!(!live.material.is_disposed());
        assert_eq!(live.material.mode(), ShadingMode::Points);
    }

    #[test]
    fn clearing_returns_to_the_no_model_steady_state() {
        let cache = TextureCache::new();
        let mut scene = SceneComposer::new();
        let (geometry, material) = focal_pair(&cache, ShadingMode::Wireframe);
        scene.set_focal_object(geometry, material);
        scene.clear_focal_object();

        assert!(scene.focal().is_none());
        assert_eq!(scene.material_disposals(), 1);
        // Clearing twice must not double-count.
        scene.clear_focal_object();
        assert_eq!(scene.material_disposals(), 1);
    }

    #[test]
    fn idle_chaos_hides_the_focal_object() {
        let cache = TextureCache::new();
        let mut scene = SceneComposer::new();
        let (geometry, material) = focal_pair(&cache, ShadingMode::LitSurface);
        scene.set_focal_object(geometry, material);

        assert!(!scene.focal_visible());
        scene.set_interaction_mode(InteractionMode::Focused);
        assert!(scene.focal_visible());
    }
}
