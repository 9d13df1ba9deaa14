use crate::camera::OrbitCamera3d;
use crate::import::{ImportError, ImportedMesh};
use crate::light::LightRig;
use crate::material::{ease_mix, Material, ShadingMode, SPIN_SUSPEND_THRESHOLD};
use crate::procedural::Primitive;
use crate::renderer::SceneRenderer;
use crate::scene::{build_geometry, GeometrySource, InteractionMode, SceneComposer};
use crate::sim::{InteractionState, TickSource};
use crate::window::{Frame, InputEvent};
use glamx::Vec2;
use std::f32::consts::TAU;

/// Nominal simulated time per tick. The loop is cadence-agnostic: the host
/// presents frames at whatever rate it can, and each tick advances the
/// accumulator by this fixed step regardless of wall-clock time.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Default camera distance at zoom factor 1.
pub const BASE_DISTANCE: f32 = 1100.0;

/// Idle spin of the focal object about +Y, radians per tick.
const IDLE_SPIN: f32 = 0.004;

/// Per-tick easing pulling the focal rotation back to zero while unwrapped.
const ROTATION_EASING: f32 = 0.05;

/// The laboratory: every piece of per-frame state and the loop that
/// advances it.
///
/// All mutation is read-modify-write on process-local values with a single
/// logical writer; nothing here blocks, suspends, or spawns threads.
/// [`step`](Lab::step) is infallible by construction, so a problem in one
/// frame can never cancel the next one — error recovery happens at the
/// transition methods, which reject bad input before any state is touched.
pub struct Lab {
    scene: SceneComposer,
    camera: OrbitCamera3d,
    lights: LightRig,
    textures: crate::texture::TextureCache,
    state: InteractionState,
    source: Option<GeometrySource>,
    unwrap_mix: f32,
    time: f32,
}

impl Default for Lab {
    fn default() -> Self {
        Self::new()
    }
}

impl Lab {
    /// Creates an idle laboratory: particle field only, no focal object.
    pub fn new() -> Lab {
        Lab {
            scene: SceneComposer::new(),
            camera: OrbitCamera3d::new(BASE_DISTANCE),
            lights: LightRig::default(),
            textures: crate::texture::TextureCache::new(),
            state: InteractionState::default(),
            source: None,
            unwrap_mix: 0.0,
            time: 0.0,
        }
    }

    // ==================
    // Explicit state transitions (invoked by the owning controller)
    // ==================

    /// Selects a procedural primitive (entering focused mode), or clears
    /// the selection entirely (returning to idle-chaos).
    pub fn select_primitive(&mut self, primitive: Option<Primitive>) {
        self.state.primitive = primitive;
        match primitive {
            Some(p) => {
                self.source = Some(GeometrySource::Primitive(p));
                self.rebuild();
                self.set_interaction_mode(InteractionMode::Focused);
            }
            None => {
                self.source = None;
                self.scene.clear_focal_object();
                self.set_interaction_mode(InteractionMode::IdleChaos);
            }
        }
    }

    /// Attaches an imported mesh as the focal object.
    ///
    /// Validation runs first: a malformed import is reported to the caller
    /// and leaves the previous focal object (or its absence) untouched.
    pub fn import_mesh(&mut self, imported: ImportedMesh) -> Result<(), ImportError> {
        imported.validate()?;

        self.state.primitive = None;
        self.source = Some(GeometrySource::Imported(imported));
        self.rebuild();
        self.set_interaction_mode(InteractionMode::Focused);
        Ok(())
    }

    /// Switches the shading mode, rebuilding the focal geometry/material
    /// pair (the previous pair is fully released first).
    pub fn select_shading(&mut self, shading: ShadingMode) {
        self.state.shading = shading;
        self.rebuild();
    }

    /// Toggles the UV-unwrap morph. The mix eases toward the new target
    /// over the following ticks.
    pub fn set_unwrap(&mut self, enabled: bool) {
        self.state.unwrap_enabled = enabled;
    }

    /// Adjusts the normal-map intensity on the live material — a cheap
    /// uniform update, with no geometry rebuild and no material swap.
    pub fn set_normal_intensity(&mut self, intensity: f32) {
        self.state.normal_intensity = intensity;
        if let Some(focal) = self.scene.focal_mut() {
            focal.material.set_normal_intensity(intensity);
        }
    }

    /// Switches between idle-chaos and focused.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.state.mode = mode;
        self.scene.set_interaction_mode(mode);
    }

    /// Records the pointer position (normalized to [-1, 1]²) as the new
    /// camera orbit target. Idempotent; last writer wins.
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.camera.set_pointer(pointer);
    }

    /// Applies wheel input to the zoom factor. Ignored in idle-chaos, where
    /// zoom is not adjustable.
    pub fn wheel(&mut self, steps: f32) {
        if self.state.mode == InteractionMode::Focused {
            self.camera.apply_wheel(steps);
        }
    }

    /// Updates the camera for a resized viewport.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width as f32, height as f32);
    }

    // ==================
    // The animation loop
    // ==================

    /// One tick of the loop, in the fixed update order; state is fully
    /// updated before any render looks at it.
    pub fn step(&mut self) {
        // 1. Advance simulated time by the nominal step.
        self.time += NOMINAL_DT;

        // 2–3. Camera orientation, then distance.
        self.camera.ease();

        // 4. Unwrap mix, propagated into the material so both shader
        //    stages observe the same value.
        let target = if self.state.unwrap_enabled { 1.0 } else { 0.0 };
        self.unwrap_mix = ease_mix(self.unwrap_mix, target);
        if let Some(focal) = self.scene.focal_mut() {
            focal.material.set_unwrap_mix(self.unwrap_mix);
        }

        // 5–6. Particle fade + rigid spin, then axis fades.
        self.scene.ease_decor(self.unwrap_mix);

        // 7. Focal rotation: idle spin in the native pose; once the morph
        //    engages, every rotation axis eases back to zero so the chart
        //    presents face-on.
        if let Some(focal) = self.scene.focal_mut() {
            if self.unwrap_mix <= SPIN_SUSPEND_THRESHOLD {
                focal.rotation.y = (focal.rotation.y + IDLE_SPIN) % TAU;
            } else {
                focal.rotation *= 1.0 - ROTATION_EASING;
            }
        }
    }

    /// Step 8: one render of the scene through the current camera.
    pub fn render(
        &mut self,
        renderer: &mut SceneRenderer,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        renderer.render(
            &mut self.scene,
            &self.camera,
            &self.lights,
            color_view,
            depth_view,
        );
    }

    /// Drives one windowed frame: consumes the canvas events, advances the
    /// loop, and renders. Key events are left for the embedding demo.
    pub fn tick(&mut self, frame: &mut Frame<'_>) {
        for event in frame.events {
            match event {
                InputEvent::PointerMoved(pointer) => self.pointer_moved(*pointer),
                InputEvent::Wheel(steps) => self.wheel(*steps),
                InputEvent::Resized(width, height) => self.set_viewport(*width, *height),
                InputEvent::Key(_) => {}
            }
        }

        self.step();
        self.render(frame.renderer, frame.color_view, frame.depth_view);
    }

    /// Runs [`step`](Lab::step) for every tick the source yields.
    pub fn advance(&mut self, ticks: &mut dyn TickSource) {
        while ticks.tick() {
            self.step();
        }
    }

    // ==================
    // Introspection
    // ==================

    /// The scene owned by this laboratory.
    #[inline]
    pub fn scene(&self) -> &SceneComposer {
        &self.scene
    }

    /// The orbit camera.
    #[inline]
    pub fn camera(&self) -> &OrbitCamera3d {
        &self.camera
    }

    /// The last-written interaction inputs.
    #[inline]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The current unwrap mix.
    #[inline]
    pub fn unwrap_mix(&self) -> f32 {
        self.unwrap_mix
    }

    /// Accumulated simulated time.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Describes the focal mesh for the benchmark collaborator, if a model
    /// is selected.
    pub fn benchmark_request(&self) -> Option<crate::insight::BenchmarkRequest> {
        let source = self.source.as_ref()?;
        let focal = self.scene.focal()?;
        Some(crate::insight::BenchmarkRequest {
            model_kind: source.kind().to_string(),
            vertex_count: focal.geometry.vertex_count(),
            has_uvs: source.has_uvs(),
        })
    }

    fn rebuild(&mut self) {
        let source = match &self.source {
            Some(source) => source,
            None => return,
        };

        let geometry = build_geometry(source, self.state.shading);
        let (diffuse, normal_map) = match source {
            GeometrySource::Imported(imported) => {
                (imported.diffuse.clone(), imported.normal_map.clone())
            }
            GeometrySource::Primitive(_) => (None, None),
        };
        let material = Material::select(
            self.state.shading,
            &self.textures,
            diffuse,
            normal_map,
            self.state.normal_intensity,
        );
        self.scene.set_focal_object(geometry, material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{morph_position, UNWRAP_SPREAD};
    use crate::sim::SyntheticTicks;

    fn focused_sphere() -> Lab {
        let mut lab = Lab::new();
        lab.select_shading(ShadingMode::TexturedSurface);
        lab.select_primitive(Some(Primitive::Sphere));
        lab
    }

    #[test]
    fn unwrap_mix_eases_monotonically_into_its_target() {
        let mut lab = focused_sphere();
        lab.set_unwrap(true);

        let mut prev = lab.unwrap_mix();
        for _ in 0..600 {
            lab.step();
            assert!(lab.unwrap_mix() >= prev);
            assert!((0.0..=1.0).contains(&lab.unwrap_mix()));
            prev = lab.unwrap_mix();
        }
        assert!((lab.unwrap_mix() - 1.0).abs() < 1e-3);

        lab.set_unwrap(false);
        for _ in 0..600 {
            lab.step();
            assert!(lab.unwrap_mix() <= prev);
            prev = lab.unwrap_mix();
        }
        assert!(lab.unwrap_mix() < 1e-3);
    }

    #[test]
    fn fully_unwrapped_sphere_lies_flat_in_the_chart_square() {
        let mut lab = focused_sphere();
        lab.set_unwrap(true);
        lab.advance(&mut SyntheticTicks::new(800));
        assert!(lab.unwrap_mix() > 0.99);

        let focal = lab.scene().focal().unwrap();
        let half = UNWRAP_SPREAD * 0.5 + 1e-3;
        for (coord, uv) in focal.geometry.coords().iter().zip(focal.geometry.uvs()) {
            let p = morph_position(*coord, *uv, lab.unwrap_mix());
            assert!(p.z.abs() < 1e-2);
            assert!(p.x.abs() <= half);
            assert!(p.y.abs() <= half);
        }
    }

    #[test]
    fn wheel_input_is_ignored_in_idle_chaos() {
        let mut lab = Lab::new();
        for _ in 0..100 {
            lab.wheel(5.0);
        }
        assert_eq!(lab.camera().zoom_factor(), 1.0);

        lab.select_primitive(Some(Primitive::Box));
        lab.wheel(5.0);
        assert!(lab.camera().zoom_factor() > 1.0);
    }

    #[test]
    fn idle_chaos_restores_the_field_and_hides_the_axes() {
        let mut lab = focused_sphere();
        lab.advance(&mut SyntheticTicks::new(300));
        assert!(lab.scene().particles().opacity() < 0.5);

        // Returning to idle-chaos with no model; the unwrap toggle state
        // must not matter.
        lab.set_unwrap(true);
        lab.select_primitive(None);
        lab.advance(&mut SyntheticTicks::new(600));

        assert!((lab.scene().particles().opacity() - 1.0).abs() < 1e-2);
        assert!(lab.scene().axes().max_opacity() < 1e-2);
    }

    #[test]
    fn idle_spin_suspends_and_unwinds_during_unwrap() {
        let mut lab = focused_sphere();
        lab.advance(&mut SyntheticTicks::new(100));
        let spun = lab.scene().focal().unwrap().rotation;
        assert!(spun.y > 0.0);

        lab.set_unwrap(true);
        lab.advance(&mut SyntheticTicks::new(800));
        let rotation = lab.scene().focal().unwrap().rotation;
        assert!(rotation.length() < 1e-2);
    }

    #[test]
    fn malformed_import_leaves_the_focal_object_unchanged() {
        let mut lab = Lab::new();
        lab.select_primitive(Some(Primitive::Box));
        let before = lab.scene().focal().unwrap().geometry.vertex_count();
        let disposals = lab.scene().material_disposals();

        let bad = ImportedMesh {
            positions: vec![0.0; 10],
            uvs: None,
            diffuse: None,
            normal_map: None,
        };
        assert!(lab.import_mesh(bad).is_err());

        let focal = lab.scene().focal().unwrap();
        assert_eq!(focal.geometry.vertex_count(), before);
        assert_eq!(lab.scene().material_disposals(), disposals);
    }

    #[test]
    fn intensity_changes_never_swap_the_material() {
        let mut lab = Lab::new();
        lab.select_shading(ShadingMode::LitSurface);
        lab.select_primitive(Some(Primitive::Sphere));
        let disposals = lab.scene().material_disposals();

        lab.set_normal_intensity(0.3);
        lab.set_normal_intensity(2.0);

        assert_eq!(lab.scene().material_disposals(), disposals);
        let focal = lab.scene().focal().unwrap();
        assert_eq!(focal.material.normal_intensity(), 2.0);
    }

    #[test]
    fn mode_switches_release_every_intermediate_material() {
        let mut lab = Lab::new();
        lab.select_primitive(Some(Primitive::Helix));
        let modes = [
            ShadingMode::Points,
            ShadingMode::Wireframe,
            ShadingMode::LitSurface,
            ShadingMode::TexturedSurface,
        ];
        for mode in modes {
            lab.select_shading(mode);
        }

        // Initial selection plus four switches: four releases, one live.
        assert_eq!(lab.scene().material_disposals(), 4);
        assert!(!lab.scene().focal().unwrap().material.is_disposed());
    }
}
