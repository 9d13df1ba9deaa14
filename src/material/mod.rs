//! Shading-mode selection and the focal object's material.
//!
//! Each shading mode is a complete, explicitly authored WGSL program
//! selected by tag — there is no runtime shader patching. The material owns
//! the uniform values for its mode; GPU state (pipeline, buffers, bind
//! groups) is built lazily on first render and released exactly once by
//! [`dispose`](Material::dispose).

pub use self::unwrap::{
    ease_mix, flatten_position, morph_normal, morph_position, MIX_EASING, MIX_SNAP,
    SPIN_SUSPEND_THRESHOLD, UNWRAP_SPREAD,
};

mod program;
mod uniforms;
mod unwrap;

use crate::color::{Color, PARTICLE_CYAN, SURFACE_GRAY, WIRE_WHITE};
use crate::light::LightRig;
use crate::resource::GpuMesh;
use crate::texture::{Raster, TextureCache};
use glamx::{Mat4, Vec3};
use program::MaterialGpu;
use std::sync::Arc;

/// Size of a focal point sprite, in world units.
pub const POINT_SIZE: f32 = 3.0;
/// Metalness of the lit surface stack.
pub const SURFACE_METALLIC: f32 = 0.05;
/// Roughness of the lit surface stack.
pub const SURFACE_ROUGHNESS: f32 = 0.55;
/// Clear-coat contribution of the lit surface stack.
pub const SURFACE_CLEARCOAT: f32 = 0.2;

/// How the focal object is shaded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShadingMode {
    /// Perspective-sized glowing discs, one per vertex.
    Points,
    /// Edge-only rendering at constant low opacity.
    Wireframe,
    /// Opaque surface lit by the rig, normal-mapped.
    LitSurface,
    /// The lit stack plus a diffuse map, with the unwrap morph.
    TexturedSurface,
}

impl ShadingMode {
    /// Whether this mode lights a surface (and therefore needs normals).
    #[inline]
    pub fn lights_surface(self) -> bool {
        matches!(self, ShadingMode::LitSurface | ShadingMode::TexturedSurface)
    }

    /// Whether this mode wants the tube/surface form of curve primitives.
    #[inline]
    pub fn wants_surface_geometry(self) -> bool {
        self.lights_surface()
    }

    /// Whether this mode applies the unwrap morph. Wireframe is defined
    /// only over the native pose.
    #[inline]
    pub fn morphs(self) -> bool {
        matches!(self, ShadingMode::Points | ShadingMode::TexturedSurface)
    }
}

/// Everything the material layer needs from the current frame.
pub struct FrameState<'a> {
    /// View matrix of the camera.
    pub view: Mat4,
    /// Projection matrix of the camera.
    pub proj: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// The light rig.
    pub lights: &'a LightRig,
}

/// The material bound to the focal object: a shading-mode tag plus the
/// uniform values that mode reads.
pub struct Material {
    mode: ShadingMode,
    color: Color,
    point_size: f32,
    normal_intensity: f32,
    unwrap_mix: f32,
    diffuse: Option<Arc<Raster>>,
    normal_map: Option<Arc<Raster>>,
    gpu: Option<MaterialGpu>,
    disposed: bool,
}

impl Material {
    /// Selects the material for a shading mode.
    ///
    /// Surface modes receive the procedural normal map unless an imported
    /// one overrides it; the textured mode receives the procedural checker
    /// unless an imported diffuse overrides it.
    pub fn select(
        mode: ShadingMode,
        cache: &TextureCache,
        diffuse_override: Option<Arc<Raster>>,
        normal_override: Option<Arc<Raster>>,
        normal_intensity: f32,
    ) -> Material {
        let (color, diffuse, normal_map) = match mode {
            ShadingMode::Points => (PARTICLE_CYAN, None, None),
            ShadingMode::Wireframe => (WIRE_WHITE, None, None),
            ShadingMode::LitSurface => (
                SURFACE_GRAY,
                None,
                Some(normal_override.unwrap_or_else(|| cache.normal_map())),
            ),
            ShadingMode::TexturedSurface => (
                SURFACE_GRAY,
                Some(diffuse_override.unwrap_or_else(|| cache.checker())),
                Some(normal_override.unwrap_or_else(|| cache.normal_map())),
            ),
        };

        log::debug!("selected {:?} material", mode);
        Material {
            mode,
            color,
            point_size: POINT_SIZE,
            normal_intensity,
            unwrap_mix: 0.0,
            diffuse,
            normal_map,
            gpu: None,
            disposed: false,
        }
    }

    /// The shading mode this material implements.
    #[inline]
    pub fn mode(&self) -> ShadingMode {
        self.mode
    }

    /// The current normal-map intensity.
    #[inline]
    pub fn normal_intensity(&self) -> f32 {
        self.normal_intensity
    }

    /// Updates the normal-map intensity. A plain uniform write: no geometry
    /// rebuild, no GPU reallocation. Intensity 0 disables perturbation.
    pub fn set_normal_intensity(&mut self, intensity: f32) {
        self.normal_intensity = intensity.max(0.0);
    }

    /// The unwrap mix currently fed to the vertex and fragment stages. The
    /// value is one uniform bound to both stages, so the stages can never
    /// observe different mixes within a frame.
    #[inline]
    pub fn unwrap_mix(&self) -> f32 {
        self.unwrap_mix
    }

    /// Updates the unwrap mix uniform.
    pub fn set_unwrap_mix(&mut self, mix: f32) {
        self.unwrap_mix = mix.clamp(0.0, 1.0);
    }

    /// Whether [`dispose`](Material::dispose) has run.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases the material's GPU state. Safe to call on a material that
    /// never rendered; calling twice is a logged no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            log::warn!("{:?} material disposed twice", self.mode);
            return;
        }
        self.gpu = None;
        self.disposed = true;
        log::debug!("disposed {:?} material", self.mode);
    }

    /// Draws `mesh` with this material. Builds the GPU program on first
    /// call; a disposed material skips drawing entirely.
    pub fn render(
        &mut self,
        mesh: &mut GpuMesh,
        model: Mat4,
        frame: &FrameState<'_>,
        rpass: &mut wgpu::RenderPass<'_>,
    ) {
        if self.disposed {
            log::warn!("render on a disposed {:?} material", self.mode);
            return;
        }

        mesh.upload();

        if self.gpu.is_none() {
            self.gpu = Some(MaterialGpu::build(
                self.mode,
                mesh,
                self.diffuse.as_deref(),
                self.normal_map.as_deref(),
            ));
        }

        let uniforms = uniforms::ObjectUniforms {
            model: model.to_cols_array_2d(),
            color: [self.color.r, self.color.g, self.color.b, self.color.a],
            unwrap_mix: self.unwrap_mix,
            unwrap_spread: UNWRAP_SPREAD,
            normal_intensity: self.normal_intensity,
            uv_repeat: self.normal_map.as_ref().map(|n| n.uv_repeat).unwrap_or(1.0),
            point_size: self.point_size,
            metallic: SURFACE_METALLIC,
            roughness: SURFACE_ROUGHNESS,
            clearcoat: SURFACE_CLEARCOAT,
            use_diffuse: if self.diffuse.is_some() { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        };

        if let Some(gpu) = self.gpu.as_ref() {
            gpu.draw(mesh, &uniforms, frame, rpass);
        }
    }
}

impl Drop for Material {
    fn drop(&mut self) {
        if !self.disposed {
            self.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_assigns_the_procedural_rasters() {
        let cache = TextureCache::new();
        let lit = Material::select(ShadingMode::LitSurface, &cache, None, None, 1.0);
        assert!(lit.diffuse.is_none());
        assert!(Arc::ptr_eq(
            lit.normal_map.as_ref().unwrap(),
            &cache.normal_map()
        ));

        let textured = Material::select(ShadingMode::TexturedSurface, &cache, None, None, 1.0);
        assert!(Arc::ptr_eq(
            textured.diffuse.as_ref().unwrap(),
            &cache.checker()
        ));
    }

    #[test]
    fn intensity_update_is_a_plain_uniform_write() {
        let cache = TextureCache::new();
        let mut m = Material::select(ShadingMode::LitSurface, &cache, None, None, 1.0);
        m.set_normal_intensity(0.25);
        assert_eq!(m.normal_intensity(), 0.25);
        assert!(!m.is_disposed());
        // The raster binding is untouched: same cached instance.
        assert!(Arc::ptr_eq(
            m.normal_map.as_ref().unwrap(),
            &cache.normal_map()
        ));
    }

    #[test]
    fn dispose_is_idempotent() {
        let cache = TextureCache::new();
        let mut m = Material::select(ShadingMode::Points, &cache, None, None, 0.0);
        assert!(!m.is_disposed());
        m.dispose();
        assert!(m.is_disposed());
        m.dispose();
        assert!(m.is_disposed());
    }

    #[test]
    fn wireframe_never_morphs() {
        assert!(!ShadingMode::Wireframe.morphs());
        assert!(ShadingMode::Points.morphs());
        assert!(ShadingMode::TexturedSurface.morphs());
        assert!(ShadingMode::LitSurface.lights_surface());
    }
}
