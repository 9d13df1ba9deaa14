//! Procedural texture synthesis and the process-wide raster cache.
//!
//! Two rasters are synthesized on demand: a UV checker grid and a
//! tangent-space normal map. Both are computed at most once per process and
//! shared by `Arc`; the cache is an explicit value handed to the material
//! layer rather than a hidden global, and [`TextureCache::clear`] is the
//! teardown hook.

pub use self::checker::checker_grid;
pub use self::normal_map::plate_normal_map;

mod checker;
mod normal_map;

use image::RgbaImage;
use std::cell::OnceCell;
use std::sync::Arc;

/// Side of the checker raster, in texels.
pub const CHECKER_SIZE: u32 = 1024;
/// Checker cells per side.
pub const CHECKER_CELLS: u32 = 16;
/// Side of the normal-map raster, in texels.
pub const NORMAL_MAP_SIZE: u32 = 512;
/// The tangent-space color of an unperturbed surface.
pub const FLAT_NORMAL: [u8; 3] = [128, 128, 255];

/// Wrapping behavior requested for a raster when it is sampled.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum TextureWrapping {
    /// Repeats the texture when a coordinate leaves [0, 1].
    Repeat,
    /// Clamps sampling to the edge texels.
    ClampToEdge,
}

/// An immutable raster plus its sampling parameters.
///
/// The pixel data is CPU-side; [`gpu`](Raster::gpu) uploads it at most once
/// per raster lifetime when a wgpu context exists. Imported diffuse and
/// normal rasters use this type too, not just the procedural ones.
pub struct Raster {
    /// The pixel data.
    pub image: RgbaImage,
    /// Requested wrap mode.
    pub wrapping: TextureWrapping,
    /// How many times the raster tiles across the unit UV square.
    pub uv_repeat: f32,
    gpu: OnceCell<Arc<crate::resource::Texture>>,
}

impl Raster {
    /// Wraps pixel data into a raster.
    pub fn new(image: RgbaImage, wrapping: TextureWrapping, uv_repeat: f32) -> Raster {
        Raster {
            image,
            wrapping,
            uv_repeat,
            gpu: OnceCell::new(),
        }
    }

    /// Raster dimensions `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The GPU copy, uploaded on first call. Requires an initialized
    /// [`Context`](crate::context::Context); releasing the raster releases
    /// the GPU copy with it.
    pub fn gpu(&self) -> Arc<crate::resource::Texture> {
        self.gpu
            .get_or_init(|| crate::resource::Texture::from_raster(self))
            .clone()
    }
}

/// Memoizing cache for the two procedural rasters.
///
/// Repeated calls return the same `Arc` (pointer equality); nothing is
/// rebuilt until [`clear`](TextureCache::clear) drops the cached instances.
#[derive(Default)]
pub struct TextureCache {
    checker: OnceCell<Arc<Raster>>,
    normal_map: OnceCell<Arc<Raster>>,
}

impl TextureCache {
    /// Creates an empty cache.
    pub fn new() -> TextureCache {
        TextureCache::default()
    }

    /// The UV checker grid, synthesized on first call.
    pub fn checker(&self) -> Arc<Raster> {
        self.checker
            .get_or_init(|| {
                log::debug!("synthesizing {0}x{0} checker grid", CHECKER_SIZE);
                Arc::new(Raster::new(
                    checker_grid(),
                    TextureWrapping::ClampToEdge,
                    1.0,
                ))
            })
            .clone()
    }

    /// The tangent-space normal map, synthesized on first call.
    ///
    /// Tiled 2×2 over the unit square so the plate pattern stays dense on
    /// large meshes; the raster itself differs between processes (plate
    /// placement is random), which is fine for a decorative map.
    pub fn normal_map(&self) -> Arc<Raster> {
        self.normal_map
            .get_or_init(|| {
                log::debug!("synthesizing {0}x{0} plate normal map", NORMAL_MAP_SIZE);
                Arc::new(Raster::new(
                    plate_normal_map(),
                    TextureWrapping::Repeat,
                    2.0,
                ))
            })
            .clone()
    }

    /// Teardown hook: drops both cached rasters (and, transitively, any GPU
    /// copies holding the last `Arc`).
    pub fn clear(&mut self) {
        self.checker.take();
        self.normal_map.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_returns_the_same_instance_twice() {
        let cache = TextureCache::new();
        assert!(Arc::ptr_eq(&cache.checker(), &cache.checker()));
        assert!(Arc::ptr_eq(&cache.normal_map(), &cache.normal_map()));
    }

    #[test]
    fn clear_drops_the_cached_rasters() {
        let mut cache = TextureCache::new();
        let before = cache.checker();
        cache.clear();
        assert!(!Arc::ptr_eq(&before, &cache.checker()));
    }

    #[test]
    fn rasters_report_their_nominal_formats() {
        let cache = TextureCache::new();
        assert_eq!(cache.checker().size(), (CHECKER_SIZE, CHECKER_SIZE));
        assert_eq!(cache.normal_map().size(), (NORMAL_MAP_SIZE, NORMAL_MAP_SIZE));
        assert_eq!(cache.checker().wrapping, TextureWrapping::ClampToEdge);
        assert_eq!(cache.normal_map().wrapping, TextureWrapping::Repeat);
        assert_eq!(cache.normal_map().uv_repeat, 2.0);
    }
}
