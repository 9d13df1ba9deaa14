//! End-to-end scenarios exercising the whole laboratory pipeline on
//! synthetic ticks — no window, no GPU.

use uvlab::prelude::*;

#[test]
fn a_full_session_walks_every_steady_state() {
    let mut lab = Lab::new();

    // Idle-chaos: no focal object, full particle field.
    assert!(lab.scene().focal().is_none());
    lab.advance(&mut SyntheticTicks::new(60));
    assert!(lab.scene().particles().opacity() > 0.9);

    // Select a sphere: focused, focal object present, particles fade back.
    lab.select_shading(ShadingMode::TexturedSurface);
    lab.select_primitive(Some(Primitive::Sphere));
    assert_eq!(lab.state().mode, InteractionMode::Focused);
    lab.advance(&mut SyntheticTicks::new(300));
    assert!(lab.scene().particles().opacity() < 0.4);
    assert!(lab.scene().axes().max_opacity() > 0.5);

    // Unwrap: mix converges, axes leave, spin unwinds.
    lab.set_unwrap(true);
    lab.advance(&mut SyntheticTicks::new(800));
    assert!(lab.unwrap_mix() > 0.99);
    assert!(lab.scene().axes().max_opacity() < 1e-2);
    assert!(lab.scene().focal().unwrap().rotation.length() < 1e-2);

    // Clear: back to idle-chaos, exactly one disposal so far.
    lab.select_primitive(None);
    assert!(lab.scene().focal().is_none());
    assert_eq!(lab.scene().material_disposals(), 1);
    lab.advance(&mut SyntheticTicks::new(600));
    assert!(lab.scene().particles().opacity() > 0.95);
}

#[test]
fn every_primitive_times_every_mode_yields_whole_vertices() {
    let modes = [
        ShadingMode::Points,
        ShadingMode::Wireframe,
        ShadingMode::LitSurface,
        ShadingMode::TexturedSurface,
    ];
    let primitives = [Primitive::Box, Primitive::Sphere, Primitive::Helix];

    let mut lab = Lab::new();
    for primitive in primitives {
        lab.select_primitive(Some(primitive));
        for mode in modes {
            lab.select_shading(mode);
            let focal = lab.scene().focal().unwrap();
            assert!(focal.geometry.vertex_count() > 0);
            // One UV pair per vertex, always.
            assert_eq!(focal.geometry.uvs().len(), focal.geometry.vertex_count());
        }
    }
}

#[test]
fn the_texture_cache_is_shared_across_material_swaps() {
    let cache = TextureCache::new();
    let first = Material::select(ShadingMode::TexturedSurface, &cache, None, None, 1.0);
    let second = Material::select(ShadingMode::LitSurface, &cache, None, None, 0.5);
    drop(first);
    drop(second);

    // Swapping materials never re-synthesized the rasters.
    assert!(std::sync::Arc::ptr_eq(&cache.checker(), &cache.checker()));
    assert_eq!(cache.normal_map().size(), (NORMAL_MAP_SIZE, NORMAL_MAP_SIZE));
}

#[test]
fn the_benchmark_request_describes_the_focal_mesh() {
    let mut lab = Lab::new();
    assert!(lab.benchmark_request().is_none());

    lab.select_primitive(Some(Primitive::Box));
    let request = lab.benchmark_request().unwrap();
    assert_eq!(request.model_kind, "box");
    assert!(request.has_uvs);
    assert_eq!(
        request.vertex_count,
        lab.scene().focal().unwrap().geometry.vertex_count()
    );

    struct Down;
    impl BenchmarkSource for Down {
        fn critique(&self, _r: &BenchmarkRequest) -> Result<Benchmark, CollaboratorError> {
            Err(CollaboratorError::RateLimited)
        }
    }
    let verdict = benchmark_or_fallback(&Down, &request);
    assert!(verdict.score <= 100);
    assert_eq!(verdict.grade, Grade::from_score(verdict.score));
}
