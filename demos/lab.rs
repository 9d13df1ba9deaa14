//! The interactive laboratory demo.
//!
//! Controls:
//! * `1` / `2` / `3` — box, sphere, helix; `0` — clear the model
//! * `m` — cycle the shading mode
//! * `u` — toggle the UV-unwrap morph
//! * `-` / `=` — normal-map intensity down / up
//! * `i` — ask the insight collaborator about the current model
//! * `j` — ask the benchmark collaborator to critique it
//!
//! Pointer motion orbits the camera; the wheel zooms (once a model is
//! selected).

use uvlab::prelude::*;
use uvlab::winit::keyboard::KeyCode;

/// Stand-in text backend: always unreachable, so every request exercises
/// the fixed fallback payloads.
struct OfflineText;

impl InsightSource for OfflineText {
    fn generate(&self, _topic: &str) -> Result<Insight, CollaboratorError> {
        Err(CollaboratorError::Unavailable("no backend configured".into()))
    }
}

impl BenchmarkSource for OfflineText {
    fn critique(&self, _request: &BenchmarkRequest) -> Result<Benchmark, CollaboratorError> {
        Err(CollaboratorError::Unavailable("no backend configured".into()))
    }
}

fn next_shading(mode: ShadingMode) -> ShadingMode {
    match mode {
        ShadingMode::Points => ShadingMode::Wireframe,
        ShadingMode::Wireframe => ShadingMode::LitSurface,
        ShadingMode::LitSurface => ShadingMode::TexturedSurface,
        ShadingMode::TexturedSurface => ShadingMode::Points,
    }
}

fn main() {
    env_logger::init();

    let canvas = Canvas::new("uvlab");
    let mut lab = Lab::new();
    lab.select_shading(ShadingMode::TexturedSurface);
    lab.select_primitive(Some(Primitive::Sphere));

    canvas.run(move |frame| {
        for event in frame.events {
            let code = match event {
                InputEvent::Key(code) => *code,
                _ => continue,
            };
            match code {
                KeyCode::Digit1 => lab.select_primitive(Some(Primitive::Box)),
                KeyCode::Digit2 => lab.select_primitive(Some(Primitive::Sphere)),
                KeyCode::Digit3 => lab.select_primitive(Some(Primitive::Helix)),
                KeyCode::Digit0 => lab.select_primitive(None),
                KeyCode::KeyM => {
                    let mode = next_shading(lab.state().shading);
                    lab.select_shading(mode);
                }
                KeyCode::KeyU => {
                    let enabled = !lab.state().unwrap_enabled;
                    lab.set_unwrap(enabled);
                }
                KeyCode::Minus => {
                    let intensity = (lab.state().normal_intensity - 0.25).max(0.0);
                    lab.set_normal_intensity(intensity);
                }
                KeyCode::Equal => {
                    let intensity = lab.state().normal_intensity + 0.25;
                    lab.set_normal_intensity(intensity);
                }
                KeyCode::KeyI => {
                    let topic = lab
                        .state()
                        .primitive
                        .map(|p| format!("{:?}", p))
                        .unwrap_or_else(|| "the void".to_string());
                    let insight = insight_or_fallback(&OfflineText, &topic);
                    println!("» {} — {} ({})", insight.title, insight.explanation, insight.subtext);
                }
                KeyCode::KeyJ => {
                    if let Some(request) = lab.benchmark_request() {
                        let verdict = benchmark_or_fallback(&OfflineText, &request);
                        println!(
                            "» {}/100 [{:?}] {} {}",
                            verdict.score, verdict.grade, verdict.analysis, verdict.recommendation
                        );
                    } else {
                        println!("» nothing to critique: no model selected");
                    }
                }
                _ => {}
            }
        }

        lab.tick(frame);
    });
}
