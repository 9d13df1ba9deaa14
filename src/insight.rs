//! The generative-text collaborator boundaries.
//!
//! The laboratory asks an external backend for flavor copy about the
//! current topic and for a tongue-in-cheek "benchmark" critique of the
//! loaded mesh. Both calls are fire-and-forget from the rendering core's
//! perspective and both recover locally: any failure — network, backend,
//! rate limiting — is replaced by a fixed fallback payload and never
//! reaches the rendering path.

use thiserror::Error;

/// Why a collaborator call failed. Callers never propagate this further
/// than the fallback helpers below.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The backend could not be reached or answered garbage.
    #[error("text backend unavailable: {0}")]
    Unavailable(String),
    /// The backend asked us to slow down.
    #[error("text backend rate limited")]
    RateLimited,
}

/// Flavor copy about a topic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insight {
    /// Headline.
    pub title: String,
    /// A sentence or two; ~30 words by convention, not enforced.
    pub explanation: String,
    /// Small print under the headline.
    pub subtext: String,
}

/// Letter grade of a benchmark critique.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// The grade band a 0–100 score falls into.
    pub fn from_score(score: u8) -> Grade {
        match score {
            95..=u8::MAX => Grade::S,
            85..=94 => Grade::A,
            70..=84 => Grade::B,
            55..=69 => Grade::C,
            40..=54 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// A benchmark critique of the loaded mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Benchmark {
    /// Score in [0, 100].
    pub score: u8,
    /// Letter grade matching the score.
    pub grade: Grade,
    /// What the backend thought of the mesh.
    pub analysis: String,
    /// What it suggests doing about it.
    pub recommendation: String,
}

/// What the benchmark collaborator is told about the mesh.
#[derive(Clone, Debug)]
pub struct BenchmarkRequest {
    /// "box", "sphere", "helix" or "imported".
    pub model_kind: String,
    /// Vertex count of the focal geometry.
    pub vertex_count: usize,
    /// Whether the mesh carries real texture coordinates.
    pub has_uvs: bool,
}

/// The insight-text collaborator.
pub trait InsightSource {
    /// Produces flavor copy for a free-text topic.
    fn generate(&self, topic: &str) -> Result<Insight, CollaboratorError>;
}

/// The benchmark-text collaborator.
pub trait BenchmarkSource {
    /// Produces a critique of the described mesh.
    fn critique(&self, request: &BenchmarkRequest) -> Result<Benchmark, CollaboratorError>;
}

/// Asks the collaborator for an insight, substituting the fixed fallback
/// triple on any failure.
pub fn insight_or_fallback(source: &dyn InsightSource, topic: &str) -> Insight {
    match source.generate(topic) {
        Ok(insight) => insight,
        Err(err) => {
            log::warn!("insight call failed ({}), using fallback", err);
            fallback_insight()
        }
    }
}

/// Asks the collaborator for a critique, substituting the fixed heuristic
/// payload on any failure.
pub fn benchmark_or_fallback(source: &dyn BenchmarkSource, request: &BenchmarkRequest) -> Benchmark {
    match source.critique(request) {
        Ok(benchmark) => benchmark,
        Err(err) => {
            log::warn!("benchmark call failed ({}), using fallback", err);
            fallback_benchmark(request)
        }
    }
}

/// The fixed insight shown when the backend is unreachable.
pub fn fallback_insight() -> Insight {
    Insight {
        title: "Volumetric Theory".to_string(),
        explanation: "Every surface is a conversation between light and topology; \
                      the lab merely eavesdrops."
            .to_string(),
        subtext: "offline copy — the text backend was unavailable".to_string(),
    }
}

/// The deterministic critique derived from the request when the backend is
/// unreachable: a base score, a UV bonus, and a capped density bonus.
pub fn fallback_benchmark(request: &BenchmarkRequest) -> Benchmark {
    let mut score = 52u8;
    if request.has_uvs {
        score += 18;
    }
    score += (request.vertex_count / 1000).min(20) as u8;

    Benchmark {
        score,
        grade: Grade::from_score(score),
        analysis: format!(
            "The {} presents {} vertices of respectable intent{}.",
            request.model_kind,
            request.vertex_count,
            if request.has_uvs {
                " and a serviceable UV chart"
            } else {
                ", though its texture space remains unexplored"
            }
        ),
        recommendation: if request.has_uvs {
            "Ship it before it develops opinions.".to_string()
        } else {
            "Unwrap it; every mesh deserves a chart of its own.".to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    impl InsightSource for AlwaysFails {
        fn generate(&self, _topic: &str) -> Result<Insight, CollaboratorError> {
            Err(CollaboratorError::RateLimited)
        }
    }

    impl BenchmarkSource for AlwaysFails {
        fn critique(&self, _request: &BenchmarkRequest) -> Result<Benchmark, CollaboratorError> {
            Err(CollaboratorError::Unavailable("boom".to_string()))
        }
    }

    #[test]
    fn failed_insight_yields_the_exact_fallback_triple() {
        let insight = insight_or_fallback(&AlwaysFails, "spheres");
        assert_eq!(insight, fallback_insight());
        assert_eq!(insight.title, "Volumetric Theory");
    }

    #[test]
    fn failed_benchmark_yields_the_heuristic_payload() {
        let request = BenchmarkRequest {
            model_kind: "sphere".to_string(),
            vertex_count: 4225,
            has_uvs: true,
        };
        let benchmark = benchmark_or_fallback(&AlwaysFails, &request);
        assert_eq!(benchmark.score, 52 + 18 + 4);
        assert_eq!(benchmark.grade, Grade::from_score(benchmark.score));
    }

    #[test]
    fn grades_cover_the_score_bands() {
        assert_eq!(Grade::from_score(100), Grade::S);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(75), Grade::B);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(45), Grade::D);
        assert_eq!(Grade::from_score(10), Grade::F);
    }

    struct Echo;

    impl InsightSource for Echo {
        fn generate(&self, topic: &str) -> Result<Insight, CollaboratorError> {
            Ok(Insight {
                title: topic.to_string(),
                explanation: String::new(),
                subtext: String::new(),
            })
        }
    }

    #[test]
    fn successful_calls_pass_through_untouched() {
        let insight = insight_or_fallback(&Echo, "helices");
        assert_eq!(insight.title, "helices");
    }
}
