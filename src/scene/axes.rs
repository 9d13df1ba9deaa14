use crate::color::{Color, AXIS_X, AXIS_Y, AXIS_Z};
use crate::scene::{InteractionMode, FADE_EASING};
use glamx::Vec3;

/// Length of each axis segment, in world units.
pub const AXIS_LENGTH: f32 = 260.0;
/// Opacity target of the positive-direction segments.
const OPACITY_POSITIVE: f32 = 0.85;
/// Opacity target of the negative-direction segments.
const OPACITY_NEGATIVE: f32 = 0.35;

/// One of the six indicator segments.
pub struct AxisSegment {
    /// Unit direction of the segment (the segment runs from the origin to
    /// `direction * AXIS_LENGTH`).
    pub direction: Vec3,
    /// Segment color (the axis family's hue).
    pub color: Color,
    /// Current eased opacity.
    pub opacity: f32,
    target: f32,
}

/// The coordinate-axis indicator: six independently fading line segments,
/// one per signed axis direction.
///
/// The targets obey the visibility rules of the composer: axes vanish while
/// the mesh is flattened (an unwrapped chart has no meaningful axes) and
/// while the view idles with no model selected.
pub struct AxisIndicator {
    segments: [AxisSegment; 6],
}

impl Default for AxisIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisIndicator {
    /// Creates the six segments, fully transparent.
    pub fn new() -> AxisIndicator {
        let seg = |direction: Vec3, color: Color| AxisSegment {
            direction,
            color,
            opacity: 0.0,
            target: 0.0,
        };

        AxisIndicator {
            segments: [
                seg(Vec3::X, AXIS_X),
                seg(-Vec3::X, AXIS_X),
                seg(Vec3::Y, AXIS_Y),
                seg(-Vec3::Y, AXIS_Y),
                seg(Vec3::Z, AXIS_Z),
                seg(-Vec3::Z, AXIS_Z),
            ],
        }
    }

    /// The six segments.
    #[inline]
    pub fn segments(&self) -> &[AxisSegment; 6] {
        &self.segments
    }

    /// Retargets every segment for this frame's scene state.
    ///
    /// Targets collapse to zero whenever the unwrap mix is non-zero (a
    /// flattened chart has no meaningful axes) and throughout idle-chaos,
    /// model or not; otherwise positive segments aim higher than negative
    /// ones.
    pub fn retarget(&mut self, mode: InteractionMode, unwrap_mix: f32) {
        let hidden = unwrap_mix > 0.0 || mode == InteractionMode::IdleChaos;

        for segment in &mut self.segments {
            segment.target = if hidden {
                0.0
            } else if segment.direction.max_element() > 0.0 {
                OPACITY_POSITIVE
            } else {
                OPACITY_NEGATIVE
            };
        }
    }

    /// One frame of easing toward the per-segment targets.
    pub fn ease(&mut self) {
        for segment in &mut self.segments {
            segment.opacity += (segment.target - segment.opacity) * FADE_EASING;
        }
    }

    /// Largest current segment opacity, used by visibility checks.
    pub fn max_opacity(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.opacity)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(axes: &mut AxisIndicator, frames: usize) {
        for _ in 0..frames {
            axes.ease();
        }
    }

    #[test]
    fn focused_targets_favor_positive_directions() {
        let mut axes = AxisIndicator::new();
        axes.retarget(InteractionMode::Focused, 0.0);
        settle(&mut axes, 400);

        let segs = axes.segments();
        assert!((segs[0].opacity - OPACITY_POSITIVE).abs() < 1e-2);
        assert!((segs[1].opacity - OPACITY_NEGATIVE).abs() < 1e-2);
    }

    #[test]
    fn unwrap_forces_the_axes_away() {
        let mut axes = AxisIndicator::new();
        axes.retarget(InteractionMode::Focused, 0.0);
        settle(&mut axes, 400);
        assert!(axes.max_opacity() > 0.5);

        axes.retarget(InteractionMode::Focused, 0.4);
        settle(&mut axes, 400);
        assert!(axes.max_opacity() < 1e-2);
    }

    #[test]
    fn idle_chaos_without_a_model_hides_the_axes() {
        let mut axes = AxisIndicator::new();
        axes.retarget(InteractionMode::IdleChaos, 0.0);
        settle(&mut axes, 400);
        assert!(axes.max_opacity() < 1e-2);
    }
}
