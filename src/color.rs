//! Color type and the handful of named colors the laboratory uses.
//!
//! RGBA components are `f32` in `[0.0, 1.0]`.

pub use rgb::Rgba;

/// The color type used throughout uvlab. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// Black (0, 0, 0).
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// White (255, 255, 255).
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// The near-black background of the laboratory view.
pub const LAB_BACKGROUND: Color = Color::new(0.02, 0.02, 0.035, 1.0);

/// Cool cyan used for the particle field and point-mode glow.
pub const PARTICLE_CYAN: Color = Color::new(0.35, 0.85, 1.0, 1.0);

/// Warm accent used for the point light.
pub const ACCENT_AMBER: Color = Color::new(1.0, 0.75, 0.35, 1.0);

/// Base color of untextured lit surfaces.
pub const SURFACE_GRAY: Color = Color::new(0.62, 0.64, 0.70, 1.0);

/// Positive X axis (red family).
pub const AXIS_X: Color = Color::new(0.92, 0.26, 0.30, 1.0);

/// Positive Y axis (green family).
pub const AXIS_Y: Color = Color::new(0.35, 0.86, 0.42, 1.0);

/// Positive Z axis (blue family).
pub const AXIS_Z: Color = Color::new(0.30, 0.52, 0.95, 1.0);

/// Wireframe stroke: white at low opacity.
pub const WIRE_WHITE: Color = Color::new(1.0, 1.0, 1.0, 0.28);

/// Linearly interpolates between two colors.
#[inline]
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Replaces the alpha channel of a color.
#[inline]
pub fn with_alpha(c: Color, alpha: f32) -> Color {
    Color::new(c.r, c.g, c.b, alpha)
}
