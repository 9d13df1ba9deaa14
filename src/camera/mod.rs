//! Cameras.

pub use self::orbit3d::{OrbitCamera3d, ZOOM_MAX, ZOOM_MIN};

mod orbit3d;
