//! The native canvas hosting the laboratory's frame loop.

pub use self::canvas::{Canvas, Frame, InputEvent};

mod canvas;
