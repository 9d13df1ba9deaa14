//! The laboratory simulation: interaction state and the per-frame loop.

pub use self::lab::{Lab, BASE_DISTANCE, NOMINAL_DT};
pub use self::state::InteractionState;
pub use self::tick::{SyntheticTicks, TickSource};

mod lab;
mod state;
mod tick;
