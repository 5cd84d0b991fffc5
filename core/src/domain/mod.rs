//! Domain layer: entities and core abstractions

pub mod clock;
pub mod entities;

pub use clock::{Clock, ManualClock, SystemClock};
