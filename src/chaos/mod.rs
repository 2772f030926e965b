//! Chaotic recurrence primitives.
//!
//! A scalar piecewise-parabolic map, the two-variable coupled recurrence
//! built from it, and the parameter triple that seeds both.

pub mod coupled;
pub mod map;
pub mod params;

pub use coupled::CoupledState;
pub use map::chaotic_map;
pub use params::MapParameters;
