//! Two-variable coupled recurrence.

use super::map::chaotic_map;
use super::params::MapParameters;
use crate::error::{ChaosError, Result};

/// Current `(x, y)` point of the coupled recurrence.
///
/// Each step updates `x` first and feeds the new `x` into the `y` update.
/// The point only moves forward; a generator owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoupledState {
    x: f64,
    y: f64,
}

impl Default for CoupledState {
    /// Starts at `(0.45, 0.55)`.
    fn default() -> Self {
        CoupledState { x: 0.45, y: 0.55 }
    }
}

impl CoupledState {
    pub fn new(x: f64, y: f64) -> Self {
        CoupledState { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `x + y`, the value a keystream word is derived from.
    pub fn sum(&self) -> f64 {
        self.x + self.y
    }

    /// Advances one step.
    ///
    /// # Errors
    /// Returns [`ChaosError::DegenerateState`] if the step maps the point
    /// onto itself. The recurrence can never leave such a point, so the
    /// state is left where it is and the caller must give up.
    pub fn step(&mut self, params: &MapParameters) -> Result<()> {
        let x = (1.0 - self.y) * chaotic_map(self.x, params.primary, params.secondary_b);
        let y = (1.0 - x) * chaotic_map(self.y, params.primary, params.secondary_c);

        if x == self.x && y == self.y {
            return Err(ChaosError::DegenerateState { x, y });
        }

        self.x = x;
        self.y = y;
        Ok(())
    }
}
