//! Sources of the server's private uniform draws.

use rand::rngs::OsRng;
use rand::Rng;

/// Capability to produce uniform values in [0, 1).
pub trait Draw {
    fn draw(&mut self) -> f64;
}

/// Operating-system CSPRNG, safe to use from any number of sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDraw;

impl Draw for OsDraw {
    fn draw(&mut self) -> f64 {
        OsRng.gen::<f64>()
    }
}

/// Replays a fixed sequence, wrapping around at the end.
///
/// Makes sessions reproducible so the weak and degenerate cases can be
/// exercised on purpose.
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedDraw {
    /// # Panics
    /// Panics if `values` is empty or holds anything outside [0, 1).
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted draws need at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted draws must lie in [0, 1)"
        );
        ScriptedDraw { values, next: 0 }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl Draw for ScriptedDraw {
    fn draw(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
