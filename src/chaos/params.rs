//! Map parameters shared by one session's keystream.

use crate::draw::Draw;
use crate::error::{ChaosError, Result};

/// Exclusive upper bound of an accepted client secret.
pub const SECRET_LIMIT: f64 = 5.0;

/// Parameter triple driving the coupled recurrence.
///
/// `primary` places the peak of both maps and comes from the client.
/// `secondary_b` and `secondary_c` are the peak heights of the x and y maps
/// and are private to the server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapParameters {
    pub primary: f64,
    pub secondary_b: f64,
    pub secondary_c: f64,
}

impl MapParameters {
    pub fn new(primary: f64, secondary_b: f64, secondary_c: f64) -> Self {
        MapParameters {
            primary,
            secondary_b,
            secondary_c,
        }
    }

    /// Derives a session's parameters from a client secret and two fresh
    /// draws, `secondary_b` first.
    ///
    /// # Errors
    /// Returns [`ChaosError::InvalidSecret`] if `secret` is not inside
    /// (0, 5). No draw is consumed in that case.
    pub fn derive(secret: f64, draw: &mut dyn Draw) -> Result<Self> {
        let secret = validate_secret(secret)?;
        let secondary_b = secondary_from_draw(draw.draw());
        let secondary_c = secondary_from_draw(draw.draw());
        Ok(MapParameters::new(
            primary_from_secret(secret),
            secondary_b,
            secondary_c,
        ))
    }
}

/// Accepts `secret` only if `0 < secret < 5`. NaN is rejected.
pub fn validate_secret(secret: f64) -> Result<f64> {
    if secret > 0.0 && secret < SECRET_LIMIT {
        Ok(secret)
    } else {
        Err(ChaosError::InvalidSecret(secret))
    }
}

/// Maps a validated secret into (0.5, 1).
pub fn primary_from_secret(secret: f64) -> f64 {
    (5.0 + secret) / 10.0
}

/// Maps a uniform draw in [0, 1) into (0.9, 1].
pub fn secondary_from_draw(draw: f64) -> f64 {
    1.0 - draw / 10.0
}
