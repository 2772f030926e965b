//! Piecewise-parabolic chaotic map.

/// Evaluates the map at `x`.
///
/// The parabola peaks at `q` for `x == secret` and falls to zero at both 0
/// and 1. Left of the peak its width is `secret`, right of it `1 - secret`,
/// so `secret` must lie strictly inside (0, 1).
///
/// Squares are plain multiplications so the result is bit-identical on every
/// platform; the keystream is only reproducible if this holds.
pub fn chaotic_map(x: f64, secret: f64, q: f64) -> f64 {
    let r = if x <= secret { secret } else { 1.0 - secret };
    let d = secret - x;
    ((-q) / (r * r)) * (d * d) + q
}
