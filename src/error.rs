//! Error types for the chaotic stream cipher service.

use thiserror::Error;

/// Errors produced while serving or probing a session.
///
/// Every variant is local to one connection: the listener logs it, drops
/// the stream without sending anything and keeps accepting.
#[derive(Debug, Error)]
pub enum ChaosError {
    /// Client secret is outside the open interval (0, 5).
    #[error("client secret {0} is outside the open interval (0, 5)")]
    InvalidSecret(f64),
    /// The coupled recurrence reached an exact fixed point.
    #[error("coupled state collapsed to the fixed point ({x}, {y})")]
    DegenerateState { x: f64, y: f64 },
    /// The peer closed the connection before sending a whole secret.
    #[error("expected 8 secret bytes, received {received}")]
    MalformedInput { received: usize },
    /// Transport failure on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChaosError>;
