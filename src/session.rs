//! One client exchange: secret in, ciphertext out.

use crate::chaos::{CoupledState, MapParameters};
use crate::draw::Draw;
use crate::error::Result;
use crate::keystream::{xor_cipher, KeystreamGenerator, DEFAULT_WARMUP};
use crate::wire;
use std::sync::Arc;
use tracing::debug;

/// Encrypts the shared plaintext for a client secret.
///
/// Holds no per-client state; one instance can serve every connection.
#[derive(Debug, Clone)]
pub struct CipherSession {
    plaintext: Arc<[u8]>,
    warmup: usize,
}

impl CipherSession {
    pub fn new(plaintext: Arc<[u8]>) -> Self {
        CipherSession {
            plaintext,
            warmup: DEFAULT_WARMUP,
        }
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// Handles one raw secret.
    ///
    /// # Errors
    /// - [`MalformedInput`](crate::ChaosError::MalformedInput) unless
    ///   `secret_bytes` is exactly 8 bytes.
    /// - [`InvalidSecret`](crate::ChaosError::InvalidSecret) unless the
    ///   decoded secret is inside (0, 5).
    /// - [`DegenerateState`](crate::ChaosError::DegenerateState) if the
    ///   recurrence collapses before the plaintext is covered.
    ///
    /// On error nothing must be sent to the client.
    pub fn handle(&self, secret_bytes: &[u8], draw: &mut dyn Draw) -> Result<Vec<u8>> {
        let secret = wire::decode_secret(secret_bytes)?;
        let params = MapParameters::derive(secret, draw)?;
        debug!(
            secret,
            primary = params.primary,
            secondary_b = params.secondary_b,
            secondary_c = params.secondary_c,
            "[SESSION] derived map parameters"
        );
        self.encrypt(params)
    }

    /// Encrypts the plaintext under already derived parameters.
    pub fn encrypt(&self, params: MapParameters) -> Result<Vec<u8>> {
        let mut keystream =
            KeystreamGenerator::with_state(params, CoupledState::default(), self.warmup)?;
        xor_cipher(&self.plaintext, &mut keystream)
    }
}
