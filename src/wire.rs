//! Wire encoding of the client secret.
//!
//! The secret travels as exactly 8 bytes: one IEEE-754 `f64` in
//! **little-endian** order. Nothing else is sent by the client; the server
//! answers with raw ciphertext and closes. A client packing big-endian
//! would not be refused, its secret would just decode to a different value.

use crate::error::{ChaosError, Result};
use std::io::{self, Read};

pub const SECRET_LEN: usize = 8;

pub fn encode_secret(secret: f64) -> [u8; SECRET_LEN] {
    secret.to_le_bytes()
}

/// Decodes a secret from exactly [`SECRET_LEN`] bytes.
pub fn decode_secret(bytes: &[u8]) -> Result<f64> {
    let raw: [u8; SECRET_LEN] = bytes
        .try_into()
        .map_err(|_| ChaosError::MalformedInput {
            received: bytes.len(),
        })?;
    Ok(f64::from_le_bytes(raw))
}

/// Reads the 8 secret bytes, tolerating short reads.
///
/// Anything the peer sends past the first 8 bytes is left unread.
///
/// # Errors
/// [`ChaosError::MalformedInput`] if the peer closes early, or
/// [`ChaosError::Io`] on transport failure (including a read timeout).
pub fn read_secret_bytes<R: Read>(reader: &mut R) -> Result<[u8; SECRET_LEN]> {
    let mut buf = [0u8; SECRET_LEN];
    let mut filled = 0;
    // Not `read_exact`: its UnexpectedEof loses how many bytes arrived.
    while filled < SECRET_LEN {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(ChaosError::MalformedInput { received: filled }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(buf)
}
