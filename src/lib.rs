//! Coupled chaotic-map stream cipher service and its weakness probe.
//!
//! A client sends an 8-byte little-endian `f64` secret. The server mixes it
//! with two private random parameters, drives a pair of coupled
//! piecewise-parabolic maps, squeezes every step through CRC-32 and XORs
//! the resulting keystream with a fixed plaintext.
//!
//! ```text
//! chaos::chaotic_map   (scalar map, peak q at x = secret)
//!     ↕ two evaluations per step
//! chaos::CoupledState  (x' then y', fixed point = DegenerateState)
//!     ↕ warm-up, then one word per step
//! KeystreamGenerator   (CRC-32 over x + y, 4 bytes per word)
//!     ↕ XOR with the shared plaintext
//! CipherSession        (secret validation, parameter derivation)
//! ```
//!
//! The keystream leaks: when the coupled recurrence settles into a 2-cycle
//! only two 32-bit words alternate, which [`probe::fingerprint`] detects from
//! the top bit of every ciphertext byte.
//!
//! # Examples
//!
//! ```
//! use babychaos::chaos::MapParameters;
//! use babychaos::{probe, KeystreamGenerator};
//!
//! let params = MapParameters::new(0.5, 0.95, 0.95);
//! let mut keystream = KeystreamGenerator::new(params).unwrap();
//! let bytes = keystream.take_bytes(64).unwrap();
//!
//! assert_eq!(&bytes[..8], &bytes[8..16]);
//! assert!(probe::is_weak(&bytes));
//! ```

#![deny(clippy::all)]

pub mod chaos;
pub mod client;
pub mod draw;
pub mod error;
pub mod keystream;
pub mod plaintext;
pub mod probe;
pub mod server;
pub mod session;
pub mod wire;

pub use error::{ChaosError, Result};
pub use keystream::{xor_cipher, KeystreamGenerator};
pub use session::CipherSession;
