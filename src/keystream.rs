//! CRC-32 keystream over the coupled recurrence.

use crate::chaos::{CoupledState, MapParameters};
use crate::error::Result;
use tracing::trace;

/// Steps discarded before the first keystream word.
pub const DEFAULT_WARMUP: usize = 1024;

/// Bytes emitted per recurrence step.
pub const WORD_LEN: usize = 4;

/// Keystream generator driven by the coupled chaotic maps.
///
/// Construction runs the warm-up; afterwards every step yields one word,
/// `crc32(le_bytes(x + y))` in little-endian order. Two generators built
/// from the same parameters and starting point yield the same stream.
#[derive(Debug, Clone)]
pub struct KeystreamGenerator {
    params: MapParameters,
    state: CoupledState,
    word: [u8; WORD_LEN],
    // Index of the next unread byte of `word`; WORD_LEN when exhausted.
    offset: usize,
}

impl KeystreamGenerator {
    /// Generator from the default point `(0.45, 0.55)` with
    /// [`DEFAULT_WARMUP`] steps.
    ///
    /// # Errors
    /// Returns [`ChaosError::DegenerateState`](crate::ChaosError) if the
    /// recurrence collapses during warm-up.
    pub fn new(params: MapParameters) -> Result<Self> {
        Self::with_state(params, CoupledState::default(), DEFAULT_WARMUP)
    }

    /// Generator from an explicit starting point and warm-up length.
    pub fn with_state(params: MapParameters, initial: CoupledState, warmup: usize) -> Result<Self> {
        let mut state = initial;
        for _ in 0..warmup {
            state.step(&params)?;
        }
        trace!(
            warmup,
            primary = params.primary,
            x = state.x(),
            y = state.y(),
            "[STREAM] warm-up complete"
        );

        Ok(KeystreamGenerator {
            params,
            state,
            word: [0; WORD_LEN],
            offset: WORD_LEN,
        })
    }

    /// Advances one step and returns the next whole word.
    ///
    /// Bytes of a word already partly consumed by [`next_byte`](Self::next_byte)
    /// are skipped.
    pub fn next_word(&mut self) -> Result<[u8; WORD_LEN]> {
        self.state.step(&self.params)?;
        self.offset = WORD_LEN;
        Ok(word_for(self.state.sum()))
    }

    pub fn next_byte(&mut self) -> Result<u8> {
        if self.offset == WORD_LEN {
            self.word = self.next_word()?;
            self.offset = 0;
        }
        let byte = self.word[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    /// Fills `buf` with the next `buf.len()` keystream bytes.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.next_byte()?;
        }
        Ok(())
    }

    pub fn take_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; count];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Previews the next `count` bytes without consuming them.
    pub fn peek_bytes(&self, count: usize) -> Result<Vec<u8>> {
        self.clone().take_bytes(count)
    }
}

/// Unbounded byte stream. Once the recurrence degenerates every further
/// item is the same error.
impl Iterator for KeystreamGenerator {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_byte())
    }
}

/// Keystream word for one recurrence step.
pub fn word_for(sum: f64) -> [u8; WORD_LEN] {
    crc32fast::hash(&sum.to_le_bytes()).to_le_bytes()
}

/// Encrypts or decrypts `data` by XOR with the next keystream bytes.
pub fn xor_cipher(data: &[u8], keystream: &mut KeystreamGenerator) -> Result<Vec<u8>> {
    data.iter()
        .zip(keystream)
        .map(|(&b, k)| k.map(|k| b ^ k))
        .collect()
}
