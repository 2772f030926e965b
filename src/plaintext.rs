//! The process-wide plaintext every session encrypts.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, OnceLock};

/// Length of the plaintext and therefore of every response.
pub const PLAINTEXT_LEN: usize = 0x600;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static SHARED: OnceLock<Arc<[u8]>> = OnceLock::new();

/// Random ASCII letters, one independent choice per byte.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len)
        .filter_map(|_| LETTERS.choose(rng).copied())
        .collect()
}

/// Returns the process plaintext, generating it from the OS RNG on first use.
///
/// Callers share the same allocation; it is never mutated.
pub fn shared() -> Arc<[u8]> {
    SHARED
        .get_or_init(|| generate(&mut OsRng, PLAINTEXT_LEN).into())
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_letters_only() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = generate(&mut rng, PLAINTEXT_LEN);
        assert_eq!(text.len(), PLAINTEXT_LEN);
        assert!(text.iter().all(u8::is_ascii_alphabetic));
    }

    #[test]
    fn test_shared_is_initialized_once() {
        let a = shared();
        let b = shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), PLAINTEXT_LEN);
        assert!(a.iter().all(|b| b & 0x80 == 0));
    }
}
