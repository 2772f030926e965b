//! Detects the period-8 top-bit structure of a collapsed keystream.
//!
//! The plaintext is ASCII, so the top bit of every ciphertext byte is the
//! top bit of the keystream byte under it. When the recurrence has settled
//! into a 2-cycle only two 32-bit words alternate, and the top bits repeat
//! every 8 bytes.

use std::fmt;

/// Byte distance after which the top-bit pattern of a 2-cycle repeats.
pub const PERIOD: usize = 8;

pub const TOP_BIT: u8 = 0x80;

/// Result of fingerprinting one ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeReport {
    /// Every residue class mod 8 has a constant top bit. Bit `i` of
    /// `pattern` is that constant for class `i`.
    Weak { pattern: u8 },
    /// `unsettled` classes are empty or carry both top-bit values.
    Noisy { unsettled: usize },
}

impl ProbeReport {
    pub fn is_weak(&self) -> bool {
        matches!(self, ProbeReport::Weak { .. })
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeReport::Weak { pattern } => {
                write!(f, "weak (top-bit pattern {:08b})", pattern.reverse_bits())
            }
            ProbeReport::Noisy { unsettled } => {
                write!(f, "noisy ({} of {} classes unsettled)", unsettled, PERIOD)
            }
        }
    }
}

/// Partitions the top bits of `data` by index mod 8 and checks that each
/// class is constant.
///
/// Data shorter than 8 bytes leaves some class empty and is never weak.
pub fn fingerprint(data: &[u8]) -> ProbeReport {
    let mut pattern = 0u8;
    let mut unsettled = 0;

    for class in 0..PERIOD {
        let mut bits = data.iter().skip(class).step_by(PERIOD).map(|b| b & TOP_BIT);
        match bits.next() {
            Some(first) if bits.all(|bit| bit == first) => {
                if first != 0 {
                    pattern |= 1 << class;
                }
            }
            _ => unsettled += 1,
        }
    }

    if unsettled == 0 {
        ProbeReport::Weak { pattern }
    } else {
        ProbeReport::Noisy { unsettled }
    }
}

pub fn is_weak(data: &[u8]) -> bool {
    fingerprint(data).is_weak()
}
