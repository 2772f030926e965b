//! Probe client: samples ciphertexts until one shows the weak structure.

use crate::error::Result;
use crate::probe::{self, ProbeReport};
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};
use crate::wire;
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Secret sent by default; it pins `primary` at 0.95 where 2-cycles are
/// frequent.
pub const DEFAULT_SECRET: f64 = 4.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub address: String,
    pub secret: f64,
    /// Give up after this many samples; `None` keeps sampling.
    pub max_attempts: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            address: format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            secret: DEFAULT_SECRET,
            max_attempts: None,
            timeout: None,
        }
    }
}

/// A weak ciphertext and how many samples it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub attempts: usize,
    pub ciphertext: Vec<u8>,
    pub report: ProbeReport,
}

/// Resolves the `local` shorthand to the default listener address.
pub fn resolve_target(target: &str) -> String {
    if target == "local" {
        format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)
    } else {
        target.to_string()
    }
}

/// Performs one exchange and returns everything the server sent.
///
/// A rejected or degenerate session shows up as an empty response.
pub fn fetch_ciphertext(address: &str, secret: f64, timeout: Option<Duration>) -> Result<Vec<u8>> {
    let mut stream = TcpStream::connect(address)?;
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    stream.write_all(&wire::encode_secret(secret))?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;

    let mut ciphertext = Vec::new();
    stream.read_to_end(&mut ciphertext)?;
    Ok(ciphertext)
}

/// Samples until a ciphertext fingerprints as weak.
///
/// Returns `Ok(None)` once `max_attempts` samples were all noisy. Transport
/// errors abort the hunt.
pub fn sample_until_weak(config: &ProbeConfig) -> Result<Option<Capture>> {
    let mut attempts = 0;
    loop {
        if config.max_attempts.is_some_and(|max| attempts >= max) {
            return Ok(None);
        }
        attempts += 1;

        let ciphertext = fetch_ciphertext(&config.address, config.secret, config.timeout)?;
        let report = probe::fingerprint(&ciphertext);
        debug!(
            attempt = attempts,
            received = ciphertext.len(),
            "[PROBE] {}",
            report
        );

        if report.is_weak() {
            info!("[PROBE] weak keystream after {} attempts", attempts);
            return Ok(Some(Capture {
                attempts,
                ciphertext,
                report,
            }));
        }
    }
}

/// Writes the captured ciphertext, unmodified, to `path`.
pub fn save_capture(path: &Path, capture: &Capture) -> Result<()> {
    fs::write(path, &capture.ciphertext)?;
    info!("[PROBE] saved {} bytes to {}", capture.ciphertext.len(), path.display());
    Ok(())
}
