//! End-to-end exchanges against a live listener on an ephemeral port.
//!
//! The server draws from scripted sources handed out in accept order, so
//! every connection's private parameters are known in advance.

use babychaos::chaos::MapParameters;
use babychaos::client::{self, ProbeConfig};
use babychaos::draw::{Draw, ScriptedDraw};
use babychaos::plaintext::{self, PLAINTEXT_LEN};
use babychaos::probe::{self, ProbeReport};
use babychaos::server::{DrawFactory, Server, ServerConfig};
use babychaos::{wire, xor_cipher, KeystreamGenerator};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Draw pairs for secret 4.5 (primary 0.95).
const NOISY: [f64; 2] = [0.2, 0.3];
const OTHER_NOISY: [f64; 2] = [0.9, 0.1];
const WEAK: [f64; 2] = [0.2, 0.4];
const DEGENERATE: [f64; 2] = [0.5, 0.5];

fn scripted(sessions: Vec<[f64; 2]>) -> DrawFactory {
    let next = AtomicUsize::new(0);
    Arc::new(move || {
        let i = next.fetch_add(1, Ordering::SeqCst);
        Box::new(ScriptedDraw::new(sessions[i % sessions.len()].to_vec())) as Box<dyn Draw + Send>
    })
}

fn spawn_server(sessions: Vec<[f64; 2]>) -> (SocketAddr, Arc<[u8]>) {
    spawn_server_with_timeout(sessions, Duration::from_secs(5))
}

fn spawn_server_with_timeout(sessions: Vec<[f64; 2]>, timeout: Duration) -> (SocketAddr, Arc<[u8]>) {
    let config = ServerConfig {
        port: 0,
        timeout: Some(timeout),
        ..ServerConfig::default()
    };
    let text: Arc<[u8]> = plaintext::generate(&mut StdRng::seed_from_u64(1), PLAINTEXT_LEN).into();
    let server = Server::bind(&config, Arc::clone(&text), scripted(sessions)).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.serve_forever());
    (addr, text)
}

fn exchange(addr: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(payload).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

#[test]
fn valid_secret_gets_full_ciphertext() {
    let (addr, text) = spawn_server(vec![NOISY]);
    let response = exchange(addr, &wire::encode_secret(4.5));
    assert_eq!(response.len(), PLAINTEXT_LEN);

    let mut keystream = KeystreamGenerator::new(MapParameters::new(0.95, 0.98, 0.97)).unwrap();
    assert_eq!(xor_cipher(&response, &mut keystream).unwrap(), text.to_vec());
}

#[test]
fn fresh_server_draws_change_ciphertext() {
    let (addr, _) = spawn_server(vec![NOISY, OTHER_NOISY]);
    let first = exchange(addr, &wire::encode_secret(4.5));
    let second = exchange(addr, &wire::encode_secret(4.5));
    assert_eq!(first.len(), PLAINTEXT_LEN);
    assert_eq!(second.len(), PLAINTEXT_LEN);
    assert_ne!(first, second);
}

#[test]
fn out_of_range_secrets_get_no_response() {
    let (addr, _) = spawn_server(vec![NOISY]);
    for secret in [0.0, 5.0, -0.1, 5.1] {
        assert!(exchange(addr, &wire::encode_secret(secret)).is_empty(), "secret {}", secret);
    }
    // The listener is still serving.
    assert_eq!(exchange(addr, &wire::encode_secret(4.5)).len(), PLAINTEXT_LEN);
}

#[test]
fn short_secret_gets_no_response() {
    let (addr, _) = spawn_server(vec![NOISY]);
    assert!(exchange(addr, &[0x00, 0x12, 0x40]).is_empty());
}

#[test]
fn degenerate_session_does_not_stop_server() {
    let (addr, _) = spawn_server(vec![DEGENERATE, NOISY]);
    assert!(exchange(addr, &wire::encode_secret(4.5)).is_empty());
    assert_eq!(exchange(addr, &wire::encode_secret(4.5)).len(), PLAINTEXT_LEN);
}

#[test]
fn silent_client_is_dropped_after_timeout() {
    let (addr, _) = spawn_server_with_timeout(vec![NOISY], Duration::from_millis(200));

    let mut silent = TcpStream::connect(addr).unwrap();
    silent.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let started = Instant::now();
    let mut response = Vec::new();
    silent.read_to_end(&mut response).unwrap();

    assert!(response.is_empty());
    assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());

    // Later clients are still served in full.
    assert_eq!(exchange(addr, &wire::encode_secret(4.5)).len(), PLAINTEXT_LEN);
}

#[test]
fn concurrent_sessions_share_plaintext() {
    let (addr, text) = spawn_server(vec![NOISY]);
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || exchange(addr, &wire::encode_secret(4.5))))
        .collect();

    let mut keystream = KeystreamGenerator::new(MapParameters::new(0.95, 0.98, 0.97)).unwrap();
    let expected = xor_cipher(&text, &mut keystream).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn probe_client_samples_until_weak() {
    let (addr, _) = spawn_server(vec![DEGENERATE, NOISY, WEAK]);
    let config = ProbeConfig {
        address: addr.to_string(),
        timeout: Some(Duration::from_secs(5)),
        ..ProbeConfig::default()
    };

    let capture = client::sample_until_weak(&config).unwrap().unwrap();
    assert_eq!(capture.attempts, 3);
    assert_eq!(capture.ciphertext.len(), PLAINTEXT_LEN);
    assert!(matches!(capture.report, ProbeReport::Weak { .. }));
    assert!(probe::is_weak(&capture.ciphertext));
}

#[test]
fn probe_client_gives_up_after_max_attempts() {
    let (addr, _) = spawn_server(vec![NOISY]);
    let config = ProbeConfig {
        address: addr.to_string(),
        max_attempts: Some(3),
        timeout: Some(Duration::from_secs(5)),
        ..ProbeConfig::default()
    };
    assert_eq!(client::sample_until_weak(&config).unwrap(), None);
}
