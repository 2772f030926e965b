use babychaos::keystream::DEFAULT_WARMUP;
use babychaos::server::{self, Server, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use babychaos::{plaintext, ChaosError};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Chaotic-map stream cipher service.
///
/// Reads an 8-byte little-endian f64 secret in (0, 5) from each client and
/// answers with 1536 bytes of ciphertext.
#[derive(Parser, Debug)]
#[command(name = "chaosd", about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Per-connection read/write timeout in seconds (0 disables)
    #[arg(short, long, default_value_t = 10)]
    timeout_secs: u64,

    /// Recurrence steps discarded before the first keystream word
    #[arg(long, default_value_t = DEFAULT_WARMUP)]
    warmup: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            timeout: (args.timeout_secs > 0).then_some(Duration::from_secs(args.timeout_secs)),
            warmup: args.warmup,
        }
    }
}

fn main() -> Result<(), ChaosError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from(Args::parse());

    // Generated before the first accept so every session sees the same text.
    let plaintext = plaintext::shared();
    let server = Server::bind(&config, plaintext, server::os_draws())?;
    server.serve_forever()
}
