use babychaos::client::{self, ProbeConfig, DEFAULT_SECRET};
use babychaos::ChaosError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sample the chaos service until its keystream collapses into a 2-cycle
#[derive(Parser, Debug)]
#[command(name = "chaosprobe", about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Server address (host:port), or "local" for 127.0.0.1:10701
    #[arg(default_value = "local")]
    target: String,

    /// Client secret to send (little-endian f64)
    #[arg(short, long, default_value_t = DEFAULT_SECRET)]
    secret: f64,

    /// File receiving the weak ciphertext
    #[arg(short, long, default_value = "encrypted_data.raw")]
    output: PathBuf,

    /// Stop after N samples (default: never)
    #[arg(short = 'n', long)]
    max_attempts: Option<usize>,

    /// Socket timeout in seconds (0 disables)
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

fn main() -> Result<(), ChaosError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = ProbeConfig {
        address: client::resolve_target(&args.target),
        secret: args.secret,
        max_attempts: args.max_attempts,
        timeout: (args.timeout_secs > 0).then_some(Duration::from_secs(args.timeout_secs)),
    };

    println!("[CLIENT] Target {}", config.address);
    println!("[CLIENT] Sending secret {} on every attempt", config.secret);

    let Some(capture) = client::sample_until_weak(&config)? else {
        println!("[PROBE] No weak keystream within {} attempts", args.max_attempts.unwrap_or(0));
        return Ok(());
    };

    println!(
        "\n[PROBE] Attempt {}: {} ({} bytes)",
        capture.attempts,
        capture.report,
        capture.ciphertext.len()
    );
    let preview = &capture.ciphertext[..capture.ciphertext.len().min(16)];
    println!("Cipher: {} ...", hex::encode(preview));

    client::save_capture(&args.output, &capture)?;
    println!("[PROBE] Saved ciphertext to {:?} ✓", args.output);
    Ok(())
}
