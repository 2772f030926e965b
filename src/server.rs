//! Blocking TCP listener, one thread per connection.

use crate::draw::{Draw, OsDraw};
use crate::error::Result;
use crate::keystream::DEFAULT_WARMUP;
use crate::session::CipherSession;
use crate::wire;
use std::io::Write;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 10701;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Hands every accepted connection its own draw source.
pub type DrawFactory = Arc<dyn Fn() -> Box<dyn Draw + Send> + Send + Sync>;

/// Listener settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Read and write timeout applied to each connection; `None` blocks
    /// forever.
    pub timeout: Option<Duration>,
    pub warmup: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Some(DEFAULT_TIMEOUT),
            warmup: DEFAULT_WARMUP,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Draws from the OS CSPRNG for every session.
pub fn os_draws() -> DrawFactory {
    Arc::new(|| Box::new(OsDraw) as Box<dyn Draw + Send>)
}

pub struct Server {
    listener: TcpListener,
    session: Arc<CipherSession>,
    draws: DrawFactory,
    timeout: Option<Duration>,
}

impl Server {
    /// Binds the listening socket. On Unix std enables `SO_REUSEADDR`, so a
    /// restart can rebind while old connections sit in TIME_WAIT.
    pub fn bind(config: &ServerConfig, plaintext: Arc<[u8]>, draws: DrawFactory) -> Result<Self> {
        let listener = TcpListener::bind(config.address())?;
        let session = CipherSession::new(plaintext).with_warmup(config.warmup);
        Ok(Server {
            listener,
            session: Arc::new(session),
            draws,
            timeout: config.timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until the listener itself fails.
    ///
    /// Session failures are logged and never stop the loop.
    pub fn serve_forever(self) -> Result<()> {
        info!("[SERVER] Listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("[SERVER] accept failed: {}", e);
                    continue;
                }
            };

            let session = Arc::clone(&self.session);
            let mut draw = (self.draws)();
            let timeout = self.timeout;
            thread::spawn(move || {
                let peer = stream
                    .peer_addr()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| "<unknown>".to_string());
                debug!("[CLIENT] Connected from {}", peer);

                match handle_connection(stream, &session, draw.as_mut(), timeout) {
                    Ok(sent) => info!("[NETWORK] {} <- {} bytes", peer, sent),
                    Err(e) => warn!("[SESSION] {} closed without response: {}", peer, e),
                }
            });
        }

        Ok(())
    }
}

/// Runs one exchange on `stream` and returns the number of bytes sent.
///
/// The stream is dropped, and so closed, on return; on error nothing has
/// been written.
pub fn handle_connection(
    mut stream: TcpStream,
    session: &CipherSession,
    draw: &mut dyn Draw,
    timeout: Option<Duration>,
) -> Result<usize> {
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    let secret_bytes = wire::read_secret_bytes(&mut stream)?;
    let ciphertext = session.handle(&secret_bytes, draw)?;

    stream.write_all(&ciphertext)?;
    stream.flush()?;
    Ok(ciphertext.len())
}
