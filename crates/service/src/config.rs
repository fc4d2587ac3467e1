use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// How long a handshake session stays usable
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct Config {
    /// address for the API server to listen on.
    ///  if not set then 0.0.0.0:3001 will be used
    pub listen_addr: Option<SocketAddr>,

    /// a path to a sqlite database, created if missing.
    ///  if not set then an in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    /// handshake session time-to-live
    pub session_ttl: Duration,

    // misc
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: Some(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 3001)),
            sqlite_path: None,
            session_ttl: DEFAULT_SESSION_TTL,
            log_level: tracing::Level::INFO,
        }
    }
}
