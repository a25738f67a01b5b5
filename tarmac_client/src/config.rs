// Connection configuration.
//
// The server address is fixed apart from the host, which deployment
// overrides through the `TARMAC_HOST` environment variable. Port and read
// chunk size are protocol constants.

use tarmac_protocol::DEFAULT_CHUNK_SIZE;

/// Environment variable overriding the server host.
pub const HOST_ENV_VAR: &str = "TARMAC_HOST";

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Fixed server port.
pub const DEFAULT_PORT: u16 = 1993;

/// Where and how to connect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ClientConfig {
    /// Default config with the host taken from `TARMAC_HOST` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var(HOST_ENV_VAR) {
            config.host = host;
        }
        config
    }

    /// The `host:port` address string for `TcpStream::connect`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
