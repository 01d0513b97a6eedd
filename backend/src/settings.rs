//! Listener configuration loaded via OrthoConfig.

use std::io;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Address the HTTP listener binds to.
///
/// Values come from CLI flags, `ISSUE_TRACKER_*` environment variables or a
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ISSUE_TRACKER")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the socket address to bind.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let ip: IpAddr = self.host().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen host {:?}: {err}", self.host()),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}
