use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::TransportArgs;
use crate::http::TlsVersion;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub transport: TransportConfig,
}

/// Fixed exchange limits applied to every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub min_tls_version: TlsVersion,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 90,
            min_tls_version: TlsVersion::Tls12,
        }
    }
}

/// A configuration value the transport cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero timeout would make every request fail immediately.
    #[error("transport.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

impl TransportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_secs"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeout_secs"));
        }
        Ok(())
    }
}

pub trait ApplyArgs {
    fn apply_transport(&mut self, args: &TransportArgs);
}

impl ApplyArgs for ClientConfig {
    fn apply_transport(&mut self, args: &TransportArgs) {
        if let Some(connect_timeout_secs) = args.connect_timeout_secs {
            self.transport.connect_timeout_secs = connect_timeout_secs;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.transport.timeout_secs = timeout_secs;
        }
    }
}
