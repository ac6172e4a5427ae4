mod defaults;
pub mod loader;

pub use defaults::{ApplyArgs, ClientConfig, ConfigError, TransportConfig};
pub use loader::{load_client_config, load_configuration};
