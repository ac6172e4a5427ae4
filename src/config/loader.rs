use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::ClientConfig;

pub const ENV_PREFIX: &str = "PAYGATE";

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the client configuration file, creating it from the defaults first
/// if it does not exist. `PAYGATE_`-prefixed environment variables override
/// file values, e.g. `PAYGATE_TRANSPORT__TIMEOUT_SECS=120`.
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")
}

/// Loads and deserializes the client configuration, rejecting values the
/// transport cannot run with.
pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let config: ClientConfig = load_configuration(path)?
        .try_deserialize()
        .context("Invalid configuration")?;
    config.transport.validate()?;
    Ok(config)
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::{ConfigError, TransportConfig};
    use crate::http::TlsVersion;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config: ClientConfig = load_configuration(&path).unwrap().try_deserialize().unwrap();

        assert!(path.exists());
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[transport]\nconnect_timeout_secs = 5\ntimeout_secs = 12\nmin_tls_version = \"1.3\"\n",
        )
        .unwrap();

        let config: ClientConfig = load_configuration(&path).unwrap().try_deserialize().unwrap();

        assert_eq!(config.transport.connect_timeout_secs, 5);
        assert_eq!(config.transport.timeout_secs, 12);
        assert_eq!(config.transport.min_tls_version, TlsVersion::Tls13);
    }

    #[test]
    fn tls_floor_cannot_be_lowered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transport]\nmin_tls_version = \"1.0\"\n").unwrap();

        let result = load_configuration(&path).unwrap().try_deserialize::<ClientConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transport]\ntimeout_secs = 3\n").unwrap();

        let config: ClientConfig = load_configuration(&path).unwrap().try_deserialize().unwrap();

        assert_eq!(config.transport.timeout_secs, 3);
        assert_eq!(config.transport.connect_timeout_secs, 30);
        assert_eq!(config.transport.min_tls_version, TlsVersion::Tls12);
    }

    #[test]
    fn zero_timeout_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transport]\ntimeout_secs = 0\n").unwrap();

        let err = load_client_config(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroTimeout("timeout_secs"))
        );
    }

    #[test]
    fn load_client_config_accepts_defaults() {
        let dir = tempdir().unwrap();
        let config = load_client_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.transport, TransportConfig::default());
    }
}
