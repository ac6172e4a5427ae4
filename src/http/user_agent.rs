use std::fmt::{Display, Formatter};

use sysinfo::System;

use super::types::LibraryInfo;

pub const SDK_NAME: &str = env!("CARGO_PKG_NAME");
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
const RUNTIME_ID: &str = "rustc";
const RUNTIME_VERSION: &str = env!("PAYGATE_RUSTC_VERSION");

/// Identity tokens sent in the `User-Agent` header.
///
/// Renders as
/// `<sdk>/<version> (<os> <release>; <runtime> <runtime-version>; <library> <library-version>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    pub sdk_name: String,
    pub sdk_version: String,
    pub os_name: String,
    pub os_release: String,
    pub runtime: String,
    pub runtime_version: String,
    pub library: String,
    pub library_version: String,
}

impl UserAgent {
    /// Collects the tokens for this SDK build on the current host.
    pub fn detect(library: &LibraryInfo) -> Self {
        Self {
            sdk_name: SDK_NAME.to_string(),
            sdk_version: SDK_VERSION.to_string(),
            os_name: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_release: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            runtime: RUNTIME_ID.to_string(),
            runtime_version: RUNTIME_VERSION.to_string(),
            library: library.name.to_string(),
            library_version: library.version.clone(),
        }
    }
}

impl Display for UserAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({} {}; {} {}; {} {})",
            self.sdk_name,
            self.sdk_version,
            self.os_name,
            self.os_release,
            self.runtime,
            self.runtime_version,
            self.library,
            self.library_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tokens_in_order() {
        let ua = UserAgent {
            sdk_name: "paygate-http".to_string(),
            sdk_version: "0.1.0".to_string(),
            os_name: "Linux".to_string(),
            os_release: "6.8.0".to_string(),
            runtime: "rustc".to_string(),
            runtime_version: "1.85.0".to_string(),
            library: "reqwest".to_string(),
            library_version: "0.12".to_string(),
        };
        assert_eq!(
            ua.to_string(),
            "paygate-http/0.1.0 (Linux 6.8.0; rustc 1.85.0; reqwest 0.12)"
        );
    }

    #[test]
    fn detect_fills_every_token() {
        let ua = UserAgent::detect(&LibraryInfo {
            name: "reqwest",
            version: "0.12".to_string(),
        });
        assert_eq!(ua.sdk_name, SDK_NAME);
        assert_eq!(ua.sdk_version, SDK_VERSION);
        assert!(!ua.os_name.is_empty());
        assert!(!ua.os_release.is_empty());
        assert!(!ua.runtime_version.is_empty());
        assert!(ua.to_string().ends_with("; reqwest 0.12)"));
    }
}
