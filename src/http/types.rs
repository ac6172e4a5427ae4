use std::{fmt::Display, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::error::RequestError;

/// Parameters of a gateway call, in insertion order.
pub type Params = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            other => Err(RequestError::InvalidArgument(other.to_string())),
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Lowest TLS protocol version a session may negotiate.
///
/// Nothing below TLS 1.2 is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TlsVersion {
    #[default]
    #[serde(rename = "1.2")]
    Tls12,
    #[serde(rename = "1.3")]
    Tls13,
}

impl Display for TlsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlsVersion::Tls12 => write!(f, "TLSv1.2"),
            TlsVersion::Tls13 => write!(f, "TLSv1.3"),
        }
    }
}

impl From<TlsVersion> for reqwest::tls::Version {
    fn from(version: TlsVersion) -> Self {
        match version {
            TlsVersion::Tls12 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::Tls13 => reqwest::tls::Version::TLS_1_3,
        }
    }
}

/// Name and version of the HTTP library behind a connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryInfo {
    pub name: &'static str,
    pub version: String,
}

/// Everything a session needs to perform one exchange.
///
/// Built fresh for every call and handed to
/// [`Session::configure`](super::Session::configure); never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub url: String,
    /// Hand the response body back to the caller instead of discarding it.
    pub capture_body: bool,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub min_tls_version: TlsVersion,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    /// Key/value pairs describing the options, for the debug log.
    ///
    /// The body itself is left out; only its length is reported.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let header_names = self
            .headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("method", self.method.to_string()),
            ("url", self.url.clone()),
            ("capture_body", self.capture_body.to_string()),
            ("connect_timeout_secs", self.connect_timeout.as_secs().to_string()),
            ("timeout_secs", self.timeout.as_secs().to_string()),
            ("min_tls_version", self.min_tls_version.to_string()),
            ("user_agent", self.user_agent.clone()),
            ("headers", header_names),
            ("body_bytes", self.body.as_ref().map_or(0, String::len).to_string()),
        ]
    }
}

/// Raw result of a completed exchange. Any status code ends up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: String,
    pub status: u16,
}

impl RawResponse {
    pub fn into_parts(self) -> (String, u16) {
        (self.body, self.status)
    }
}
