//! Error types for the payment gateway transport.
//!
//! Three error kinds are kept apart so callers can react to them by type:
//!
//! - [`StartupError`]: the HTTP capability on this host is unusable. Only
//!   returned while constructing a transport, never from a request.
//! - [`RequestError::InvalidArgument`]: the caller passed something the
//!   transport cannot send (for example an unsupported method). Raised
//!   before any network activity.
//! - [`RequestError::ApiConnect`]: the exchange with the gateway could not
//!   complete. Carries an [`ApiConnectError`] with the classification and
//!   the raw low-level code, message and URL.
//!
//! A response with a non-2xx status is *not* an error at this layer; it is
//! returned as a normal [`RawResponse`](super::RawResponse).

use std::fmt;

use thiserror::Error;

/// The HTTP capability required by a transport is missing or too old.
///
/// This is fatal for the transport instance being built: no request can be
/// attempted with it, and retrying construction on the same host will fail
/// the same way.
///
/// # Example
///
/// ```rust,no_run
/// use paygate_http::http::{BlockingTransport, StartupError};
///
/// match BlockingTransport::new() {
///     Ok(_) => println!("transport ready"),
///     Err(StartupError::Outdated { library, found, minimum }) => {
///         eprintln!("{library} {found} is older than {minimum}");
///     }
///     Err(e) => eprintln!("cannot start: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum StartupError {
    /// The HTTP library could not be initialized on this host.
    ///
    /// Typically a TLS backend that cannot honour the TLS 1.2 floor.
    #[error("HTTP library is not available on this system: {0}")]
    Unavailable(String),

    /// The HTTP library is present but older than the supported floor.
    #[error("{library} minimum required version {minimum}, found {found}")]
    Outdated {
        /// Library name, e.g. `reqwest`.
        library: &'static str,
        /// Version reported by the library.
        found: String,
        /// Oldest version the connector accepts.
        minimum: &'static str,
    },
}

/// Errors returned by [`HttpTransport::request`](super::HttpTransport::request).
///
/// # Error Categories
///
/// - **Caller errors**: [`InvalidArgument`](RequestError::InvalidArgument),
///   [`Json`](RequestError::Json)
/// - **Network errors**: [`ApiConnect`](RequestError::ApiConnect)
///
/// # Example
///
/// ```rust,no_run
/// use paygate_http::http::{FailureClass, RequestError};
///
/// fn handle_error(err: RequestError) {
///     match err {
///         RequestError::InvalidArgument(reason) => eprintln!("fix the call: {reason}"),
///         RequestError::ApiConnect(e) if e.class == FailureClass::TimedOut => {
///             eprintln!("gateway too slow at {}", e.url);
///         }
///         other => eprintln!("request failed: {other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request was rejected before reaching the network.
    ///
    /// Only `GET` and `POST` (in any letter case) are accepted as methods.
    #[error("Unrecognized method {0}")]
    InvalidArgument(String),

    /// The network exchange could not be completed.
    ///
    /// The session handle has already been closed when this is returned.
    #[error(transparent)]
    ApiConnect(#[from] ApiConnectError),

    /// The parameters could not be encoded as a JSON body.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A classified network failure.
///
/// `class` is advisory text for humans; `code`, `message` and `url` are the
/// untouched low-level details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class}. Network error [{code}]: {message} at {url}")]
pub struct ApiConnectError {
    pub class: FailureClass,
    pub code: NetworkErrorCode,
    pub message: String,
    pub url: String,
}

impl ApiConnectError {
    pub fn new(code: NetworkErrorCode, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            class: FailureClass::from(code),
            code,
            message: message.into(),
            url: url.into(),
        }
    }
}

/// Coarse category of a network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    ConnectionRefused,
    HostResolution,
    TimedOut,
    Certificate,
    Unknown,
}

impl From<NetworkErrorCode> for FailureClass {
    fn from(code: NetworkErrorCode) -> Self {
        match code {
            NetworkErrorCode::COULDNT_CONNECT => FailureClass::ConnectionRefused,
            NetworkErrorCode::COULDNT_RESOLVE_HOST => FailureClass::HostResolution,
            NetworkErrorCode::OPERATION_TIMEDOUT => FailureClass::TimedOut,
            NetworkErrorCode::PEER_FAILED_VERIFICATION => FailureClass::Certificate,
            _ => FailureClass::Unknown,
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::ConnectionRefused => write!(f, "could not connect"),
            FailureClass::HostResolution => write!(f, "could not resolve host"),
            FailureClass::TimedOut => write!(f, "operation timed out"),
            FailureClass::Certificate => write!(f, "server's TLS certificate not OK"),
            FailureClass::Unknown => write!(f, "unknown error"),
        }
    }
}

/// Numeric code of a low-level network fault.
///
/// The numbering follows the codes HTTP client libraries have long used for
/// these faults, so logs stay comparable with other gateway SDKs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkErrorCode(pub u32);

impl NetworkErrorCode {
    pub const FAILED_INIT: Self = Self(2);
    pub const URL_MALFORMAT: Self = Self(3);
    pub const COULDNT_RESOLVE_HOST: Self = Self(6);
    pub const COULDNT_CONNECT: Self = Self(7);
    pub const OPERATION_TIMEDOUT: Self = Self(28);
    pub const TOO_MANY_REDIRECTS: Self = Self(47);
    pub const SEND_ERROR: Self = Self(55);
    pub const RECV_ERROR: Self = Self(56);
    pub const PEER_FAILED_VERIFICATION: Self = Self(60);
}

impl fmt::Display for NetworkErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Low-level failure reported by a [`Session`](super::Session).
///
/// Unclassified; the transport turns it into an [`ApiConnectError`] once the
/// target URL is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeFault {
    pub code: NetworkErrorCode,
    pub message: String,
}

impl ExchangeFault {
    pub fn new(code: NetworkErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn into_api_connect(self, url: impl Into<String>) -> ApiConnectError {
        ApiConnectError::new(self.code, self.message, url)
    }
}
