//! Entry point used by gateway API calls to send a request.
//!
//! [`RequestDispatcher`] owns exactly one [`HttpTransport`] and forwards every
//! call to it. It exists so callers can swap the transport (for a mock, a
//! proxying transport, or a differently configured [`BlockingTransport`])
//! without touching the code that issues requests.
//!
//! # Example
//!
//! ```rust,no_run
//! use paygate_http::http::{Params, RequestDispatcher};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dispatcher = RequestDispatcher::new(None)?;
//!
//! let mut params = Params::new();
//! params.insert("merchantOrderID".into(), "QvE8dZshpKhaOmHY".into());
//! params.insert("amount".into(), "10.00".into());
//!
//! let (body, status) = dispatcher
//!     .request("POST", "https://api.example.test/api/v1/deposit/", &params)?
//!     .into_parts();
//! println!("{status}: {body}");
//! # Ok(())
//! # }
//! ```

use log::debug;

use super::error::{RequestError, StartupError};
use super::http_client::BlockingTransport;
use super::transport::HttpTransport;
use super::types::{Params, RawResponse};

/// Forwards gateway requests to a replaceable transport.
///
/// The dispatcher adds no behaviour of its own: no retries, no status
/// checks, no error mapping. Whatever the bound transport returns, the
/// caller gets back unchanged.
///
/// # Thread Safety
///
/// Requests take `&mut self`, so one dispatcher serves one caller at a
/// time. Share it behind a `Mutex` or create one per thread.
pub struct RequestDispatcher {
    /// The transport every request is delegated to.
    transport: Box<dyn HttpTransport>,
}

impl RequestDispatcher {
    /// Creates a dispatcher bound to `transport`, or to a default
    /// [`BlockingTransport`] when `None` is given.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the default transport has to be built and
    /// the HTTP library is missing or too old. Never fails when a transport
    /// is supplied.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use paygate_http::http::{BlockingTransport, RequestDispatcher};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let default = RequestDispatcher::new(None)?;
    /// let explicit = RequestDispatcher::new(Some(Box::new(BlockingTransport::new()?)))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(transport: Option<Box<dyn HttpTransport>>) -> Result<Self, StartupError> {
        let transport = match transport {
            Some(transport) => transport,
            None => Self::default_transport()?,
        };
        Ok(Self::with_transport(transport))
    }

    /// Creates a dispatcher bound to the given transport. Infallible.
    pub fn with_transport(transport: Box<dyn HttpTransport>) -> Self {
        debug!(transport = transport.transport_name(); "Dispatcher bound to transport");
        Self { transport }
    }

    /// Returns the transport currently bound.
    pub fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    pub fn transport_mut(&mut self) -> &mut dyn HttpTransport {
        self.transport.as_mut()
    }

    /// Replaces the bound transport.
    ///
    /// Passing `None` binds a fresh default [`BlockingTransport`]. The
    /// previous transport is dropped, which closes any handle it still had
    /// open. Returns `self` so calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] only when `None` is passed and the default
    /// transport cannot be built. The previous transport stays bound in that
    /// case.
    pub fn set_transport(&mut self, transport: Option<Box<dyn HttpTransport>>) -> Result<&mut Self, StartupError> {
        let transport = match transport {
            Some(transport) => transport,
            None => Self::default_transport()?,
        };
        debug!(transport = transport.transport_name(); "Dispatcher transport replaced");
        self.transport = transport;
        Ok(self)
    }

    /// Sends one request through the bound transport.
    ///
    /// # Arguments
    ///
    /// * `method` - `GET` or `POST`, in any letter case
    /// * `url` - Absolute URL of the gateway endpoint
    /// * `params` - Query parameters for `GET`, JSON body fields for `POST`
    ///
    /// # Returns
    ///
    /// The raw body and status code, whatever the status is.
    ///
    /// # Errors
    ///
    /// Exactly the errors of the bound transport's
    /// [`request`](HttpTransport::request).
    pub fn request(&mut self, method: &str, url: &str, params: &Params) -> Result<RawResponse, RequestError> {
        self.transport.request(method, url, params)
    }

    fn default_transport() -> Result<Box<dyn HttpTransport>, StartupError> {
        Ok(Box::new(BlockingTransport::new()?))
    }
}
