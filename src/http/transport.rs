use super::error::RequestError;
use super::types::{Params, RawResponse};

/// A way of performing one gateway call.
///
/// `method` is `GET` or `POST` in any letter case; anything else fails with
/// [`RequestError::InvalidArgument`] before touching the network. Any status
/// code the gateway answers with is returned as a [`RawResponse`]; only
/// failures to complete the exchange are errors.
///
/// # Example
///
/// ```rust,no_run
/// use paygate_http::http::{BlockingTransport, HttpTransport, Params};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut transport = BlockingTransport::new()?;
/// let mut params = Params::new();
/// params.insert("merchantOrderID".into(), "QvE8dZshpKhaOmHY".into());
///
/// let response = transport.request("GET", "https://api.example.test/api/v1/query/order-status/", &params)?;
/// println!("{} {}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
pub trait HttpTransport: Send {
    fn request(&mut self, method: &str, url: &str, params: &Params) -> Result<RawResponse, RequestError>;

    /// Concrete type name, for diagnostics.
    fn transport_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
