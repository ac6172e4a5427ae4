//! HTTP transport for payment gateway API calls.
//!
//! Gateway calls are plain request/response exchanges: a `GET` with query
//! parameters or a `POST` with a JSON body, answered with a raw body and a
//! status code. This module performs that exchange and nothing more.
//! Interpreting the body or judging the status belongs to the caller.
//!
//! # Architecture
//!
//! - [`RequestDispatcher`] - Entry point; forwards every call to a
//!   replaceable transport
//! - [`HttpTransport`] - The seam between the dispatcher and the network
//! - [`BlockingTransport`] - Default transport. Blocking, one exchange per
//!   call, fixed limits (30 s connect, 90 s total, TLS 1.2 floor)
//! - [`Connector`] / [`Session`] - The HTTP library underneath, `reqwest` by
//!   default ([`ReqwestConnector`])
//!
//! # Example
//!
//! ```rust,no_run
//! use paygate_http::http::{Params, RequestDispatcher};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dispatcher = RequestDispatcher::new(None)?;
//! let mut params = Params::new();
//! params.insert("merchantOrderID".into(), "QvE8dZshpKhaOmHY".into());
//!
//! let response = dispatcher.request("GET", "https://api.example.test/api/v1/query/order-status/", &params)?;
//! if response.status == 200 {
//!     println!("{}", response.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - [`StartupError`] when a transport cannot be built on this host
//! - [`RequestError::InvalidArgument`] for unsupported methods, before any
//!   network activity
//! - [`RequestError::ApiConnect`] when the exchange could not complete,
//!   classified by [`FailureClass`]
//!
//! Non-2xx responses are returned as normal [`RawResponse`] values.

mod error;
mod http_client;
mod query;
mod request_dispatcher;
mod reqwest_session;
mod session;
mod transport;
mod types;
mod user_agent;
pub mod utils;

pub use error::{ApiConnectError, ExchangeFault, FailureClass, NetworkErrorCode, RequestError, StartupError};
pub use http_client::BlockingTransport;
pub use query::{append_query, to_query_string};
pub use request_dispatcher::RequestDispatcher;
pub use reqwest_session::{ReqwestConnector, ReqwestSession};
pub use session::{Connector, Exchange, Session};
pub use transport::HttpTransport;
pub use types::{HttpMethod, LibraryInfo, Params, RawResponse, RequestOptions, TlsVersion};
pub use user_agent::UserAgent;
