use std::error::Error as StdError;
use std::io;

use reqwest::blocking::{Client, RequestBuilder};

use super::error::{ExchangeFault, NetworkErrorCode, StartupError};
use super::session::{Connector, Exchange, Session};
use super::types::{LibraryInfo, RequestOptions, TlsVersion};

const LIBRARY_NAME: &str = "reqwest";
// Resolved from Cargo.lock by the build script.
const LIBRARY_VERSION: &str = env!("PAYGATE_REQWEST_VERSION");

/// HTTP capability backed by `reqwest::blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Session = ReqwestSession;

    const MIN_VERSION: &'static str = "0.12.0";

    fn library(&self) -> Result<LibraryInfo, StartupError> {
        Client::builder()
            .min_tls_version(TlsVersion::Tls12.into())
            .build()
            .map_err(|e| StartupError::Unavailable(e.to_string()))?;

        Ok(LibraryInfo {
            name: LIBRARY_NAME,
            version: LIBRARY_VERSION.to_string(),
        })
    }

    fn open(&self) -> Result<ReqwestSession, ExchangeFault> {
        Ok(ReqwestSession::default())
    }
}

/// One configured reqwest request waiting to be sent.
///
/// Every `configure` builds a dedicated client from the option bundle, so no
/// connection state is shared with earlier calls.
#[derive(Debug, Default)]
pub struct ReqwestSession {
    prepared: Option<Prepared>,
}

#[derive(Debug)]
struct Prepared {
    request: RequestBuilder,
    capture_body: bool,
}

impl Session for ReqwestSession {
    fn reset(&mut self) {
        self.prepared = None;
    }

    fn configure(&mut self, options: &RequestOptions) -> Result<(), ExchangeFault> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .min_tls_version(options.min_tls_version.into())
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|e| ExchangeFault::new(NetworkErrorCode::FAILED_INIT, e.to_string()))?;

        let mut request = client.request(options.method.into(), options.url.as_str());
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        self.prepared = Some(Prepared {
            request,
            capture_body: options.capture_body,
        });
        Ok(())
    }

    fn execute(&mut self) -> Result<Exchange, ExchangeFault> {
        let Prepared { request, capture_body } = self
            .prepared
            .take()
            .ok_or_else(|| ExchangeFault::new(NetworkErrorCode::FAILED_INIT, "session was not configured"))?;

        let response = request.send().map_err(|e| fault_from(&e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| fault_from(&e))?;

        Ok(Exchange {
            status,
            body: if capture_body { body } else { String::new() },
        })
    }
}

fn fault_from(err: &reqwest::Error) -> ExchangeFault {
    ExchangeFault::new(fault_code(err), error_chain_message(err))
}

fn fault_code(err: &reqwest::Error) -> NetworkErrorCode {
    if err.is_timeout() {
        return NetworkErrorCode::OPERATION_TIMEDOUT;
    }
    if let Some(code) = code_from_causes(err.source()) {
        return code;
    }

    if err.is_connect() {
        NetworkErrorCode::COULDNT_CONNECT
    } else if err.is_builder() {
        NetworkErrorCode::URL_MALFORMAT
    } else if err.is_redirect() {
        NetworkErrorCode::TOO_MANY_REDIRECTS
    } else if err.is_body() || err.is_decode() {
        NetworkErrorCode::RECV_ERROR
    } else {
        NetworkErrorCode::SEND_ERROR
    }
}

/// Walks the cause chain below a reqwest error for faults reqwest does not
/// flag on its own, such as resolver or certificate failures.
fn code_from_causes(mut source: Option<&(dyn StdError + 'static)>) -> Option<NetworkErrorCode> {
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return Some(NetworkErrorCode::COULDNT_CONNECT),
                io::ErrorKind::TimedOut => return Some(NetworkErrorCode::OPERATION_TIMEDOUT),
                _ => {},
            }
        }
        let text = cause.to_string().to_lowercase();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return Some(NetworkErrorCode::COULDNT_RESOLVE_HOST);
        }
        if text.contains("certificate") {
            return Some(NetworkErrorCode::PEER_FAILED_VERIFICATION);
        }
        source = cause.source();
    }
    None
}

// reqwest's own Display hides the cause ("error sending request for url"),
// so the chain is flattened into one line.
fn error_chain_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use super::*;
    use crate::http::types::HttpMethod;

    fn options(url: &str) -> RequestOptions {
        RequestOptions {
            method: HttpMethod::Get,
            url: url.to_string(),
            capture_body: true,
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            min_tls_version: TlsVersion::Tls12,
            user_agent: "paygate-test/0.0".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/", port)
    }

    #[test]
    fn library_reports_reqwest() {
        let info = ReqwestConnector.library().unwrap();
        assert_eq!(info.name, "reqwest");
        assert!(crate::http::utils::version_at_least(&info.version, ReqwestConnector::MIN_VERSION));
    }

    #[test]
    fn library_version_is_the_resolved_release() {
        let info = ReqwestConnector.library().unwrap();
        let parts = info.version.split('.').collect::<Vec<_>>();
        assert_eq!(parts.len(), 3, "{}", info.version);
        assert_eq!(parts[..2], ["0", "12"]);
        assert!(parts[2].parse::<u32>().is_ok(), "{}", info.version);
    }

    #[test]
    fn execute_without_configure_fails_cleanly() {
        let mut session = ReqwestConnector.open().unwrap();
        let fault = session.execute().unwrap_err();
        assert_eq!(fault.code, NetworkErrorCode::FAILED_INIT);
    }

    #[test]
    fn reset_discards_configured_request() {
        let mut session = ReqwestConnector.open().unwrap();
        session.configure(&options("http://127.0.0.1:1/")).unwrap();
        session.reset();
        assert_eq!(session.execute().unwrap_err().code, NetworkErrorCode::FAILED_INIT);
    }

    #[test]
    fn refused_connection_maps_to_couldnt_connect() {
        let mut session = ReqwestConnector.open().unwrap();
        session.configure(&options(&refused_url())).unwrap();
        let fault = session.execute().unwrap_err();
        assert_eq!(fault.code, NetworkErrorCode::COULDNT_CONNECT, "{}", fault.message);
        assert!(!fault.message.is_empty());
    }

    #[test]
    fn malformed_url_is_not_a_connect_failure() {
        let mut session = ReqwestConnector.open().unwrap();
        session.configure(&options("not a url")).unwrap();
        let fault = session.execute().unwrap_err();
        assert_eq!(fault.code, NetworkErrorCode::URL_MALFORMAT, "{}", fault.message);
    }

    #[test]
    fn unknown_host_maps_to_couldnt_resolve_host() {
        let mut session = ReqwestConnector.open().unwrap();
        session.configure(&options("http://no-such-host.invalid/")).unwrap();
        let fault = session.execute().unwrap_err();
        assert_eq!(fault.code, NetworkErrorCode::COULDNT_RESOLVE_HOST, "{}", fault.message);
    }

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<dyn StdError + 'static>>,
    }

    impl Layer {
        fn wrap(message: &'static str, source: impl StdError + 'static) -> Self {
            Self {
                message,
                source: Some(Box::new(source)),
            }
        }
    }

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref()
        }
    }

    fn code_of(chain: &Layer) -> Option<NetworkErrorCode> {
        code_from_causes(Some(chain as &(dyn StdError + 'static)))
    }

    #[test]
    fn rejected_certificate_in_chain_maps_to_peer_failed_verification() {
        let chain = Layer::wrap(
            "client error (Connect)",
            io::Error::other("invalid peer certificate: UnknownIssuer"),
        );
        assert_eq!(code_of(&chain), Some(NetworkErrorCode::PEER_FAILED_VERIFICATION));

        let native = Layer::wrap(
            "client error (Connect)",
            Layer::wrap("error:0A000086:SSL routines", io::Error::other("certificate verify failed")),
        );
        assert_eq!(code_of(&native), Some(NetworkErrorCode::PEER_FAILED_VERIFICATION));
    }

    #[test]
    fn resolver_failure_in_chain_maps_to_couldnt_resolve_host() {
        let chain = Layer::wrap(
            "client error (Connect)",
            Layer::wrap(
                "dns error",
                io::Error::other("failed to lookup address information: Name or service not known"),
            ),
        );
        assert_eq!(code_of(&chain), Some(NetworkErrorCode::COULDNT_RESOLVE_HOST));
    }

    #[test]
    fn socket_kinds_in_chain_are_recognised() {
        let refused = Layer::wrap("tcp connect error", io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(code_of(&refused), Some(NetworkErrorCode::COULDNT_CONNECT));

        let timed_out = Layer::wrap("tcp connect error", io::Error::from(io::ErrorKind::TimedOut));
        assert_eq!(code_of(&timed_out), Some(NetworkErrorCode::OPERATION_TIMEDOUT));
    }

    #[test]
    fn unrelated_chain_is_left_to_reqwest_flags() {
        let chain = Layer::wrap("connection closed before message completed", io::Error::other("broken pipe"));
        assert_eq!(code_of(&chain), None);
        assert_eq!(code_from_causes(None), None);
    }
}
