use std::sync::Arc;
use std::time::Duration;

use super::error::{RequestError, StartupError};
use super::query::append_query;
use super::reqwest_session::ReqwestConnector;
use super::session::{Connector, Session, SessionGuard};
use super::transport::HttpTransport;
use super::types::{HttpMethod, LibraryInfo, Params, RawResponse, RequestOptions};
use super::user_agent::UserAgent;
use super::utils::version_at_least;
use crate::config::TransportConfig;
use crate::log::{LogCrateSink, LogSink};

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Default [`HttpTransport`]: one blocking exchange per call over a session
/// handle that is opened (or reset) on entry and always closed on exit.
pub struct BlockingTransport<C: Connector = ReqwestConnector> {
    connector: C,
    session: Option<C::Session>,
    config: TransportConfig,
    library: LibraryInfo,
    user_agent: String,
    sink: Arc<dyn LogSink>,
}

impl BlockingTransport {
    pub fn new() -> Result<Self, StartupError> {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Result<Self, StartupError> {
        Self::with_connector(ReqwestConnector, config, Arc::new(LogCrateSink::default()))
    }
}

impl<C: Connector> BlockingTransport<C> {
    pub fn with_connector(connector: C, config: TransportConfig, sink: Arc<dyn LogSink>) -> Result<Self, StartupError> {
        let library = connector.library()?;
        if !version_at_least(&library.version, C::MIN_VERSION) {
            return Err(StartupError::Outdated {
                library: library.name,
                found: library.version,
                minimum: C::MIN_VERSION,
            });
        }

        let user_agent = UserAgent::detect(&library).to_string();

        Ok(Self {
            connector,
            session: None,
            config,
            library,
            user_agent,
            sink,
        })
    }

    pub fn library(&self) -> &LibraryInfo {
        &self.library
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Closes the session handle if one is open.
    pub fn close(&mut self) {
        drop(SessionGuard::new(&mut self.session, &*self.sink));
    }

    fn build_options(&self, method: HttpMethod, url: &str, params: &Params) -> Result<RequestOptions, RequestError> {
        let (url, headers, body) = match method {
            HttpMethod::Get => (append_query(url, params), Vec::new(), None),
            HttpMethod::Post => (
                url.to_string(),
                vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())],
                Some(serde_json::to_string(params)?),
            ),
        };

        Ok(RequestOptions {
            method,
            url,
            capture_body: true,
            connect_timeout: Duration::from_secs(self.config.connect_timeout_secs),
            timeout: Duration::from_secs(self.config.timeout_secs),
            min_tls_version: self.config.min_tls_version,
            user_agent: self.user_agent.clone(),
            headers,
            body,
        })
    }
}

impl<C> HttpTransport for BlockingTransport<C>
where
    C: Connector + Send,
    C::Session: Send,
{
    fn request(&mut self, method: &str, url: &str, params: &Params) -> Result<RawResponse, RequestError> {
        let method: HttpMethod = method.parse()?;
        self.sink.debug("Request method", &[("method", method.as_str())]);

        let options = self.build_options(method, url, params)?;
        let summary = options.summary();
        let fields = summary.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
        self.sink.debug("Request options set", &fields);

        let sink = &*self.sink;
        let mut guard = SessionGuard::new(&mut self.session, sink);
        let outcome = guard.acquire(&self.connector).and_then(|session| {
            session.configure(&options)?;
            sink.debug("Executing request", &[]);
            session.execute()
        });

        match &outcome {
            Ok(exchange) => {
                sink.debug("Request completed", &[("http_code", &exchange.status.to_string())]);
            },
            Err(fault) => {
                sink.error(
                    "Request error",
                    &[
                        ("errno", &fault.code.to_string()),
                        ("error", &fault.message),
                        ("url", &options.url),
                    ],
                );
            },
        }
        drop(guard);

        match outcome {
            Ok(exchange) => Ok(RawResponse {
                body: exchange.body,
                status: exchange.status,
            }),
            Err(fault) => Err(fault.into_api_connect(options.url).into()),
        }
    }
}

impl<C: Connector> Drop for BlockingTransport<C> {
    fn drop(&mut self) {
        self.close();
    }
}
