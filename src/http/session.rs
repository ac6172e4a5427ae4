//! Session handle abstraction.
//!
//! A [`Connector`] stands for the HTTP capability of the host and hands out
//! [`Session`]s. A session is a stateful handle that is configured with one
//! [`RequestOptions`] bundle, executes exactly one exchange and can then be
//! reset for the next call or closed.
//!
//! [`SessionGuard`] ties an open session to a scope: whatever way the scope
//! is left, the slot it guards is emptied and the session closed.

use super::error::{ExchangeFault, StartupError};
use super::types::{LibraryInfo, RequestOptions};
use crate::log::LogSink;

/// Status code and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub status: u16,
    pub body: String,
}

pub trait Session {
    /// Drops every option applied by a previous [`configure`](Session::configure).
    fn reset(&mut self);

    /// Applies the option bundle for the next exchange.
    fn configure(&mut self, options: &RequestOptions) -> Result<(), ExchangeFault>;

    /// Runs the configured exchange, blocking until it completes or times out.
    fn execute(&mut self) -> Result<Exchange, ExchangeFault>;

    /// Releases the handle.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

pub trait Connector {
    type Session: Session;

    /// Oldest library version this connector is willing to run on.
    const MIN_VERSION: &'static str;

    /// Identifies the underlying HTTP library, failing when it cannot be used.
    fn library(&self) -> Result<LibraryInfo, StartupError>;

    fn open(&self) -> Result<Self::Session, ExchangeFault>;
}

/// Keeps a session slot open for the duration of one call.
pub(crate) struct SessionGuard<'a, S: Session> {
    slot: &'a mut Option<S>,
    sink: &'a dyn LogSink,
}

impl<'a, S: Session> SessionGuard<'a, S> {
    pub fn new(slot: &'a mut Option<S>, sink: &'a dyn LogSink) -> Self {
        Self { slot, sink }
    }

    /// Resets the session already in the slot, or opens a new one.
    pub fn acquire<C>(&mut self, connector: &C) -> Result<&mut S, ExchangeFault>
    where
        C: Connector<Session = S>,
    {
        let session = match self.slot.take() {
            Some(mut session) => {
                self.sink.debug("Resetting session handle", &[]);
                session.reset();
                session
            },
            None => {
                self.sink.debug("Opening session handle", &[]);
                connector.open()?
            },
        };
        Ok(self.slot.insert(session))
    }
}

impl<S: Session> Drop for SessionGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(session) = self.slot.take() {
            self.sink.debug("Closing session handle", &[]);
            session.close();
        }
    }
}
