//! # Transport Construction
//!
//! A [`Connector`] produces the transport one call travels over. The default,
//! [`ChannelConnector`], builds a lazily connected `tonic` [`Channel`]: constructing it performs
//! no I/O, the connection is only attempted when the call is issued.
//!
//! Any closure `Fn(&str, Duration) -> Result<S, BoxError>` is also a connector, which is how an
//! in-process service can stand in for the network.
use crate::BoxError;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

/// Produces a fresh transport bound to a service url and a call timeout.
pub trait Connector<S> {
    fn connect(&self, url: &str, timeout: Duration) -> Result<S, BoxError>;
}

impl<S, F> Connector<S> for F
where
    F: Fn(&str, Duration) -> Result<S, BoxError>,
{
    fn connect(&self, url: &str, timeout: Duration) -> Result<S, BoxError> {
        self(url, timeout)
    }
}

/// Connects to the service over HTTP/2 with a `tonic` [`Channel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelConnector;

impl Connector<Channel> for ChannelConnector {
    /// # Errors
    ///
    /// Fails if `url` is not a valid URI. Must be called from within a Tokio runtime.
    fn connect(&self, url: &str, timeout: Duration) -> Result<Channel, BoxError> {
        let endpoint = Endpoint::from_shared(url.to_string())?
            .timeout(timeout)
            .connect_timeout(timeout);

        Ok(endpoint.connect_lazy())
    }
}
