//! # Generic RPC Client
//!
//! This module wraps a standard `tonic` client to provide a generic unary call interface.
//! It is agnostic to the data service being called; the stubs in [`crate::client`] decide the
//! path and the request and response types.
//!
//! ## Features
//!
//! * **Static Pathing**: Calls are addressed as `/service/method` paths known at compile time.
//! * **Per call timeout**: Every call, including waiting for the transport to become ready, is
//!   bounded by the client timeout. The timeout is also forwarded to the service as the
//!   `grpc-timeout` header.
//! * **Fault decoding**: Error statuses are decoded into [`ClientError`] with
//!   [`super::fault::fault_from_status`].
use super::codec::JsonCodec;
use super::fault::fault_from_status;
use crate::{BoxError, error::ClientError};
use http::uri::PathAndQuery;
use http_body::Body as HttpBody;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tonic::{client::GrpcService, transport::Channel};

/// A unary client over any `tonic` service.
pub struct RpcClient<S = Channel> {
    client: tonic::client::Grpc<S>,
    timeout: Duration,
}

impl<S> RpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S, timeout: Duration) -> Self {
        let client = tonic::client::Grpc::new(service);
        Self { client, timeout }
    }

    /// Performs a unary call (Single Request -> Single Response).
    ///
    /// # Returns
    ///
    /// * `Ok(Res)` - The service answered with a value.
    /// * `Err(ClientError::Remote)` - The service answered with a fault.
    /// * `Err(ClientError)` - The call could not be completed (transport not ready, timeout,
    ///   status without a fault).
    pub async fn unary<Req, Res>(
        &mut self,
        path: &'static str,
        payload: Req,
    ) -> Result<Res, ClientError>
    where
        Req: Serialize + Send + Sync + 'static,
        Res: DeserializeOwned + Send + Sync + 'static,
    {
        let timeout = self.timeout;

        tokio::time::timeout(timeout, self.call(path, payload))
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
    }

    async fn call<Req, Res>(&mut self, path: &'static str, payload: Req) -> Result<Res, ClientError>
    where
        Req: Serialize + Send + Sync + 'static,
        Res: DeserializeOwned + Send + Sync + 'static,
    {
        self.client
            .ready()
            .await
            .map_err(|e| ClientError::NotReady(e.into()))?;

        let codec = JsonCodec::<Req, Res>::new();
        let mut request = tonic::Request::new(payload);
        request.set_timeout(self.timeout);

        tracing::debug!(path, "issuing remote call");

        match self
            .client
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
        {
            Ok(response) => Ok(response.into_inner()),
            Err(status) => Err(fault_from_status(status)),
        }
    }
}
