//! # Data Clients
//!
//! This module implements the per data type clients and the factory they share.
//!
//! A client is bound to one validated configuration (object reference, url, token, timeout).
//! Every accessor call builds its own transport + protocol + stub triple through a
//! [`DataClient`], issues exactly one remote call and drops the triple. Nothing is pooled or
//! reused, so accessor calls are independent and may run concurrently:
//!
//! ```rust,no_run
//! use data_api_core::{Assembly, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let assembly = Assembly::new(
//!     ClientConfig::new()
//!         .object_ref("1779/1054/1")
//!         .url("http://localhost:50051"),
//! )?;
//!
//! let (contigs, gc) = tokio::join!(assembly.number_contigs(), assembly.gc_content());
//!
//! // `None` means the attribute does not apply to this object.
//! println!("{:?} contigs, gc content {:?}", contigs?, gc?);
//! # Ok(())
//! # }
//! ```
//!
//! The clients themselves are generated by the `data_api!` macro from a list of remote
//! methods, see [`taxon`], [`assembly`] and [`genome_annotation`].
pub mod assembly;
pub mod genome_annotation;
pub mod taxon;
mod types;

pub use assembly::{Assembly, AssemblyStub};
pub use genome_annotation::{GenomeAnnotation, GenomeAnnotationStub};
pub use taxon::{Taxon, TaxonStub};
pub use types::*;

use crate::{
    BoxError,
    config::ValidatedConfig,
    error::{ClientError, FaultKind},
    rpc::{
        client::RpcClient,
        transport::{ChannelConnector, Connector},
    },
};
use http_body::Body as HttpBody;
use std::sync::Arc;
use tonic::{client::GrpcService, transport::Channel};

/// Builds the client triples of one data client.
///
/// Cloning is cheap: the configuration and the connector are shared, nothing else is.
pub struct DataClient<S = Channel> {
    config: Arc<ValidatedConfig>,
    connector: Arc<dyn Connector<S> + Send + Sync>,
}

impl<S> Clone for DataClient<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<S> std::fmt::Debug for DataClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DataClient<Channel> {
    /// Creates a factory that connects over the network.
    pub fn connect_lazy(config: ValidatedConfig) -> Self {
        Self::with_connector(config, ChannelConnector)
    }
}

impl<S> DataClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a factory producing its transports with `connector`.
    pub fn with_connector<C>(config: ValidatedConfig, connector: C) -> Self
    where
        C: Connector<S> + Send + Sync + 'static,
    {
        Self {
            config: Arc::new(config),
            connector: Arc::new(connector),
        }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Builds a transport bound to the configured url and timeout, and layers the protocol on
    /// top of it. The caller wraps the result in the stub of its data type.
    ///
    /// # Returns
    ///
    /// * `Ok(RpcClient)` - A protocol client owned by exactly one call.
    /// * `Err(ClientError)` - A failure that already is a [`ClientError`] is returned as is,
    ///   any other failure is wrapped in [`ClientError::TransportConstruction`].
    pub fn build(&self, service: &'static str) -> Result<RpcClient<S>, ClientError> {
        let transport = self
            .connector
            .connect(self.config.url(), self.config.timeout())
            .map_err(construction_error)?;

        tracing::debug!(
            service,
            url = self.config.url(),
            object_ref = %self.config.object_ref(),
            "built rpc client"
        );

        Ok(RpcClient::new(transport, self.config.timeout()))
    }
}

fn construction_error(err: BoxError) -> ClientError {
    match err.downcast::<ClientError>() {
        Ok(err) => *err,
        Err(err) => {
            tracing::warn!(error = %err, "failed to build the rpc client objects");
            ClientError::TransportConstruction(err)
        }
    }
}

/// Turns an attribute-not-applicable fault into `Ok(None)`.
///
/// Every other outcome is passed through unchanged.
pub fn not_applicable_as_none<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ClientError::Remote {
            kind: FaultKind::Attribute,
            fault,
        }) => {
            tracing::debug!(reason = %fault, "attribute not applicable to this object");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Generates the stub and the client of one data type.
///
/// Remote methods are listed mirroring function syntax, followed by the name of the method on
/// the service:
///
/// ```text
/// data_api! {
///     /// The Taxon client.
///     client Taxon;
///     stub TaxonStub;
///     service "taxon.Taxon";
///
///     /// The parent taxon.
///     rpc parent() -> ObjectRef => get_parent;
/// }
/// ```
///
/// The following items are expanded in the enclosing module:
///
/// * the stub (`TaxonStub`), which posts a [`CallEnvelope`](crate::rpc::CallEnvelope) to
///   `/<service>/<remote method>` for each remote method;
/// * the client (`Taxon`), whose accessors build a fresh stub per call and absorb
///   attribute-not-applicable faults with [`not_applicable_as_none`].
macro_rules! data_api {
    (
        $(#[$client_attr:meta])*
        client $client:ident;
        $(#[$stub_attr:meta])*
        stub $stub:ident;
        service $service:literal;
        $(
            $(#[$attr:meta])*
            rpc $fn_name:ident( $( $arg:ident : $in_:ty ),* ) -> $out:ty => $remote:ident;
        )*
    ) => {
        $(#[$stub_attr])*
        pub struct $stub<S = ::tonic::transport::Channel> {
            rpc: $crate::rpc::client::RpcClient<S>,
        }

        impl<S> $stub<S>
        where
            S: ::tonic::client::GrpcService<::tonic::body::Body>,
            S::Error: Into<$crate::BoxError>,
            S::ResponseBody: ::http_body::Body<Data = ::tonic::codegen::Bytes> + Send + 'static,
            <S::ResponseBody as ::http_body::Body>::Error: Into<$crate::BoxError> + Send,
        {
            /// Fully qualified name of the service.
            pub const SERVICE: &'static str = $service;

            pub fn new(rpc: $crate::rpc::client::RpcClient<S>) -> Self {
                Self { rpc }
            }

            $(
                pub async fn $remote(
                    &mut self,
                    token: Option<String>,
                    object_ref: String,
                    $( $arg: $in_, )*
                    as_is: bool,
                ) -> Result<$out, $crate::error::ClientError> {
                    #[derive(::serde::Serialize)]
                    struct Params {
                        $( $arg: $in_, )*
                    }

                    let envelope = $crate::rpc::CallEnvelope {
                        token,
                        object_ref,
                        params: Params { $( $arg, )* },
                        as_is,
                    };

                    self.rpc
                        .unary(concat!("/", $service, "/", stringify!($remote)), envelope)
                        .await
                }
            )*
        }

        $(#[$client_attr])*
        pub struct $client<S = ::tonic::transport::Channel> {
            factory: $crate::client::DataClient<S>,
        }

        impl<S> Clone for $client<S> {
            fn clone(&self) -> Self {
                Self {
                    factory: self.factory.clone(),
                }
            }
        }

        impl<S> ::std::fmt::Debug for $client<S> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($client))
                    .field("factory", &self.factory)
                    .finish()
            }
        }

        impl $client<::tonic::transport::Channel> {
            /// Validates `config` and creates a client talking to the service over the network.
            ///
            /// No connection is made here; each accessor call connects on its own.
            pub fn new(
                config: $crate::config::ClientConfig,
            ) -> Result<Self, $crate::error::ConfigError> {
                Ok(Self::from_config(config.validate()?))
            }

            /// Creates a client from an already validated configuration.
            pub fn from_config(config: $crate::config::ValidatedConfig) -> Self {
                Self {
                    factory: $crate::client::DataClient::connect_lazy(config),
                }
            }
        }

        impl<S> $client<S>
        where
            S: ::tonic::client::GrpcService<::tonic::body::Body>,
            S::Error: Into<$crate::BoxError>,
            S::ResponseBody: ::http_body::Body<Data = ::tonic::codegen::Bytes> + Send + 'static,
            <S::ResponseBody as ::http_body::Body>::Error: Into<$crate::BoxError> + Send,
        {
            /// Creates a client whose transports are produced by `connector`.
            pub fn with_connector<C>(config: $crate::config::ValidatedConfig, connector: C) -> Self
            where
                C: $crate::rpc::transport::Connector<S> + Send + Sync + 'static,
            {
                Self {
                    factory: $crate::client::DataClient::with_connector(config, connector),
                }
            }

            pub fn config(&self) -> &$crate::config::ValidatedConfig {
                self.factory.config()
            }

            /// Builds a fresh stub, owned by a single call.
            pub fn stub(&self) -> Result<$stub<S>, $crate::error::ClientError> {
                self.factory.build($service).map($stub::new)
            }

            $(
                $(#[$attr])*
                pub async fn $fn_name(
                    &self,
                    $( $arg: $in_ ),*
                ) -> Result<Option<$out>, $crate::error::ClientError> {
                    let mut stub = self.stub()?;
                    let config = self.factory.config();

                    let result = stub
                        .$remote(
                            config.token().map(str::to_string),
                            config.object_ref().as_str().to_string(),
                            $( $arg, )*
                            true,
                        )
                        .await;

                    $crate::client::not_applicable_as_none(result)
                }
            )*
        }
    };
}

pub(crate) use data_api;
