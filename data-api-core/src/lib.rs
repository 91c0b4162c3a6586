//! # Data API Core
//!
//! `data-api-core` provides typed, async clients for three genomic data services:
//! **Taxon**, **Assembly** and **GenomeAnnotation**. Each client is bound to one stored
//! object (its *object reference*) and exposes one accessor per remote attribute.
//!
//! ## Key Components
//!
//! * **[`config`]:** The raw [`ClientConfig`] callers fill in and the [`validate`] function
//!   that turns it into an immutable [`ValidatedConfig`].
//! * **[`error`]:** The [`ClientError`] taxonomy. Configuration errors, client construction
//!   errors, remote faults and transport failures all live in a single enum so callers can
//!   match on them exhaustively.
//! * **[`client`]:** The per data type clients ([`Taxon`], [`Assembly`], [`GenomeAnnotation`]).
//!   Every accessor call builds a fresh transport + protocol + stub triple, issues exactly one
//!   remote call and discards the triple.
//!
//! ## Internal clients
//!
//! The RPC plumbing is exposed under [`rpc`] for callers that need to talk to the services
//! directly or to host a compatible service:
//!
//! * **[`rpc::client::RpcClient`]:** A generic unary client over any `tonic` service.
//! * **[`rpc::codec::JsonCodec`]:** A `tonic::codec::Codec` that moves `serde` values as JSON.
//! * **[`rpc::fault`]:** The encoding of remote faults into (and out of) `tonic::Status`.
//! * **[`rpc::transport`]:** The [`Connector`](rpc::transport::Connector) seam that produces
//!   a transport for a url and timeout.
//!
//! ## Attribute not applicable
//!
//! A remote `AttributeException` means "this attribute has no value for this object". The
//! accessors turn it into `Ok(None)`. Every other fault is returned as an error, unchanged.
//!
//! ## Re-exports
//!
//! This crate re-exports `tonic` to ensure that consumers use a compatible version
//! when they provide their own transport.
pub mod client;
pub mod config;
pub mod error;
pub mod rpc;

pub use client::{Assembly, GenomeAnnotation, Taxon};
pub use config::{
    ClientConfig, DEFAULT_TIMEOUT, EmptyObjectRef, MAX_TIMEOUT, ObjectRef, ValidatedConfig, validate,
};
pub use error::{ClientError, ConfigError, ErrorKind, FAULT_KINDS, FaultKind, RemoteFault};

// Re-exports
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
