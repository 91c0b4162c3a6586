//! # RPC Runtime
//!
//! This module contains the low-level building blocks the data clients are made of.
//!
//! A remote call needs three pieces, built in this order:
//!
//! 1. A **transport** bound to the service url and the call timeout, produced by a
//!    [`transport::Connector`].
//! 2. A **protocol** layered on that transport: [`client::RpcClient`], which serializes every
//!    call with [`codec::JsonCodec`].
//! 3. A **stub** for one data type (see [`crate::client`]), which knows the service name and
//!    the shape of each remote method.
//!
//! Remote faults travel as `tonic::Status` values; [`fault`] converts between the two.
pub mod client;
pub mod codec;
pub mod fault;
pub mod transport;

use serde::{Deserialize, Serialize};

/// The body of every data service call.
///
/// All remote methods take the caller's token and the object reference first, then their own
/// parameters, and finally the `as_is` flag asking the service to return the stored value
/// without transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEnvelope<P> {
    pub token: Option<String>,
    #[serde(rename = "ref")]
    pub object_ref: String,
    pub params: P,
    pub as_is: bool,
}
