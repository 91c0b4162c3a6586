//! # JSON Codec
//!
//! This module implements `tonic::codec::Codec` so `tonic` can transport any `serde` value
//! as a JSON document, without generated Protobuf structs.
//!
//! ## How it works
//!
//! 1. **Encoder**: Serializes the outgoing value with `serde_json` straight into the gRPC
//!    frame buffer.
//! 2. **Decoder**: Reads the whole frame and deserializes it into the expected type.
//!
//! The same codec is used on both sides: a client uses `JsonCodec<Request, Response>`, a
//! service hosting the same methods uses `JsonCodec<Response, Request>`.
use bytes::{Buf, BufMut};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tonic::{
    Status,
    codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
};

/// A Codec that bridges `serde` types and JSON encoded frames.
///
/// `E` is the type written to the wire, `D` the type read from it.
pub struct JsonCodec<E, D> {
    _marker: PhantomData<fn(E) -> D>,
}

impl<E, D> JsonCodec<E, D> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E, D> Default for JsonCodec<E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, D> Codec for JsonCodec<E, D>
where
    E: Serialize + Send + 'static,
    D: DeserializeOwned + Send + 'static,
{
    type Encode = E;
    type Decode = D;

    type Encoder = JsonEncoder<E>;
    type Decoder = JsonDecoder<D>;

    fn encoder(&mut self) -> Self::Encoder {
        JsonEncoder(PhantomData)
    }

    fn decoder(&mut self) -> Self::Decoder {
        JsonDecoder(PhantomData)
    }
}

/// Responsible for encoding a value into JSON bytes.
pub struct JsonEncoder<T>(PhantomData<fn(T)>);

impl<T: Serialize> Encoder for JsonEncoder<T> {
    type Item = T;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        serde_json::to_writer(dst.writer(), &item)
            .map_err(|e| Status::internal(format!("Failed to encode message as JSON: {e}")))
    }
}

/// Responsible for decoding JSON bytes into a value.
pub struct JsonDecoder<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> Decoder for JsonDecoder<T> {
    type Item = T;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let bytes = src.copy_to_bytes(src.remaining());

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            Status::internal(format!("Message does not match the expected shape: {e}"))
        })?;

        Ok(Some(value))
    }
}
