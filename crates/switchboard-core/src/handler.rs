//! Handler traits: the typed surface and its object-safe erased form.
//!
//! Two layers:
//! - **Typed**: `Handler<M>` - compile-time checked, what users implement
//! - **Erased**: `DynHandler` - object-safe, what the bus stores
//!
//! `ErasedHandler<M, H>` bridges the two via serde_json.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::error::BusError;
use crate::message::Message;
use crate::name::MessageName;

/// A handler for a specific message type.
///
/// Takes the message by value and produces its declared output. Handlers may
/// close over whatever state they need; the bus treats them as opaque.
/// Failures are returned as `BusError` and pass through `execute` unchanged.
#[async_trait]
pub trait Handler<M: Message>: Send + Sync {
    async fn handle(&self, message: M) -> Result<M::Output, BusError>;
}

/// Adapter so plain async functions and closures can act as handlers
/// without a named struct.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<M, F, Fut> Handler<M> for FnHandler<F>
where
    M: Message,
    F: Fn(M) -> Fut + Send + Sync,
    Fut: Future<Output = Result<M::Output, BusError>> + Send,
{
    async fn handle(&self, message: M) -> Result<M::Output, BusError> {
        (self.f)(message).await
    }
}

/// Object-safe erased form of a handler.
///
/// Methods take concrete types only, so `dyn DynHandler` works as a trait
/// object and the bus can hold handlers for unrelated message types in one
/// map.
#[async_trait]
pub trait DynHandler: Send + Sync {
    async fn call(&self, payload: serde_json::Value) -> Result<serde_json::Value, BusError>;
    fn message_name(&self) -> &'static str;
}

/// Bridges a typed `Handler<M>` into a `DynHandler`: decode the payload,
/// invoke the handler, encode the output. Handler failures are not touched.
pub struct ErasedHandler<M: Message, H: Handler<M>> {
    handler: H,
    _marker: PhantomData<M>,
}

impl<M: Message, H: Handler<M>> ErasedHandler<M, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<M: Message, H: Handler<M>> DynHandler for ErasedHandler<M, H> {
    async fn call(&self, payload: serde_json::Value) -> Result<serde_json::Value, BusError> {
        let message: M = serde_json::from_value(payload).map_err(|e| BusError::Decode {
            name: MessageName::new(M::NAME),
            source: e,
        })?;
        let output = self.handler.handle(message).await?;
        serde_json::to_value(&output).map_err(|e| BusError::Encode {
            name: MessageName::new(M::NAME),
            source: e,
        })
    }

    fn message_name(&self) -> &'static str {
        M::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Echo {
        value: i32,
    }

    impl Message for Echo {
        const NAME: &'static str = "test.echo.v1";
        type Output = i32;
    }

    struct EchoHandler;

    #[async_trait]
    impl Handler<Echo> for EchoHandler {
        async fn handle(&self, message: Echo) -> Result<i32, BusError> {
            Ok(message.value)
        }
    }

    async fn double(message: Echo) -> Result<i32, BusError> {
        Ok(message.value * 2)
    }

    #[tokio::test]
    async fn erased_handler_decodes_and_invokes() {
        let erased = ErasedHandler::<Echo, _>::new(EchoHandler);
        let out = erased.call(json!({ "value": 7 })).await.unwrap();
        assert_eq!(out, json!(7));
        assert_eq!(erased.message_name(), "test.echo.v1");
    }

    #[tokio::test]
    async fn erased_handler_reports_decode_failure() {
        let erased = ErasedHandler::<Echo, _>::new(EchoHandler);
        let err = erased.call(json!({ "value": "seven" })).await.unwrap_err();
        assert!(matches!(err, BusError::Decode { .. }));
    }

    #[tokio::test]
    async fn fn_handler_wraps_async_fns() {
        let handler = FnHandler::new(double);
        let out = handler.handle(Echo { value: 21 }).await.unwrap();
        assert_eq!(out, 42);
    }
}
