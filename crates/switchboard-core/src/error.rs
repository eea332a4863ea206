use thiserror::Error;

use crate::name::MessageName;

/// Errors surfaced by the bus.
///
/// Two come from the bus itself (`HandlerNotFound`, `DuplicateHandler`);
/// `Decode`/`Encode` come from the type-erasure codec; `Handler` carries a
/// handler-internal failure, which the bus propagates without wrapping.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("handler not found for message={0}")]
    HandlerNotFound(MessageName),

    #[error("duplicate handler for message={0}")]
    DuplicateHandler(MessageName),

    #[error("payload decode failed for message={name}")]
    Decode {
        name: MessageName,
        #[source]
        source: serde_json::Error,
    },

    #[error("output encode failed for message={name}")]
    Encode {
        name: MessageName,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Handler(String),
}

impl BusError {
    /// Handler-internal failure. Reaches the caller of `execute` as-is.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}
