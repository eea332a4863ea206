//! Bus: the name -> handler registry and its dispatch path.
//!
//! Design:
//! - One handler per name, registered once. Registration is additive only;
//!   there is no removal, update, or replace.
//! - The map is per-instance state. Two buses share nothing, so tests can
//!   construct fresh, isolated instances.
//! - `execute` clones the handler `Arc` out of the map before invoking, so
//!   no lock is held while a handler runs and concurrent executions do not
//!   serialize each other.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::error::BusError;
use crate::handler::{DynHandler, ErasedHandler, FnHandler, Handler};
use crate::message::Message;
use crate::name::MessageName;

/// Registry of message handlers plus the dispatch path over them.
pub struct Bus {
    handlers: DashMap<MessageName, Arc<dyn DynHandler>>,
}

impl Bus {
    /// An empty bus. Nothing is registered, every `execute` fails with
    /// `HandlerNotFound` until `handle` is called.
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register `handler` under `M::NAME`.
    ///
    /// Fails with `BusError::DuplicateHandler` when the name is already
    /// taken; the existing handler stays bound and the new one is dropped.
    /// Returns `&Self` so registrations chain:
    /// `bus.handle::<A, _>(ha)?.handle::<B, _>(hb)?`.
    pub fn handle<M, H>(&self, handler: H) -> Result<&Self, BusError>
    where
        M: Message,
        H: Handler<M> + 'static,
    {
        let name = MessageName::new(M::NAME);
        // The entry API keeps check-then-insert atomic: when two
        // registrations race for one name, exactly one wins.
        match self.handlers.entry(name.clone()) {
            Entry::Occupied(_) => Err(BusError::DuplicateHandler(name)),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(ErasedHandler::new(handler)));
                debug!(%name, "registered handler");
                Ok(self)
            }
        }
    }

    /// Register a plain async function or closure under `M::NAME`.
    ///
    /// Convenience over [`Bus::handle`]; same duplicate semantics.
    pub fn handle_fn<M, F, Fut>(&self, f: F) -> Result<&Self, BusError>
    where
        M: Message,
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M::Output, BusError>> + Send,
    {
        self.handle::<M, _>(FnHandler::new(f))
    }

    /// Execute the handler registered for `M::NAME` with `message`.
    ///
    /// The result always arrives through this await point, whether the
    /// handler computed it synchronously or not. Handler failures propagate
    /// unchanged; the bus neither catches nor wraps them.
    pub async fn execute<M: Message>(&self, message: M) -> Result<M::Output, BusError> {
        let payload = serde_json::to_value(&message).map_err(|e| BusError::Encode {
            name: MessageName::new(M::NAME),
            source: e,
        })?;
        let value = self.execute_value(M::NAME, payload).await?;
        serde_json::from_value(value).map_err(|e| BusError::Decode {
            name: MessageName::new(M::NAME),
            source: e,
        })
    }

    /// Dynamic dispatch surface: execute by name with a JSON payload.
    ///
    /// Fails with `BusError::HandlerNotFound` before any handler runs when
    /// the name is unregistered. The payload shape is the handler's concern,
    /// not the bus's.
    pub async fn execute_value(
        &self,
        name: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BusError> {
        let handler = self
            .handlers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| BusError::HandlerNotFound(MessageName::new(name)))?;

        debug!(name, "dispatching message");
        handler.call(payload).await
    }

    /// Whether a handler is bound to `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Names with a registered handler, in no particular order.
    pub fn registered_names(&self) -> Vec<MessageName> {
        self.handlers.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
