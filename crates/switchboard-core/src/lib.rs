//! switchboard-core
//!
//! In-process message dispatch: a typed map from message names to
//! single-argument async handlers. One handler per name, registered once,
//! invoked by name with a typed payload.
//!
//! # Modules
//! - **name**: `MessageName` identifier (handler map key)
//! - **message**: `Message` trait - binds name -> (input, output) at compile time
//! - **handler**: `Handler<M>` trait, closure adapter, type-erased form
//! - **bus**: `Bus` - registration + dispatch
//! - **error**: `BusError`

pub mod bus;
pub mod error;
pub mod handler;
pub mod message;
pub mod name;

// Re-export the main surface at the crate root.
pub use self::bus::Bus;
pub use self::error::BusError;
pub use self::handler::{DynHandler, FnHandler, Handler};
pub use self::message::Message;
pub use self::name::MessageName;
