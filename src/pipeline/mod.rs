//! Live transformation pipeline.
//!
//! ```text
//! edit → Debouncer → Invoker (+ TransformWorker) → OutputState → consumers
//! ```
//!
//! - [`debounce`] - trailing-edge quiescence timer
//! - [`invoker`] - request ids and the apply-only-if-newest guard
//! - [`snapshot`] - the atomically replaced, generation-counted output triple
//! - [`worker`] - optional background thread for the transform

pub mod debounce;
pub mod invoker;
pub mod snapshot;
pub mod worker;

pub use debounce::Debouncer;
pub use invoker::{Delivery, Invoker, RequestId};
pub use snapshot::OutputState;
pub use worker::{SharedTransform, TransformWorker};
