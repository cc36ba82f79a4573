//! # norsand-telemetry
//!
//! Event bus for batch telemetry. Workers emit structured events (run
//! classified, run failed, batch started/finished) through a cloneable
//! [`EventEmitter`]; the coordinating thread flushes them to pluggable
//! sinks (tracing log, in-memory capture).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{EventBus, EventEmitter};
pub use events::{BatchEvent, EventKind};
pub use sinks::{EventSink, TracingSink, VecSink};
