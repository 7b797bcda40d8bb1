//! Dispatch pacing for outbound catalog calls.
//!
//! The catalog provider enforces a throughput ceiling, so every outbound
//! call is funneled through a single [`RequestQueue`]: a strictly ordered
//! queue drained by one owning task that spaces successive dispatches by a
//! configured minimum gap. Callers enqueue work and await the result; how
//! many callers are in flight concurrently never changes the dispatch
//! rate.

mod config;
mod queue;

pub use config::QueueConfig;
pub use queue::RequestQueue;
