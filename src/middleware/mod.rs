//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every request on its way through the
//! [`Router`](crate::Router). The server applies them in
//! this order, outermost first:
//!
//! - [`trace`] — per-request span with method, path, status, latency

pub mod trace;

pub use trace::trace;
