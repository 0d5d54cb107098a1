//! # todolist
//!
//! An in-memory todo-list service: create, read, update, delete and
//! mark-complete short text items via JSON over HTTP. All state lives in one
//! process-wide collection. No persistence, no authentication.
//!
//! The crate is two layers:
//!
//! - A small HTTP layer: radix-tree routing via [`matchit`], hyper for the
//!   wire (HTTP/1.1 and HTTP/2), graceful shutdown on SIGTERM / Ctrl-C,
//!   per-request tracing.
//! - The [`todo`] service mounted on it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use todolist::todo::{self, IdStrategy, TodoService, TodoStore};
//! use todolist::{Method, Router, Server, health};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = Arc::new(TodoService::new(TodoStore::seeded(IdStrategy::Sequential)));
//!     let app = todo::routes(Router::new(), service)
//!         .on(Method::Get, "/healthz", health::liveness);
//!
//!     Server::bind("0.0.0.0:8080".parse().unwrap()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod middleware;
pub mod todo;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, run};
pub use status::Status;

use std::sync::Arc;

/// The full application: todo routes plus health probes.
pub fn app(service: Arc<todo::TodoService>) -> Router {
    todo::routes(Router::new(), service)
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness)
}
