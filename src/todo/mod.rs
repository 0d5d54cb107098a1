//! The todo service: one shared, ordered collection of [`Todo`] records and
//! six operations over it.
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/todos` | list |
//! | POST | `/todos` | create |
//! | GET | `/todos/{id}` | get one |
//! | PUT | `/todos/{id}` | update text |
//! | DELETE | `/todos/{id}` | delete |
//! | PATCH | `/todos/done/{id}` | mark done |
//!
//! [`routes`] mounts the service on a [`Router`](crate::Router); [`Route`]
//! resolves method and path to an operation; [`TodoStore`] owns the records.

mod model;
mod route;
mod service;
mod store;

pub use model::{Todo, TodoPayload};
pub use route::Route;
pub use service::{TodoService, routes};
pub use store::{IdStrategy, TodoStore};
