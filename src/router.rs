//! Radix-tree request router.
//!
//! Paths are matched first, methods second. A path pattern owns one endpoint;
//! the endpoint holds a handler per method and, optionally, a handler that
//! takes every method the per-method table does not claim. No match on the
//! path is a `404`; a path match with no handler for the method is a `405`.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

#[derive(Default)]
struct Endpoint {
    by_method: HashMap<Method, BoxedHandler>,
    any: Option<BoxedHandler>,
}

impl Endpoint {
    fn select(&self, method: Option<Method>) -> Option<&BoxedHandler> {
        method
            .and_then(|m| self.by_method.get(&m))
            .or(self.any.as_ref())
    }

    fn allowed(&self) -> String {
        let mut methods: Vec<&str> = self.by_method.keys().map(|m| m.as_str()).collect();
        methods.sort_unstable();
        methods.join(", ")
    }
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Registration calls return `self` so they chain naturally.
pub struct Router {
    tree: MatchitRouter<usize>,
    patterns: HashMap<String, usize>,
    endpoints: Vec<Endpoint>,
}

/// Outcome of matching one request against the tree.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed(String),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { tree: MatchitRouter::new(), patterns: HashMap::new(), endpoints: Vec::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax, catch-alls `{*name}`:
    ///
    /// ```rust
    /// # use todolist::{Method, Request, Response, Router};
    /// # async fn liveness(_: Request) -> Response { Response::text("ok") }
    /// Router::new().on(Method::Get, "/healthz", liveness);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern or conflicts with one already
    /// registered. Routes are static configuration; a bad one is a bug.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let endpoint = self.endpoint(path);
        endpoint.by_method.insert(method, handler.into_boxed_handler());
        self
    }

    /// Register a handler for every method not claimed by [`Router::on`] on
    /// the same path, including tokens outside RFC 9110.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Router::on`].
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        let endpoint = self.endpoint(path);
        endpoint.any = Some(handler.into_boxed_handler());
        self
    }

    fn endpoint(&mut self, path: &str) -> &mut Endpoint {
        let idx = match self.patterns.get(path) {
            Some(&idx) => idx,
            None => {
                let idx = self.endpoints.len();
                self.tree
                    .insert(path, idx)
                    .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
                self.patterns.insert(path.to_owned(), idx);
                self.endpoints.push(Endpoint::default());
                idx
            }
        };
        &mut self.endpoints[idx]
    }

    pub(crate) fn lookup(&self, method: Option<Method>, path: &str) -> Lookup {
        let Ok(matched) = self.tree.at(path) else {
            return Lookup::NotFound;
        };
        let endpoint = &self.endpoints[*matched.value];
        match endpoint.select(method) {
            Some(handler) => {
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                Lookup::Found(Arc::clone(handler), params)
            }
            None => Lookup::MethodNotAllowed(endpoint.allowed()),
        }
    }

    /// Routes one request and produces one response, without any I/O.
    ///
    /// The server calls this for every request; tests can call it directly.
    pub async fn respond(&self, req: Request) -> Response {
        match self.lookup(req.typed_method(), req.path()) {
            Lookup::Found(handler, params) => handler.call(req.with_params(params)).await,
            Lookup::MethodNotAllowed(allow) => {
                debug!(method = req.method(), path = req.path(), "no handler for method");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
