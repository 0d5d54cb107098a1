//! Operations over the shared store and the JSON envelopes they answer with.
//!
//! Every body has the shape `{"message": ..., "data": ...}`, with `data`
//! omitted on errors. One `RwLock` guards the store: reads share it, each
//! mutation holds it exclusively for the whole operation.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Todo, TodoPayload};
use super::route::Route;
use super::store::TodoStore;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn reply<T: Serialize>(status: Status, message: &str, data: T) -> Response {
    Json(status, Envelope { message, data: Some(data) }).into_response()
}

fn fail(status: Status, message: &str) -> Response {
    Json(status, Envelope::<()> { message, data: None }).into_response()
}

/// The todo service. Share it behind an `Arc`.
pub struct TodoService {
    store: RwLock<TodoStore>,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self { store: RwLock::new(store) }
    }

    /// Copy of the current collection, in order.
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.store.read().await.todos().to_vec()
    }

    /// Resolves and runs one request.
    pub async fn handle(&self, req: Request) -> Response {
        let route = Route::resolve(req.typed_method(), req.path());
        debug!(?route, "route resolved");

        match route {
            Route::List => self.list().await,
            Route::Create => self.create(req.body()).await,
            Route::GetOne(id) => self.get_one(id).await,
            Route::UpdateText(id) => self.update_text(id, req.body()).await,
            Route::Delete(id) => self.delete(id).await,
            Route::MarkDone(id) => self.mark_done(id).await,
            Route::MethodNotAllowed => fail(Status::MethodNotAllowed, "Method not allowed"),
            Route::BadRequest(message) => fail(Status::BadRequest, message),
            Route::Unrouted => fail(Status::NotFound, "Not found"),
        }
    }

    async fn list(&self) -> Response {
        let store = self.store.read().await;
        reply(Status::Ok, "Success Get Record", store.todos())
    }

    /// Answers with the whole collection, not just the new record.
    async fn create(&self, body: &[u8]) -> Response {
        let payload = match TodoPayload::decode(body) {
            Ok(p) => p,
            Err(e) => {
                debug!("create body rejected: {e}");
                return fail(Status::BadRequest, "Invalid JSON");
            }
        };

        let mut store = self.store.write().await;
        store.create(payload);
        reply(Status::Created, "Created Succesfully", store.todos())
    }

    async fn get_one(&self, id: i64) -> Response {
        let store = self.store.read().await;
        match store.get(id) {
            Some(todo) => reply(Status::Ok, "Success retrieved", todo),
            None => fail(Status::NotFound, "Record Not found"),
        }
    }

    /// Only `text` from the body is applied.
    async fn update_text(&self, id: i64, body: &[u8]) -> Response {
        let payload = match TodoPayload::decode(body) {
            Ok(p) => p,
            Err(e) => {
                debug!(id, "update body rejected: {e}");
                return fail(Status::BadRequest, "Json is invalid");
            }
        };

        let mut store = self.store.write().await;
        match store.update_text(id, payload.text) {
            Some(todo) => reply(Status::Ok, "Record Updated", todo),
            None => fail(Status::NotFound, "Record Not found"),
        }
    }

    /// `204` carries no body on the wire, so success is headers only.
    async fn delete(&self, id: i64) -> Response {
        if self.store.write().await.delete(id) {
            Response::builder()
                .status(Status::NoContent)
                .header("content-type", "application/json")
                .no_body()
        } else {
            fail(Status::NotFound, "Todo Not Found")
        }
    }

    /// `data` is the literal `1`, not the record; existing clients read it that way.
    async fn mark_done(&self, id: i64) -> Response {
        if self.store.write().await.mark_done(id) {
            reply(Status::Ok, "Record Updated", 1)
        } else {
            fail(Status::NotFound, "Record not found")
        }
    }
}

/// Mounts `service` on `router` for every method under `/todos`.
pub fn routes(router: Router, service: Arc<TodoService>) -> Router {
    let handler = move |req: Request| {
        let service = Arc::clone(&service);
        async move { service.handle(req).await }
    };

    router
        .any("/todos", handler.clone())
        .any("/todos/", handler.clone())
        .any("/todos/{*rest}", handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::IdStrategy;

    fn service() -> TodoService {
        TodoService::new(TodoStore::seeded(IdStrategy::Sequential))
    }

    fn body(res: &Response) -> serde_json::Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn error_envelopes_have_no_data_field() {
        let res = service().handle(Request::from_parts("GET", "/todos/9", Vec::new())).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(body(&res), serde_json::json!({ "message": "Record Not found" }));
    }

    #[tokio::test]
    async fn every_envelope_is_json() {
        let svc = service();
        for (method, path) in [("GET", "/todos"), ("GET", "/todos/x"), ("TRACE", "/todos"), ("DELETE", "/todos/1")] {
            let res = svc.handle(Request::from_parts(method, path, Vec::new())).await;
            assert_eq!(res.header("content-type"), Some("application/json"), "{method} {path}");
        }
    }

    #[tokio::test]
    async fn rejected_create_leaves_the_store_alone() {
        let svc = service();
        let res = svc.handle(Request::from_parts("POST", "/todos", b"{oops".to_vec())).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(body(&res)["message"], "Invalid JSON");
        assert_eq!(svc.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn bad_update_body_is_reported_before_missing_record() {
        let res = service().handle(Request::from_parts("PUT", "/todos/99", b"nope".to_vec())).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(body(&res)["message"], "Json is invalid");
    }

    #[tokio::test]
    async fn mark_done_answers_with_literal_one() {
        let svc = service();
        let res = svc.handle(Request::from_parts("PATCH", "/todos/done/1", Vec::new())).await;
        assert_eq!(body(&res), serde_json::json!({ "message": "Record Updated", "data": 1 }));
        assert!(svc.snapshot().await[0].done);
    }
}
