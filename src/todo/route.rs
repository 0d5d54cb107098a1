//! Method + path → operation.

use crate::method::Method;

/// The operation a request resolves to, decided once per request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    List,
    Create,
    GetOne(i64),
    UpdateText(i64),
    Delete(i64),
    MarkDone(i64),
    MethodNotAllowed,
    /// The id segment is not a decimal integer. Carries the client-facing message.
    BadRequest(&'static str),
    /// The path is outside `/todos`.
    Unrouted,
}

impl Route {
    /// Resolves a request. Rules apply in order:
    ///
    /// 1. `/todos` exactly: `GET` lists, `POST` creates.
    /// 2. `/todos/done/{id}`: `PATCH` marks done. The method is checked
    ///    before the id.
    /// 3. `/todos/{id}`: the id is parsed first, then `GET`, `PUT` and
    ///    `DELETE` pick the operation.
    ///
    /// Any other method on a matched shape is [`Route::MethodNotAllowed`].
    pub fn resolve(method: Option<Method>, path: &str) -> Self {
        if path == "/todos" {
            return match method {
                Some(Method::Get) => Self::List,
                Some(Method::Post) => Self::Create,
                _ => Self::MethodNotAllowed,
            };
        }

        if let Some(rest) = path.strip_prefix("/todos/done/") {
            if method != Some(Method::Patch) {
                return Self::MethodNotAllowed;
            }
            return match parse_id(rest) {
                Some(id) => Self::MarkDone(id),
                None => Self::BadRequest("Invalid Id"),
            };
        }

        let Some(rest) = path.strip_prefix("/todos/") else {
            return Self::Unrouted;
        };
        let Some(id) = parse_id(rest) else {
            return Self::BadRequest("Invalid id");
        };
        match method {
            Some(Method::Get) => Self::GetOne(id),
            Some(Method::Put) => Self::UpdateText(id),
            Some(Method::Delete) => Self::Delete(id),
            _ => Self::MethodNotAllowed,
        }
    }
}

/// Decimal integer with an optional sign. Nothing else: no whitespace, no
/// further `/` segments.
fn parse_id(segment: &str) -> Option<i64> {
    segment.parse().ok()
}
