//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::method::Method;

/// An incoming HTTP request with its body already collected.
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: String,
        path: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Self {
        Self { method, path, headers, body, params: HashMap::new() }
    }

    /// Builds a request without a connection behind it.
    ///
    /// Useful for driving a [`Router`](crate::Router) in-process:
    ///
    /// ```rust
    /// use todolist::Request;
    /// let req = Request::from_parts("POST", "/todos", br#"{"text":"Buy milk"}"#.to_vec());
    /// assert_eq!(req.path(), "/todos");
    /// ```
    pub fn from_parts(method: &str, path: &str, body: Vec<u8>) -> Self {
        Self::new(method.to_owned(), path.to_owned(), Vec::new(), body)
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The method as a [`Method`], or `None` for tokens outside RFC 9110.
    pub fn typed_method(&self) -> Option<Method> {
        self.method.parse().ok()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/todos/{*rest}`, `req.param("rest")` on `/todos/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(
            "GET".into(),
            "/todos".into(),
            vec![("Content-Type".into(), "application/json".into())],
            Vec::new(),
        );
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn unknown_method_has_no_typed_form() {
        assert_eq!(Request::from_parts("PUT", "/", Vec::new()).typed_method(), Some(Method::Put));
        assert_eq!(Request::from_parts("BREW", "/", Vec::new()).typed_method(), None);
    }
}
