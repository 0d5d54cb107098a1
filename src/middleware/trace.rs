//! Per-request tracing.
//!
//! Each request runs inside an `info` span carrying `method` and `path`, so
//! anything logged by a handler (store mutations, decode failures) is
//! attributed to the request that caused it. On completion one event records
//! the status and latency. Client errors stay at `info`; only 5xx is `warn`.

use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Routes `req` through `router` inside a request span.
pub async fn trace(router: &Router, req: Request) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.path());

    async move {
        let started = Instant::now();
        let res = router.respond(req).await;
        let status = res.status_code();
        let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;

        if status >= 500 {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    async fn teapot(_req: Request) -> Response { Response::text("short and stout") }

    #[tokio::test]
    async fn passes_the_response_through_untouched() {
        let router = Router::new().on(Method::Get, "/pot", teapot);
        let res = trace(&router, Request::from_parts("GET", "/pot", Vec::new())).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"short and stout");
    }
}
