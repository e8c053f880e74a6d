use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::{BodyExt, Limited};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Only bodies whose size is known to fit under this are buffered and
/// logged; anything else streams through untouched.
const MAX_LOGGED_BODY: usize = 1024;

/// Wrap each request in a span keyed by a trace id. A valid incoming
/// `x-trace-id` is reused, otherwise a new one is minted; either way it is
/// echoed on the response.
pub async fn trace_middleware(req: Request, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::now_v7);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::try_from(trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let body = buffer_and_log("request", &parts.headers, body).await;
        let mut req = Request::from_parts(parts, body);
        if let Some(value) = &header_value {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();
        let body = buffer_and_log("response", &parts.headers, body).await;
        let mut response = Response::from_parts(parts, body);
        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

async fn buffer_and_log(direction: &str, headers: &HeaderMap, body: Body) -> Body {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let hint = body.size_hint();
    let fits = hint
        .upper()
        .is_some_and(|upper| usize::try_from(upper).is_ok_and(|n| n <= MAX_LOGGED_BODY));
    if !fits {
        debug!(
            "{direction} body: [streamed: type={content_type}, size>={}]",
            hint.lower()
        );
        return body;
    }

    let bytes = match Limited::new(body, MAX_LOGGED_BODY).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("failed to buffer {direction} body: {e}");
            return Body::empty();
        }
    };

    if content_type.contains("application/json") {
        if let Ok(text) = std::str::from_utf8(&bytes) {
            debug!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        debug!(
            "{direction} body: [skipped: type={content_type}, size={}]",
            bytes.len()
        );
    }
    Body::from(bytes)
}
