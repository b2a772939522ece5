//! Request timeout middleware
//!
//! A handler that outlives the limit is dropped and the caller gets the
//! standard failure envelope with status 408.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;
use crate::observability::{log_event, Event};

pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            log_event(
                Event::RequestTimedOut,
                &[("method", &method), ("path", &path)],
            );
            ApiError::Timeout(limit).into_response()
        }
    }
}
