use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_NUMBER: AtomicU64 = AtomicU64::new(0);

pub async fn log_request_response(request: Request, next: Next) -> Response {
    let request_number = REQUEST_NUMBER.fetch_add(1, Ordering::SeqCst);

    tracing::debug!("<{request_number} {} {}", request.method(), request.uri());
    let response = next.run(request).await;
    tracing::debug!(">{request_number} {}", response.status());

    response
}
