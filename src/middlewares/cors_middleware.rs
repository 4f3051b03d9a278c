use axum::{extract::Request, http::{header, HeaderValue, Method}, middleware::Next, response::Response};
use tower_http::cors::{Any, CorsLayer};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Any origin, the CRUD verbs, and the two request headers the frontend sends.
/// Every OPTIONS request is answered here with an empty 200 and never reaches a handler.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// `CorsLayer` only sends the allowed verbs and headers on preflight; this puts
/// them on every other response as well.
pub async fn allow_headers_on_every_response(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_METHODS)
        .or_insert(HeaderValue::from_static(ALLOWED_METHODS));
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static(ALLOWED_HEADERS));
    response
}
