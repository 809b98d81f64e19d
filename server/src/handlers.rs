use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tower_http::set_header::SetResponseHeaderLayer;

pub async fn ping_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Freshly built wasm bundles keep their file names, so nothing is cached.
pub fn no_cache_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_is_empty() {
        let response = ping_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
