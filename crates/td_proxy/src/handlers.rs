use std::sync::Arc;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use crate::ProxyState;

pub async fn forward(State(state): State<Arc<ProxyState>>, uri: Uri) -> Response {
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or_else(|| uri.path());
    let Some(target) = state.forward_url(path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    info!("Proxy: {} → {}", path, target);

    let upstream = match state.client.get(&target).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Proxy request to {} failed: {}", target, err);
            return (StatusCode::BAD_GATEWAY, format!("Backend unreachable: {}", err)).into_response();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| HeaderValue::from_str(v).ok());

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(err) => {
            warn!("Proxy failed reading body from {}: {}", target, err);
            return (StatusCode::BAD_GATEWAY, format!("Backend body error: {}", err)).into_response();
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    response
}
