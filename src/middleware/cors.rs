use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{Error, Result};

/// CORS for the browser console. Without a configured origin every origin
/// is allowed.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let Some(origin) = allowed_origin else {
        return Ok(CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any));
    };

    let origin = HeaderValue::from_str(origin)
        .map_err(|e| Error::Config(format!("Invalid CORS_ALLOWED_ORIGIN: {}", e)))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_origin_with_control_characters() {
        assert!(matches!(cors_layer(Some("http://a\nb")), Err(Error::Config(_))));
        assert!(cors_layer(Some("http://localhost:5173")).is_ok());
        assert!(cors_layer(None).is_ok());
    }
}
