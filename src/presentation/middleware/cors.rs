use axum::http::{HeaderValue, Method, header};
use std::env;
use tower_http::cors::{Any, CorsLayer};

/// CORS for the frontend.
///
/// With `CORS_ALLOWED_ORIGINS` unset (or `*`) any origin may call the API but
/// browsers will not send cookies. Listing origins explicitly enables
/// credentials so the token cookies travel cross-origin.
pub fn cors_layer() -> anyhow::Result<CorsLayer> {
    let allowed_origins = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    build_cors_layer(&allowed_origins)
}

pub fn build_cors_layer(allowed_origins: &str) -> anyhow::Result<CorsLayer> {
    let allowed_origins = allowed_origins.trim();

    if allowed_origins.is_empty() || allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim().parse())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_origins() {
        assert!(build_cors_layer("").is_ok());
        assert!(build_cors_layer("*").is_ok());
    }

    #[test]
    fn test_explicit_origins() {
        assert!(build_cors_layer("http://localhost:5173, https://trips.example.com").is_ok());
    }

    #[test]
    fn test_invalid_origin() {
        assert!(build_cors_layer("http://ok.example.com,bad\norigin").is_err());
    }
}
