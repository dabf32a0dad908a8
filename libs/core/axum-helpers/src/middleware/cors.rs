use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Creates a CORS layer restricted to the given origins.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin, method and header.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Parse a comma-separated origin list. `None` means "allow any origin".
pub fn parse_allowed_origins(raw: &str) -> io::Result<Option<Vec<HeaderValue>>> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(None);
    }

    origins
        .into_iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value '{}': {}", origin, e),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()
        .map(Some)
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset, empty or `*` allows every origin; otherwise only the listed ones.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_default();

    match parse_allowed_origins(&raw)? {
        Some(origins) => {
            tracing::info!("CORS configured with allowed origins: {}", raw);
            Ok(create_cors_layer(origins))
        }
        None => {
            tracing::info!("CORS allows any origin");
            Ok(create_permissive_cors_layer())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_list() {
        let origins = parse_allowed_origins("http://localhost:3000, https://example.com,")
            .unwrap()
            .unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_allowed_origins_wildcard_and_empty() {
        assert!(parse_allowed_origins("*").unwrap().is_none());
        assert!(parse_allowed_origins("  ").unwrap().is_none());
    }

    #[test]
    fn test_parse_allowed_origins_rejects_garbage() {
        assert!(parse_allowed_origins("http://ok.com,bad\nvalue").is_err());
    }

    #[test]
    fn test_cors_layer_from_env_unset_is_permissive() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(cors_layer_from_env().is_ok());
        });
    }
}
