//! Endpoint URL parsing.

use url::Url;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EndpointError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a configured endpoint.
///
/// Surrounding whitespace is ignored, the scheme must be `http` or `https`
/// and any fragment is dropped. The query string is kept as written.
pub fn parse_endpoint(input: &str) -> Result<Url, EndpointError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(EndpointError::Empty);
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| EndpointError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(EndpointError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);

    Ok(parsed)
}
