//! Remote locations of the RFC index and per-document HTML.

use url::Url;

/// Error type for endpoint construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse an http(s) URL, trimming surrounding whitespace.
pub fn parse_http(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Where the catalog index and individual documents are fetched from.
#[derive(Debug, Clone)]
pub struct RfcEndpoints {
    index: Url,
    document_base: Url,
}

impl RfcEndpoints {
    /// Build endpoints from an index URL and a document base URL.
    ///
    /// A missing trailing `/` on the base is added so that joins append
    /// rather than replace the last path segment.
    pub fn new(index_url: &str, document_base_url: &str) -> Result<Self, UrlError> {
        let index = parse_http(index_url)?;
        let mut document_base = parse_http(document_base_url)?;
        if !document_base.path().ends_with('/') {
            let path = format!("{}/", document_base.path());
            document_base.set_path(&path);
        }
        Ok(Self { index, document_base })
    }

    /// The catalog index URL.
    pub fn index_url(&self) -> &Url {
        &self.index
    }

    /// URL of the HTML rendering of a canonical RFC id.
    pub fn document_url(&self, id: &str) -> Result<Url, UrlError> {
        self.document_base
            .join(&format!("{id}.html"))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints =
            RfcEndpoints::new("https://www.rfc-editor.org/rfc-index.xml", "https://www.rfc-editor.org/rfc/").unwrap();
        assert_eq!(endpoints.index_url().as_str(), "https://www.rfc-editor.org/rfc-index.xml");
        assert_eq!(
            endpoints.document_url("rfc2616").unwrap().as_str(),
            "https://www.rfc-editor.org/rfc/rfc2616.html"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let endpoints = RfcEndpoints::new("https://mirror.local/rfc-index.xml", "https://mirror.local/rfc").unwrap();
        assert_eq!(endpoints.document_url("rfc1").unwrap().as_str(), "https://mirror.local/rfc/rfc1.html");
    }

    #[test]
    fn test_parse_http_trim_whitespace() {
        let url = parse_http("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_http_unsupported_scheme() {
        let result = parse_http("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_parse_http_empty() {
        assert!(matches!(parse_http(""), Err(UrlError::Empty)));
        assert!(matches!(parse_http("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_parse_http_relative_rejected() {
        let result = parse_http("www.rfc-editor.org/rfc/");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }
}
