//! Error types for the commerce-tools library.

use thiserror::Error;

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog loading error
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Tool compilation error
    #[error("Compile error: {0}")]
    Compile(#[from] crate::compiler::CompileError),

    /// Backend transport error
    #[error("HTTP error: {0}")]
    Http(#[from] crate::http::HttpError),

    /// Admin login error
    #[error("Auth error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// Tool-related error
    #[error("Tool error: {0}")]
    Tool(#[from] crate::tool::ToolError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SchemaViolation;
    use crate::http::HttpError;
    use crate::tool::ToolError;

    fn parse(document: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(document)?)
    }

    #[test]
    fn test_conversions() {
        let err: Error = HttpError::InvalidUrl("nowhere".to_string()).into();
        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.to_string(), "HTTP error: Invalid URL: nowhere");

        let err: Error = ToolError::from(SchemaViolation::NotAnObject).into();
        assert!(matches!(err, Error::Tool(ToolError::InvalidArguments(_))));
        assert!(err.to_string().starts_with("Tool error: Invalid arguments"));

        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
