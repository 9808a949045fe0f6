//! Error types and result alias for the crate.
//!
//! [`enum@crate::error::Error`] covers unsupported area shapes, invalid boundaries,
//! failed surface casts and invalid configuration. A failed cast or rejected
//! candidate never aborts a batch; see [`crate::placement::runner`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    #[error("boundary needs at least 2 vertices, got {vertices}")]
    EmptyBoundary { vertices: usize },

    #[error("degenerate boundary: {0}")]
    DegenerateBoundary(String),

    #[error("surface cast found no valid hit")]
    NoHit,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn empty_boundary_reports_vertex_count() {
        let err = Error::EmptyBoundary { vertices: 1 };
        assert_eq!(err.to_string(), "boundary needs at least 2 vertices, got 1");
    }
}
