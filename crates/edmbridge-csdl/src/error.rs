use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a CSDL document.
#[derive(Debug, Error)]
pub enum CsdlError {
    #[error("Failed to read CSDL document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSDL XML: {0}")]
    Xml(#[from] quick_xml::DeError),
}

impl CsdlError {
    /// Create a new Io error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code used in logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CSDL_IO",
            Self::Xml(_) => "CSDL_XML",
        }
    }
}
