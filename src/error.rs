//! Error types for the adaptdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for adaptdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or packaging documents.
///
/// Parsing Markdown never fails; these errors only come from the output side.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing the zip container of a DOCX/PPTX package.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The math renderer rejected a math span.
    #[error("Math rendering error: {0}")]
    Math(String),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A packaging sink failed to produce its artifact.
    #[error("Packaging error: {0}")]
    Package(String),

    /// No exporter is registered for the requested extension.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("odt".to_string());
        assert_eq!(err.to_string(), "Unsupported output format: odt");

        let err = Error::Math("unbalanced braces".to_string());
        assert_eq!(err.to_string(), "Math rendering error: unbalanced braces");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
