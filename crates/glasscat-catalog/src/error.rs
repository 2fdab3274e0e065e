use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a catalog load before any record is read.
///
/// Per-record problems never surface here; they are reported as
/// [`Diagnostic`](crate::diagnostics::Diagnostic)s and the load carries on.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {source_name}: {source}")]
    Xml {
        source_name: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}
