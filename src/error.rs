//! Error types for scene export.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for scene export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to parse or produce scene JSON.
    #[error("Scene JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error outside of a named output destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory text buffer could not be produced.
    #[error("output data creation failed. Most likely the file became too large: {path}")]
    OutputCreation { path: String },

    /// The geometry destination could not be opened for writing.
    #[error("could not open output .obj file: {path}")]
    OpenGeometry {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The material destination could not be opened for writing.
    #[error("could not open output .mtl file: {path}")]
    OpenMaterial {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to an opened destination failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A face references a vertex the mesh does not have.
    #[error("mesh '{mesh}' references vertex {index} but the attribute has only {count} entries")]
    VertexIndexOutOfRange {
        mesh: String,
        index: u32,
        count: usize,
    },

    /// No exporter is registered under the requested id.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}
