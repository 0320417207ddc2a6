//! Error types for obj2vbo.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ConvertError`].
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Which attribute list an out-of-range face reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Vertex position (`v` lines).
    Position,
    /// Vertex normal (`vn` lines).
    Normal,
    /// Texture coordinate (`vt` lines).
    Texcoord,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Position => write!(f, "position"),
            Attribute::Normal => write!(f, "normal"),
            Attribute::Texcoord => write!(f, "texcoord"),
        }
    }
}

/// Errors that can occur during OBJ parsing, conversion, or VBO serialization.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source contains no positions or no faces.
    #[error("source contains no geometry")]
    EmptyGeometry,

    /// A face has fewer than three vertices.
    #[error("face {face} has {count} vertices, need at least 3")]
    DegenerateFace {
        /// The face index (0-based, in source order).
        face: usize,
        /// Number of vertices the face actually has.
        count: usize,
    },

    /// A face references an attribute index outside its list.
    #[error("face {face} vertex {vertex}: {attribute} index {index} out of range (list has {len})")]
    IndexOutOfRange {
        /// The face index (0-based, in source order).
        face: usize,
        /// The vertex position within the face (0-based).
        vertex: usize,
        /// Which attribute list the reference points into.
        attribute: Attribute,
        /// The offending 1-based index.
        index: u32,
        /// Length of the referenced list.
        len: usize,
    },

    /// The deduplicated vertex count exceeds what 16-bit indices can address.
    #[error("mesh needs at least {count} unique vertices, too many for 16-bit indices")]
    TooManyVertices {
        /// The deduplicated vertex count at the point the limit was hit.
        count: usize,
    },

    /// A VBO byte buffer is truncated or its counts disagree with its size.
    #[error("invalid VBO artifact: {0}")]
    InvalidArtifact(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading a source file.
    #[error("failed to load {path}: {message}")]
    Load {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error writing an output file.
    #[error("failed to save {path}: {message}")]
    Save {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
