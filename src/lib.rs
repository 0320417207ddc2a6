//! # obj2vbo
//!
//! A converter from Wavefront OBJ mesh descriptions to compact, GPU-ready
//! VBO artifacts: a deduplicated vertex buffer plus a 16-bit triangle index
//! buffer in a fixed binary layout.
//!
//! The pipeline runs four stages:
//!
//! 1. **Parse** the OBJ text into positions, normals, texcoords, and
//!    polygonal faces ([`obj`]).
//! 2. **Validate** face arity and cross-references ([`geometry`]).
//! 3. **Synthesize** missing normals (one faceted normal per face) and the
//!    shared texcoord placeholder ([`attributes`]).
//! 4. **Build** the deduplicated mesh and serialize it ([`mesh`], [`vbo`]).
//!
//! Parsing is tolerant: unsupported and malformed lines are reported to an
//! injected [`DiagnosticSink`](diagnostics::DiagnosticSink) and skipped.
//! Structural problems abort the conversion with a typed
//! [`ConvertError`](error::ConvertError), and no partial artifact is ever
//! written.
//!
//! ## Quick Start
//!
//! ```no_run
//! use obj2vbo::prelude::*;
//!
//! let sink = DiagnosticSink::new(|d| {
//!     eprintln!("{}({}): {}: {}", d.file, d.line, d.severity, d.message);
//! });
//!
//! let summary = convert_file("model.obj", "model.vbo", &ConvertOptions::default(), &sink)?;
//! println!("{} vertices, {} triangles", summary.vertices, summary.triangles);
//! # Ok::<(), obj2vbo::error::ConvertError>(())
//! ```
//!
//! ## Consuming an artifact
//!
//! Renderer setup code that wants the buffers back in memory decodes the
//! artifact with [`vbo::load`] or [`vbo::decode`]:
//!
//! ```no_run
//! let mesh = obj2vbo::vbo::load("model.vbo")?;
//! // upload mesh.vertices / mesh.indices to the graphics device
//! # Ok::<(), obj2vbo::error::ConvertError>(())
//! ```
//!
//! ## Binary layout
//!
//! `u32` vertex count, `u32` index count, then the packed 32-byte vertices
//! and packed `u16` indices. Little-endian, no padding, no magic number.
//! See [`vbo`] for details.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributes;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod obj;
pub mod vbo;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use obj2vbo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::{convert_file, convert_str, ConvertOptions, ConvertSummary};
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
    pub use crate::error::{Attribute, ConvertError, Result};
    pub use crate::geometry::{Face, IndexTriplet, ObjGeometry};
    pub use crate::mesh::{build, BasicMesh, BasicVertex};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
