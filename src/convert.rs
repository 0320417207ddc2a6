//! The end-to-end conversion pipeline.
//!
//! Conversion runs four stages in order: parse, validate, synthesize
//! missing attributes, build and serialize. Each call is independent and
//! holds no state between invocations, so converting different files
//! concurrently is safe as long as each conversion gets its own sink.
//!
//! # Example
//!
//! ```
//! use obj2vbo::convert::{convert_str, ConvertOptions};
//! use obj2vbo::diagnostics::DiagnosticSink;
//!
//! let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let mesh = convert_str(
//!     source,
//!     "triangle.obj",
//!     &ConvertOptions::default(),
//!     &DiagnosticSink::none(),
//! )
//! .unwrap();
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

use std::path::Path;

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::mesh::{self, BasicMesh};
use crate::{attributes, obj, vbo};

/// Options controlling conversion behavior.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Replace explicit normals on faces that also have missing ones,
    /// reproducing the overwrite behavior of older converters. Off by
    /// default: explicit normals are preserved and mixed faces warn.
    pub legacy_normal_overwrite: bool,
}

impl ConvertOptions {
    /// Enable or disable legacy normal overwriting.
    pub fn with_legacy_normal_overwrite(mut self, enabled: bool) -> Self {
        self.legacy_normal_overwrite = enabled;
        self
    }
}

/// Counts reported after a successful file conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Source polygon count.
    pub faces: usize,
    /// Unique vertices written.
    pub vertices: usize,
    /// Indices written.
    pub indices: usize,
    /// Triangles written.
    pub triangles: usize,
}

/// Convert OBJ text into an in-memory mesh.
///
/// `name` labels the source in diagnostics. Per-line problems flow to
/// `sink`; structural problems (no geometry, degenerate faces, bad
/// references, too many vertices) abort with an error.
pub fn convert_str(
    source: &str,
    name: &str,
    options: &ConvertOptions,
    sink: &DiagnosticSink,
) -> Result<BasicMesh> {
    let mut geometry = obj::parse_str(source, name, sink);
    geometry.validate()?;
    attributes::fill_missing_attributes(&mut geometry, name, options, sink);
    mesh::build(&geometry)
}

/// Convert an OBJ file to a VBO file.
///
/// Reads `input` whole, converts it, and writes the artifact to `output`
/// in a single write. Nothing is written on any fatal path.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
    sink: &DiagnosticSink,
) -> Result<ConvertSummary> {
    let input = input.as_ref();
    let name = input.display().to_string();

    let mut geometry = obj::load(input, sink)?;
    geometry.validate()?;
    attributes::fill_missing_attributes(&mut geometry, &name, options, sink);
    let faces = geometry.faces.len();
    let mesh = mesh::build(&geometry)?;
    vbo::save(&mesh, output)?;

    Ok(ConvertSummary {
        faces,
        vertices: mesh.vertex_count(),
        indices: mesh.index_count(),
        triangles: mesh.triangle_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::vbo;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn convert(source: &str) -> Result<BasicMesh> {
        convert_str(
            source,
            "test.obj",
            &ConvertOptions::default(),
            &DiagnosticSink::none(),
        )
    }

    #[test]
    fn bare_triangle_scenario() {
        let mesh = convert(TRIANGLE).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.indices, vec![0, 2, 1]);

        // One synthesized normal proportional to +Z, shared by all three
        // vertices, and the shared (0, 0) texcoord placeholder.
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 3.0]);
            assert_eq!(vertex.texcoord, [0.0, 0.0]);
        }
    }

    #[test]
    fn conversion_is_idempotent() {
        let a = vbo::encode(&convert(TRIANGLE).unwrap());
        let b = vbo::encode(&convert(TRIANGLE).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn counts_match_unique_triplets_and_fan_size() {
        // A quad and a triangle sharing an explicit normal and two corners:
        // 4 + 3 triplets minus 2 shared = 5 vertices, and
        // (4 - 2) + (3 - 2) = 3 triangles.
        let source = "\
v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\n\
vn 0 0 1\n\
f 1//1 2//1 3//1 4//1\nf 2//1 5//1 3//1\n";
        let mesh = convert(source).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.index_count(), 9);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn synthesized_normals_keep_faces_distinct() {
        // Without explicit normals each face gets its own synthesized
        // normal, so shared corners no longer deduplicate.
        let source = "\
v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\n\
f 1 2 3 4\nf 2 5 3\n";
        let mesh = convert(source).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn explicit_attributes_pass_through() {
        let source = "\
v 0 0 0\nv 1 0 0\nv 0 1 0\n\
vn 0 0 1\nvt 0.5 0.5\n\
f 1/1/1 2/1/1 3/1/1\n";
        let mesh = convert(source).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[0].texcoord, [0.5, 0.5]);
    }

    #[test]
    fn no_positions_is_empty_geometry() {
        assert!(matches!(
            convert("vn 0 0 1\n"),
            Err(ConvertError::EmptyGeometry)
        ));
    }

    #[test]
    fn no_faces_is_empty_geometry() {
        assert!(matches!(
            convert("v 0 0 0\nv 1 0 0\nv 0 1 0\n"),
            Err(ConvertError::EmptyGeometry)
        ));
    }

    #[test]
    fn two_vertex_face_is_degenerate() {
        assert!(matches!(
            convert("v 0 0 0\nv 1 0 0\nf 1 2\n"),
            Err(ConvertError::DegenerateFace { face: 0, count: 2 })
        ));
    }

    #[test]
    fn out_of_range_position_reference_fails() {
        assert!(matches!(
            convert("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 999\n"),
            Err(ConvertError::IndexOutOfRange { index: 999, .. })
        ));
    }

    #[test]
    fn unsupported_tags_do_not_abort() {
        let (sink, records) = DiagnosticSink::collect();
        let mesh = convert_str(
            &format!("mtllib scene.mtl\n{TRIANGLE}"),
            "test.obj",
            &ConvertOptions::default(),
            &sink,
        )
        .unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(records.lock().unwrap().len(), 1);
    }

    #[test]
    fn convert_file_round_trips_through_disk() {
        let dir = std::env::temp_dir();
        let input = dir.join("obj2vbo_convert_test.obj");
        let output = dir.join("obj2vbo_convert_test.vbo");
        std::fs::write(&input, TRIANGLE).unwrap();

        let summary = convert_file(
            &input,
            &output,
            &ConvertOptions::default(),
            &DiagnosticSink::none(),
        )
        .unwrap();
        assert_eq!(
            summary,
            ConvertSummary {
                faces: 1,
                vertices: 3,
                indices: 3,
                triangles: 1
            }
        );

        let mesh = vbo::load(&output).unwrap();
        std::fs::remove_file(&input).ok();
        std::fs::remove_file(&output).ok();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 2, 1]);
    }

    #[test]
    fn missing_input_file_fails_without_output() {
        let output = std::env::temp_dir().join("obj2vbo_never_written.vbo");
        let result = convert_file(
            "no/such/input.obj",
            &output,
            &ConvertOptions::default(),
            &DiagnosticSink::none(),
        );
        assert!(matches!(result, Err(ConvertError::Load { .. })));
        assert!(!output.exists());
    }
}
