//! Synthesis of missing vertex attributes.
//!
//! OBJ sources frequently omit normals or texture coordinates. The VBO
//! vertex layout has no notion of "absent", so before the mesh is built
//! every face reference must point at a real normal and texcoord. This
//! module fills the gaps:
//!
//! - Each face with missing normals gets exactly one *faceted* normal: the
//!   unnormalized sum of `cross(next - curr, prev - curr)` over the face's
//!   vertices, with wraparound. Shading code is expected to normalize
//!   downstream.
//! - The first missing texcoord anywhere in the mesh appends a single
//!   shared `(0, 0)` placeholder; every texcoord-less reference is pointed
//!   at it.

use nalgebra::{Point2, Point3, Vector3};

use crate::convert::ConvertOptions;
use crate::diagnostics::DiagnosticSink;
use crate::geometry::{Face, ObjGeometry};

/// Fill in missing normals and texture coordinates on validated geometry.
///
/// After this call every triplet in every face has nonzero normal and
/// texcoord indices, which is what
/// [`mesh::build`](crate::mesh::build) requires.
///
/// By default, faces that mix explicit and missing normals keep their
/// explicit ones and get a warning on `sink`; with
/// [`ConvertOptions::legacy_normal_overwrite`] the synthesized normal
/// replaces every normal on the face, reproducing the behavior of older
/// converters.
pub fn fill_missing_attributes(
    geometry: &mut ObjGeometry,
    name: &str,
    options: &ConvertOptions,
    sink: &DiagnosticSink,
) {
    let ObjGeometry {
        positions,
        normals,
        texcoords,
        faces,
        face_lines,
    } = geometry;

    // Normals: one synthesized entry per face that needs it.
    for (fi, face) in faces.iter_mut().enumerate() {
        let missing = face.iter().filter(|t| t.norm == 0).count();
        if missing == 0 {
            continue;
        }

        if missing < face.len() {
            let line = face_lines.get(fi).copied().unwrap_or(0);
            sink.warning(
                name,
                line,
                format!("face {fi} mixes explicit and missing normals"),
            );
        }

        // Compute from a read-only snapshot of the positions first, then
        // assign indices in a separate pass.
        let normal = faceted_normal(face, positions);
        normals.push(Point3::from(normal));
        let index = normals.len() as u32;

        for triplet in face.iter_mut() {
            if triplet.norm == 0 || options.legacy_normal_overwrite {
                triplet.norm = index;
            }
        }
    }

    // Texcoords: a single shared placeholder for the whole mesh.
    let mut placeholder = 0u32;
    for face in faces.iter_mut() {
        for triplet in face.iter_mut() {
            if triplet.tex == 0 {
                if placeholder == 0 {
                    texcoords.push(Point2::new(0.0, 0.0));
                    placeholder = texcoords.len() as u32;
                }
                triplet.tex = placeholder;
            }
        }
    }
}

/// The faceted normal of a polygon: the unnormalized sum over each vertex of
/// the cross product of its edges to the next and previous vertices.
fn faceted_normal(face: &Face, positions: &[Point3<f32>]) -> Vector3<f32> {
    let n = face.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = positions[face[i].pos as usize - 1];
        let prev = positions[face[(i + n - 1) % n].pos as usize - 1];
        let next = positions[face[(i + 1) % n].pos as usize - 1];
        normal += (next - curr).cross(&(prev - curr));
    }
    normal
}
