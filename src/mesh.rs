//! GPU-facing mesh construction.
//!
//! This module turns validated, fully-attributed [`ObjGeometry`] into a
//! [`BasicMesh`]: a deduplicated vertex buffer plus a 16-bit triangle index
//! buffer, the in-memory form of the VBO artifact.
//!
//! Deduplication keys on exact [`IndexTriplet`](crate::geometry::IndexTriplet)
//! identity, so identical references anywhere in the source collapse to one
//! output vertex.
//! Polygons are fan-triangulated around their first vertex, with the fan
//! emitted in an order that reverses the source winding (counter-clockwise
//! source faces become clockwise triangles, matching the target rendering
//! convention).

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use nalgebra::Point3;

use crate::error::{ConvertError, Result};
use crate::geometry::ObjGeometry;

/// One fully-resolved vertex, laid out exactly as the VBO artifact stores
/// it: three position floats, three normal floats, two texcoord floats.
/// 32 bytes, no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BasicVertex {
    /// Position.
    pub position: [f32; 3],
    /// Surface normal. Synthesized normals are unnormalized.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub texcoord: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<BasicVertex>() == 32);

/// A deduplicated vertex buffer and triangle index buffer.
///
/// Invariants (checked by [`BasicMesh::validate`]): every index is in range,
/// the index count is a multiple of three, and the vertex count fits 16-bit
/// indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicMesh {
    /// Unique vertices, in first-occurrence order.
    pub vertices: Vec<BasicVertex>,
    /// Triangle indices into `vertices`, three per triangle.
    pub indices: Vec<u16>,
}

impl BasicMesh {
    /// Number of unique vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check the mesh invariants.
    ///
    /// Used on meshes decoded from untrusted bytes; meshes produced by
    /// [`build`] satisfy these by construction.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(ConvertError::InvalidArtifact(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertices.len();
        for (i, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(ConvertError::InvalidArtifact(format!(
                    "index {} at position {} out of range (mesh has {} vertices)",
                    index, i, vertex_count
                )));
            }
        }
        Ok(())
    }

    /// Axis-aligned bounding box over the vertex positions, or `None` for an
    /// empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = self.vertices.first()?;
        let mut min = Point3::from(first.position);
        let mut max = min;
        for vertex in &self.vertices[1..] {
            let p = vertex.position;
            min = Point3::new(min.x.min(p[0]), min.y.min(p[1]), min.z.min(p[2]));
            max = Point3::new(max.x.max(p[0]), max.y.max(p[1]), max.z.max(p[2]));
        }
        Some((min, max))
    }
}

/// Build the deduplicated mesh from validated, fully-attributed geometry.
///
/// Every triplet must have nonzero position, normal, and texcoord indices;
/// run [`fill_missing_attributes`](crate::attributes::fill_missing_attributes)
/// on validated geometry first.
///
/// Faces are visited in source order, triplets within a face in source
/// order. The first occurrence of each distinct triplet appends a vertex
/// and is assigned the next index; later occurrences reuse it. Each face is
/// fan-triangulated: for every triplet at position `k ≥ 2`, a triangle
/// `(face[0], face[k], face[k-1])` is emitted.
///
/// Fails with [`ConvertError::TooManyVertices`] when the unique vertex
/// count would pass 65535.
pub fn build(geometry: &ObjGeometry) -> Result<BasicMesh> {
    let mut vertices: Vec<BasicVertex> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();
    let mut triplet_indices = HashMap::new();

    for face in &geometry.faces {
        for (k, triplet) in face.iter().enumerate() {
            debug_assert!(
                triplet.pos != 0 && triplet.norm != 0 && triplet.tex != 0,
                "build requires synthesized geometry"
            );
            if !triplet_indices.contains_key(triplet) {
                if vertices.len() >= u16::MAX as usize {
                    return Err(ConvertError::TooManyVertices {
                        count: vertices.len() + 1,
                    });
                }
                triplet_indices.insert(*triplet, vertices.len() as u16);
                vertices.push(BasicVertex {
                    position: geometry.positions[triplet.pos as usize - 1].into(),
                    normal: geometry.normals[triplet.norm as usize - 1].into(),
                    texcoord: geometry.texcoords[triplet.tex as usize - 1].into(),
                });
            }
            if k >= 2 {
                indices.push(triplet_indices[&face[0]]);
                indices.push(triplet_indices[triplet]);
                indices.push(triplet_indices[&face[k - 1]]);
            }
        }
    }

    Ok(BasicMesh { vertices, indices })
}
