//! Raw geometry as parsed from an OBJ source.
//!
//! The parser accumulates four lists: positions, normals, texture
//! coordinates, and polygonal faces whose vertices reference the first three
//! by 1-based index. [`ObjGeometry::validate`] checks those cross-references
//! before the synthesis and build stages run.

use nalgebra::{Point2, Point3};

use crate::error::{Attribute, ConvertError, Result};

/// One face-vertex reference: 1-based indices into the position, texcoord,
/// and normal lists.
///
/// A zero normal or texcoord index means the source did not specify that
/// attribute; the synthesis stage fills those in. A zero position index is
/// invalid (the OBJ format is 1-based) and rejected by validation.
///
/// Equality is exact field-by-field identity; this is the key under which
/// the mesh builder deduplicates vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexTriplet {
    /// 1-based position index, always ≥ 1 once validated.
    pub pos: u32,
    /// 1-based texcoord index, or 0 if unspecified.
    pub tex: u32,
    /// 1-based normal index, or 0 if unspecified.
    pub norm: u32,
}

/// A polygonal face: an ordered list of [`IndexTriplet`]s in source order.
///
/// Source order determines both fan triangulation and output winding.
pub type Face = Vec<IndexTriplet>;

/// The four attribute lists produced by the parser.
///
/// Lists are append-only during parsing and treated as immutable afterwards,
/// except that the synthesis stage appends generated normals and the shared
/// placeholder texcoord.
#[derive(Debug, Clone, Default)]
pub struct ObjGeometry {
    /// Vertex positions, from `v` lines.
    pub positions: Vec<Point3<f32>>,
    /// Vertex normals, from `vn` lines.
    pub normals: Vec<Point3<f32>>,
    /// Texture coordinates, from `vt` lines.
    pub texcoords: Vec<Point2<f32>>,
    /// Polygonal faces, from `f` lines.
    pub faces: Vec<Face>,
    /// 1-based source line of each face, parallel to `faces`. Used for
    /// diagnostics emitted after parsing; empty for geometry built in code.
    pub face_lines: Vec<usize>,
}

impl ObjGeometry {
    /// Check that the parsed lists form a usable mesh.
    ///
    /// Fails with [`ConvertError::EmptyGeometry`] if there are no positions
    /// or no faces, [`ConvertError::DegenerateFace`] if any face has fewer
    /// than three vertices, and [`ConvertError::IndexOutOfRange`] if any
    /// face reference falls outside its list. Validation stops at the first
    /// failure; the error carries the face and vertex location.
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() || self.faces.is_empty() {
            return Err(ConvertError::EmptyGeometry);
        }

        for (fi, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(ConvertError::DegenerateFace {
                    face: fi,
                    count: face.len(),
                });
            }
            for (vi, triplet) in face.iter().enumerate() {
                if triplet.pos == 0 || triplet.pos as usize > self.positions.len() {
                    return Err(ConvertError::IndexOutOfRange {
                        face: fi,
                        vertex: vi,
                        attribute: Attribute::Position,
                        index: triplet.pos,
                        len: self.positions.len(),
                    });
                }
                // Zero means "absent" for normals and texcoords.
                if triplet.norm as usize > self.normals.len() {
                    return Err(ConvertError::IndexOutOfRange {
                        face: fi,
                        vertex: vi,
                        attribute: Attribute::Normal,
                        index: triplet.norm,
                        len: self.normals.len(),
                    });
                }
                if triplet.tex as usize > self.texcoords.len() {
                    return Err(ConvertError::IndexOutOfRange {
                        face: fi,
                        vertex: vi,
                        attribute: Attribute::Texcoord,
                        index: triplet.tex,
                        len: self.texcoords.len(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triplet(pos: u32, tex: u32, norm: u32) -> IndexTriplet {
        IndexTriplet { pos, tex, norm }
    }

    fn triangle_geometry() -> ObjGeometry {
        ObjGeometry {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![vec![triplet(1, 0, 0), triplet(2, 0, 0), triplet(3, 0, 0)]],
            ..Default::default()
        }
    }

    #[test]
    fn valid_triangle_passes() {
        assert!(triangle_geometry().validate().is_ok());
    }

    #[test]
    fn empty_positions_fail() {
        let mut geo = triangle_geometry();
        geo.positions.clear();
        assert!(matches!(geo.validate(), Err(ConvertError::EmptyGeometry)));
    }

    #[test]
    fn empty_faces_fail() {
        let mut geo = triangle_geometry();
        geo.faces.clear();
        assert!(matches!(geo.validate(), Err(ConvertError::EmptyGeometry)));
    }

    #[test]
    fn two_vertex_face_is_degenerate() {
        let mut geo = triangle_geometry();
        geo.faces[0].pop();
        assert!(matches!(
            geo.validate(),
            Err(ConvertError::DegenerateFace { face: 0, count: 2 })
        ));
    }

    #[test]
    fn position_index_zero_is_out_of_range() {
        let mut geo = triangle_geometry();
        geo.faces[0][1].pos = 0;
        assert!(matches!(
            geo.validate(),
            Err(ConvertError::IndexOutOfRange {
                face: 0,
                vertex: 1,
                attribute: Attribute::Position,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn position_index_past_end_is_out_of_range() {
        let mut geo = triangle_geometry();
        geo.faces[0][2].pos = 999;
        assert!(matches!(
            geo.validate(),
            Err(ConvertError::IndexOutOfRange {
                attribute: Attribute::Position,
                index: 999,
                ..
            })
        ));
    }

    #[test]
    fn absent_normal_and_texcoord_are_valid() {
        // norm == 0 and tex == 0 mean "unspecified", never out of range.
        let geo = triangle_geometry();
        assert!(geo.normals.is_empty());
        assert!(geo.texcoords.is_empty());
        assert!(geo.validate().is_ok());
    }

    #[test]
    fn normal_index_past_end_is_out_of_range() {
        let mut geo = triangle_geometry();
        geo.faces[0][0].norm = 1;
        assert!(matches!(
            geo.validate(),
            Err(ConvertError::IndexOutOfRange {
                attribute: Attribute::Normal,
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn triplet_equality_is_exact() {
        assert_eq!(triplet(1, 2, 3), triplet(1, 2, 3));
        assert_ne!(triplet(1, 2, 3), triplet(1, 2, 4));
    }
}
