//! Wavefront OBJ parsing.
//!
//! This module reads the text form of an OBJ mesh into [`ObjGeometry`]:
//! positions, normals, texture coordinates, and polygonal faces referencing
//! them by 1-based index.
//!
//! The parser is tolerant. Lines it cannot use are reported to the caller's
//! [`DiagnosticSink`] and skipped; parsing always continues to end of input.
//! Only failure to read the file at all is fatal.
//!
//! # Supported directives
//!
//! | Tag | Meaning | Handling |
//! |-----|---------|----------|
//! | `#` | comment | skipped |
//! | `v` | position (3 floats) | parsed |
//! | `vn` | normal (3 floats) | parsed |
//! | `vt` | texcoord (2 floats, third ignored) | parsed |
//! | `f` | face (whitespace-separated triplets) | parsed |
//! | `mtllib`, `o`, `g`, `usemtl`, `s` | materials/grouping | warning, skipped |
//! | anything else | — | error, skipped |
//!
//! Face triplets follow the usual OBJ grammar: `pos`, `pos/tex`,
//! `pos//norm`, or `pos/tex/norm`, all 1-based and unsigned. Fields left out
//! stay `0`, meaning "unspecified".

use std::fs;
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::diagnostics::DiagnosticSink;
use crate::error::{ConvertError, Result};
use crate::geometry::{Face, IndexTriplet, ObjGeometry};

/// Tags the VBO format has no representation for. Accepted and skipped with
/// a warning, matching how material and grouping directives are usually
/// handled by geometry-only consumers.
const UNSUPPORTED_TAGS: &[&str] = &["mtllib", "o", "g", "usemtl", "s"];

/// Load and parse an OBJ file.
///
/// Reads the whole file into memory, then parses it with [`parse_str`],
/// using the path as the diagnostic file name.
///
/// # Example
///
/// ```no_run
/// use obj2vbo::diagnostics::DiagnosticSink;
/// use obj2vbo::obj;
///
/// let geometry = obj::load("model.obj", &DiagnosticSink::none()).unwrap();
/// println!("{} positions, {} faces", geometry.positions.len(), geometry.faces.len());
/// ```
pub fn load<P: AsRef<Path>>(path: P, sink: &DiagnosticSink) -> Result<ObjGeometry> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| ConvertError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(parse_str(&source, &path.display().to_string(), sink))
}

/// Parse OBJ text into raw geometry.
///
/// `name` labels the source in diagnostics (a file path, or any caller
/// label for in-memory input). This function never fails: unusable lines
/// become diagnostics, and the caller runs
/// [`ObjGeometry::validate`](crate::geometry::ObjGeometry::validate) to
/// decide whether what was collected forms a usable mesh.
pub fn parse_str(source: &str, name: &str, sink: &DiagnosticSink) -> ObjGeometry {
    let mut geometry = ObjGeometry::default();

    for (line_index, line) in source.lines().enumerate() {
        let line_num = line_index + 1;
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };

        match tag {
            "v" => match parse_floats::<3, _>(&mut tokens) {
                Some([x, y, z]) => geometry.positions.push(Point3::new(x, y, z)),
                None => sink.error(name, line_num, "malformed position (expected \"v x y z\")"),
            },
            "vn" => match parse_floats::<3, _>(&mut tokens) {
                Some([x, y, z]) => geometry.normals.push(Point3::new(x, y, z)),
                None => sink.error(name, line_num, "malformed normal (expected \"vn x y z\")"),
            },
            // A third texcoord component is legal OBJ; it is ignored here.
            "vt" => match parse_floats::<2, _>(&mut tokens) {
                Some([u, v]) => geometry.texcoords.push(Point2::new(u, v)),
                None => sink.error(name, line_num, "malformed texcoord (expected \"vt u v\")"),
            },
            "f" => match parse_face(tokens) {
                Some(face) => {
                    geometry.faces.push(face);
                    geometry.face_lines.push(line_num);
                }
                None => sink.error(name, line_num, "malformed face triplet"),
            },
            _ if UNSUPPORTED_TAGS.contains(&tag) => {
                sink.warning(
                    name,
                    line_num,
                    format!("VBO format does not support tag \"{tag}\""),
                );
            }
            _ => {
                sink.error(name, line_num, format!("unknown tag \"{tag}\""));
            }
        }
    }

    geometry
}

/// Parse exactly `N` floats from the remaining tokens. Extra tokens on the
/// line are ignored, as in the original format.
fn parse_floats<'a, const N: usize, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        *slot = tokens.next()?.parse().ok()?;
    }
    Some(out)
}

/// Parse the triplet tokens of an `f` line. Any malformed token rejects the
/// whole line.
fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Face> {
    let mut face = Face::new();
    for token in tokens {
        face.push(parse_triplet(token)?);
    }
    if face.is_empty() {
        return None;
    }
    Some(face)
}

/// Parse one face-vertex token: `pos`, `pos/tex`, `pos//norm`, or
/// `pos/tex/norm`. Absent fields stay 0.
fn parse_triplet(token: &str) -> Option<IndexTriplet> {
    let bytes = token.as_bytes();
    let mut cursor = 0;

    let pos = parse_index(bytes, &mut cursor)?;
    let mut tex = 0;
    let mut norm = 0;

    if cursor < bytes.len() && bytes[cursor] == b'/' {
        cursor += 1;
        // A second slash immediately after the first means the texcoord
        // field was skipped (the "pos//norm" shorthand).
        if cursor < bytes.len() && bytes[cursor] != b'/' {
            tex = parse_index(bytes, &mut cursor)?;
        }
        if cursor < bytes.len() && bytes[cursor] == b'/' {
            cursor += 1;
            norm = parse_index(bytes, &mut cursor)?;
        }
    }

    if cursor != bytes.len() {
        return None;
    }
    Some(IndexTriplet { pos, tex, norm })
}

/// Read a run of decimal digits at `cursor` as a u32. No sign, at least one
/// digit, overflow rejected.
fn parse_index(bytes: &[u8], cursor: &mut usize) -> Option<u32> {
    let start = *cursor;
    let mut value: u32 = 0;
    while *cursor < bytes.len() && bytes[*cursor].is_ascii_digit() {
        value = value
            .checked_mul(10)?
            .checked_add(u32::from(bytes[*cursor] - b'0'))?;
        *cursor += 1;
    }
    if *cursor == start {
        return None;
    }
    Some(value)
}
