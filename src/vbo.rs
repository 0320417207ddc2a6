//! VBO binary serialization.
//!
//! The artifact layout is fixed and versionless, with no magic number:
//!
//! ```text
//! u32            vertex count
//! u32            index count
//! BasicVertex[]  32 bytes each: f32 px py pz, f32 nx ny nz, f32 u v
//! u16[]          triangle indices, no padding
//! ```
//!
//! All fields are little-endian, which is also the native order on every
//! supported target; vertex and index payloads are written as their raw
//! in-memory representation via bytemuck.
//!
//! Encoding happens fully in memory and the file is written in one call, so
//! no partial artifact ever reaches disk on a failure path.

use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::mesh::{BasicMesh, BasicVertex};

/// Size of the two-count header in bytes.
const HEADER_SIZE: usize = 8;
/// Size of one packed vertex in bytes.
const VERTEX_SIZE: usize = std::mem::size_of::<BasicVertex>();
/// Size of one packed index in bytes.
const INDEX_SIZE: usize = std::mem::size_of::<u16>();

/// Encode a mesh into VBO bytes.
pub fn encode(mesh: &BasicMesh) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        HEADER_SIZE + mesh.vertices.len() * VERTEX_SIZE + mesh.indices.len() * INDEX_SIZE,
    );
    bytes.extend_from_slice(&(mesh.vertices.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(mesh.indices.len() as u32).to_le_bytes());
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.vertices));
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.indices));
    bytes
}

/// Decode VBO bytes back into a mesh.
///
/// This is the inverse of [`encode`], for consumers that want the vertex
/// and index arrays in memory (typically to upload to a graphics device).
/// Fails with [`ConvertError::InvalidArtifact`] if the buffer is truncated,
/// its counts disagree with its size, or the decoded mesh violates the
/// artifact invariants.
pub fn decode(bytes: &[u8]) -> Result<BasicMesh> {
    if bytes.len() < HEADER_SIZE {
        return Err(ConvertError::InvalidArtifact(format!(
            "buffer of {} bytes is smaller than the {HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }

    let vertex_count = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let index_count = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;

    let expected = HEADER_SIZE + vertex_count * VERTEX_SIZE + index_count * INDEX_SIZE;
    if bytes.len() != expected {
        return Err(ConvertError::InvalidArtifact(format!(
            "expected {expected} bytes for {vertex_count} vertices and {index_count} indices, got {}",
            bytes.len()
        )));
    }

    let vertex_end = HEADER_SIZE + vertex_count * VERTEX_SIZE;
    // pod_collect_to_vec copies, so the byte slices need no alignment.
    let mesh = BasicMesh {
        vertices: bytemuck::pod_collect_to_vec(&bytes[HEADER_SIZE..vertex_end]),
        indices: bytemuck::pod_collect_to_vec(&bytes[vertex_end..]),
    };
    mesh.validate()?;
    Ok(mesh)
}

/// Write a mesh to a VBO file.
pub fn save<P: AsRef<Path>>(mesh: &BasicMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(mesh)).map_err(|e| ConvertError::Save {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read a mesh from a VBO file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<BasicMesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ConvertError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mesh() -> BasicMesh {
        BasicMesh {
            vertices: vec![
                BasicVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [0.0, 0.0],
                },
                BasicVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [1.0, 0.0],
                },
                BasicVertex {
                    position: [0.0, 1.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    texcoord: [0.0, 1.0],
                },
            ],
            indices: vec![0, 2, 1],
        }
    }

    #[test]
    fn layout_is_exact() {
        let bytes = encode(&sample_mesh());

        assert_eq!(bytes.len(), 8 + 3 * 32 + 3 * 2);
        assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &3u32.to_le_bytes());
        // First vertex starts immediately after the header.
        assert_eq!(&bytes[8..12], &0.0f32.to_le_bytes());
        // Second vertex position.x = 1.0 at header + one vertex.
        assert_eq!(&bytes[40..44], &1.0f32.to_le_bytes());
        // Indices follow the vertices with no padding.
        assert_eq!(&bytes[8 + 96..], &[0u8, 0, 2, 0, 1, 0]);
    }

    #[test]
    fn decode_inverts_encode() {
        let mesh = sample_mesh();
        let decoded = decode(&encode(&mesh)).unwrap();
        assert_eq!(decoded, mesh);
    }

    #[test]
    fn encode_is_deterministic() {
        let mesh = sample_mesh();
        assert_eq!(encode(&mesh), encode(&mesh));
    }

    #[test]
    fn decode_rejects_short_header() {
        assert!(matches!(
            decode(&[1, 2, 3]),
            Err(ConvertError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn decode_rejects_count_size_mismatch() {
        let mut bytes = encode(&sample_mesh());
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            decode(&bytes),
            Err(ConvertError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn decode_rejects_out_of_range_index() {
        let mut mesh = sample_mesh();
        mesh.indices[1] = 7;
        assert!(matches!(
            decode(&encode(&mesh)),
            Err(ConvertError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let mesh = sample_mesh();
        let path = std::env::temp_dir().join("obj2vbo_vbo_roundtrip_test.vbo");
        save(&mesh, &path).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, mesh);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load("definitely/not/here.vbo").unwrap_err();
        assert!(matches!(err, ConvertError::Load { .. }));
    }
}
