//! Binary STL decoding
//!
//! Layout:
//!
//! | bytes     | content                                   |
//! |-----------|-------------------------------------------|
//! | 0..80     | header (may carry a `COLOR=rgba` default) |
//! | 80..84    | triangle count, u32 LE                    |
//! | 84..      | 50-byte records                           |
//!
//! Each record is a normal (3 × f32 LE), three corners (9 × f32 LE) and a u16 LE
//! attribute that holds a packed 15-bit color when the header has a `COLOR=` entry.

use crate::error::StlError;
use crate::format::{HEADER_LEN, RECORD_LEN, declared_binary_len, declared_triangle_count};
use crate::soup::TriangleSoup;

const COLOR_SIGNATURE: &[u8] = b"COLOR=";

/// Header offsets searched for the color signature
const COLOR_SEARCH_END: usize = 70;

/// Attribute bit that selects the header's default color over the packed one
const USE_DEFAULT_COLOR: u16 = 0x8000;

/// Decode a binary STL buffer
pub fn decode_binary(bytes: &[u8]) -> Result<TriangleSoup, StlError> {
    let (count, expected) = match (declared_triangle_count(bytes), declared_binary_len(bytes)) {
        (Some(count), Some(expected)) => (count as usize, expected),
        _ => {
            return Err(StlError::TruncatedBuffer {
                expected: HEADER_LEN as u64,
                actual: bytes.len(),
            });
        }
    };

    if (bytes.len() as u64) < expected {
        return Err(StlError::TruncatedBuffer {
            expected,
            actual: bytes.len(),
        });
    }
    if (bytes.len() as u64) > expected {
        tracing::debug!(
            "Ignoring {} trailing bytes after {} triangles",
            bytes.len() as u64 - expected,
            count
        );
    }

    let header = &bytes[..80];
    let default_color = header_color(header);

    let mut vertices = Vec::with_capacity(count * 3);
    let mut face_normals = Vec::with_capacity(count);
    let mut face_colors = default_color.map(|_| Vec::with_capacity(count));

    for record in bytes[HEADER_LEN..].chunks_exact(RECORD_LEN).take(count) {
        face_normals.push(read_vec3(record, 0));
        for corner in 0..3 {
            vertices.push(read_vec3(record, 12 + corner * 12));
        }

        if let (Some(colors), Some(default)) = (face_colors.as_mut(), default_color) {
            let packed = u16::from_le_bytes([record[48], record[49]]);
            colors.push(unpack_color(packed, [default[0], default[1], default[2]]));
        }
    }

    Ok(TriangleSoup {
        vertices,
        face_normals,
        face_colors,
        default_color,
        name: header_name(header),
    })
}

/// Find the `COLOR=rgba` default color in the header
///
/// The last occurrence wins if the signature appears more than once.
fn header_color(header: &[u8]) -> Option<[f32; 4]> {
    (0..COLOR_SEARCH_END)
        .filter(|&i| header[i..].starts_with(COLOR_SIGNATURE))
        .last()
        .map(|i| {
            let rgba = &header[i + COLOR_SIGNATURE.len()..i + COLOR_SIGNATURE.len() + 4];
            [
                rgba[0] as f32 / 255.0,
                rgba[1] as f32 / 255.0,
                rgba[2] as f32 / 255.0,
                rgba[3] as f32 / 255.0,
            ]
        })
}

/// Decode a record's packed color: 5 bits each of R, G, B from the low bits
fn unpack_color(packed: u16, default: [f32; 3]) -> [f32; 3] {
    if packed & USE_DEFAULT_COLOR != 0 {
        return default;
    }
    [
        (packed & 0x1F) as f32 / 31.0,
        ((packed >> 5) & 0x1F) as f32 / 31.0,
        ((packed >> 10) & 0x1F) as f32 / 31.0,
    ]
}

/// Header text up to the first NUL byte or color signature
fn header_name(header: &[u8]) -> Option<String> {
    let end = (0..header.len())
        .find(|&i| header[i] == 0 || header[i..].starts_with(COLOR_SIGNATURE))
        .unwrap_or(header.len());
    let name = String::from_utf8_lossy(&header[..end]).trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn read_vec3(data: &[u8], offset: usize) -> [f32; 3] {
    [
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    ]
}
