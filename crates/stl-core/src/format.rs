//! Binary/ASCII format detection

use serde::{Deserialize, Serialize};

/// Size of the binary header, including the triangle count
pub const HEADER_LEN: usize = 84;

/// Size of one binary triangle record
pub const RECORD_LEN: usize = 50;

const SOLID: &[u8] = b"solid";

/// Leading offsets searched for the `solid` keyword (room for a byte-order mark)
const SOLID_SEARCH_OFFSETS: usize = 5;

/// STL encoding of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StlFormat {
    Binary,
    Ascii,
}

impl StlFormat {
    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            StlFormat::Binary => "binary",
            StlFormat::Ascii => "ASCII",
        }
    }
}

/// Classify a buffer as binary or ASCII STL
///
/// A buffer whose length matches the triangle count in its header is binary, even if
/// it starts with `solid`. Anything else starting with `solid` (within the first five
/// bytes) is ASCII. Everything left over is treated as binary so the decoder can report
/// what is wrong with it.
pub fn sniff(bytes: &[u8]) -> StlFormat {
    if declared_binary_len(bytes) == Some(bytes.len() as u64) {
        return StlFormat::Binary;
    }

    let has_solid = (0..SOLID_SEARCH_OFFSETS)
        .any(|offset| bytes.get(offset..offset + SOLID.len()) == Some(SOLID));

    if has_solid {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    }
}

/// Number of triangles declared in a binary header
pub(crate) fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(80..HEADER_LEN)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

/// Total byte length a binary STL with this header should have
pub(crate) fn declared_binary_len(bytes: &[u8]) -> Option<u64> {
    declared_triangle_count(bytes).map(|count| HEADER_LEN as u64 + count as u64 * RECORD_LEN as u64)
}
