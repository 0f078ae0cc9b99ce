//! Exact-position vertex welding

use std::collections::HashMap;

/// Result of welding triangle corners
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Welded {
    /// Unique positions in first-occurrence order
    pub vertices: Vec<[f32; 3]>,
    /// One index per corner into `vertices`
    pub face_indices: Vec<u32>,
}

/// Merge corners that share a position into indexed faces
///
/// Positions are compared by their exact bit patterns, so corners that differ only by
/// floating-point noise (or `0.0` vs `-0.0`) stay separate. The first occurrence of a
/// position decides its index, which makes the result deterministic for a given corner
/// order.
pub fn weld_positions(corners: impl ExactSizeIterator<Item = [f32; 3]>) -> Welded {
    let mut welded = Welded {
        vertices: Vec::new(),
        face_indices: Vec::with_capacity(corners.len()),
    };
    let mut vertex_map: HashMap<[u32; 3], u32> = HashMap::new();

    for v in corners {
        let key = [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()];

        let index = if let Some(&existing_idx) = vertex_map.get(&key) {
            existing_idx
        } else {
            let new_idx = welded.vertices.len() as u32;
            welded.vertices.push(v);
            vertex_map.insert(key, new_idx);
            new_idx
        };

        welded.face_indices.push(index);
    }

    welded
}
