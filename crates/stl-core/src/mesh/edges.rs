//! Edge extraction

use std::collections::HashSet;

/// Unique undirected edges of indexed triangles
///
/// Each edge keeps the direction in which it was first seen.
pub fn indexed_edges(face_indices: &[u32]) -> Vec<[u32; 2]> {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut edges = Vec::new();

    for face in face_indices.chunks_exact(3) {
        for j in 0..3 {
            let a = face[j];
            let b = face[(j + 1) % 3];
            if seen.insert((a.min(b), a.max(b))) {
                edges.push([a, b]);
            }
        }
    }

    edges
}

/// Edges of unindexed triangles, three per triangle
///
/// Without shared indices there is no way to tell that two triangles meet, so nothing
/// is deduplicated.
pub fn soup_edges(vertex_count: usize) -> Vec<[u32; 2]> {
    let triangle_count = vertex_count / 3;
    let mut edges = Vec::with_capacity(triangle_count * 3);

    for i in 0..triangle_count as u32 {
        let first = 3 * i;
        for j in 0..3 {
            edges.push([first + j, first + (j + 1) % 3]);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soup_edges() {
        let edges = soup_edges(6);
        assert_eq!(
            edges,
            vec![[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]]
        );
    }

    #[test]
    fn test_soup_edges_ignore_partial_triangle() {
        assert_eq!(soup_edges(4).len(), 3);
        assert!(soup_edges(0).is_empty());
    }

    #[test]
    fn test_indexed_edges_shared() {
        // Quad split along 1-2
        let edges = indexed_edges(&[0, 1, 2, 2, 1, 3]);
        assert_eq!(edges, vec![[0, 1], [1, 2], [2, 0], [1, 3], [3, 2]]);
    }

    #[test]
    fn test_indexed_edges_keep_first_direction() {
        let edges = indexed_edges(&[0, 1, 2, 1, 0, 3]);
        assert!(edges.contains(&[0, 1]));
        assert!(!edges.contains(&[1, 0]));
        assert_eq!(edges.len(), 5);
    }
}
