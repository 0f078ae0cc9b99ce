//! Decoder output: unindexed triangle data

use serde::{Deserialize, Serialize};

/// Triangles as decoded, before any welding
///
/// Every triangle owns its three corners, so `vertices` holds three entries per
/// triangle in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleSoup {
    /// Triangle corners (3 per triangle)
    pub vertices: Vec<[f32; 3]>,
    /// Face normals (one per triangle)
    pub face_normals: Vec<[f32; 3]>,
    /// Face colors in [0, 1] (one per triangle), only for binary files with a `COLOR=` header
    pub face_colors: Option<Vec<[f32; 3]>>,
    /// Default RGBA color from the `COLOR=` header
    pub default_color: Option<[f32; 4]>,
    /// Solid name (ASCII) or header text (binary)
    pub name: Option<String>,
}

impl TriangleSoup {
    /// Create a soup from corners and normals, without colors
    pub fn new(vertices: Vec<[f32; 3]>, face_normals: Vec<[f32; 3]>) -> Self {
        Self {
            vertices,
            face_normals,
            ..Default::default()
        }
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check if the soup has no triangles
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
