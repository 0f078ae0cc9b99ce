//! JSON summary of a decoded mesh

use serde::Serialize;
use stl_core::{BoundingBox, StlFormat};

use crate::config::InspectConfig;
use crate::source::LoadedMesh;

/// Structural summary of a mesh after the configured processing
#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    pub input: String,
    pub format: StlFormat,
    pub name: Option<String>,
    pub triangles: usize,
    pub vertices: usize,
    pub welded: bool,
    pub normalized: bool,
    pub index_count: Option<usize>,
    pub edge_count: usize,
    /// Absent for meshes without vertices
    pub bounding_box: Option<BoundingBox>,
    pub has_colors: bool,
    pub default_color: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<[u32; 2]>>,
}

/// Weld and normalize according to the config, then summarize
pub fn inspect(input: impl Into<String>, loaded: LoadedMesh, config: &InspectConfig) -> MeshReport {
    let LoadedMesh { format, mut mesh } = loaded;

    if config.weld {
        mesh.weld();
    }
    if config.normalize {
        mesh.normalize();
    }

    let bbox = mesh.bounding_box();
    let edges = mesh.edges();

    MeshReport {
        input: input.into(),
        format,
        name: mesh.name().map(str::to_string),
        triangles: mesh.triangle_count(),
        vertices: mesh.vertices().len(),
        welded: mesh.is_welded(),
        normalized: config.normalize,
        index_count: mesh.face_indices().ok().map(<[u32]>::len),
        edge_count: edges.len(),
        bounding_box: (!bbox.is_empty()).then_some(bbox),
        has_colors: mesh.face_colors().is_some(),
        default_color: mesh.default_color(),
        edges: config.include_edges.then(|| edges.to_vec()),
    }
}

impl MeshReport {
    /// Render as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
