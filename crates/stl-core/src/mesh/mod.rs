//! Mesh model with lazily derived, invalidation-aware data
//!
//! A [`Mesh`] starts out as the decoder's triangle soup. Edges and the bounding box are
//! computed on first access and cached; [`Mesh::weld`] and [`Mesh::normalize`] are the
//! only operations that change the geometry, and they drop whatever cache they affect.

mod edges;
mod weld;

use std::cell::OnceCell;

pub use edges::{indexed_edges, soup_edges};
pub use weld::{Welded, weld_positions};

use crate::bounds::{BoundingBox, normalize_points};
use crate::error::MeshError;
use crate::soup::TriangleSoup;

/// Lazily computed value that can be reset
#[derive(Debug, Clone)]
struct Cached<T>(OnceCell<T>);

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self(OnceCell::new())
    }
}

impl<T> Cached<T> {
    fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(compute)
    }

    fn invalidate(&mut self) {
        self.0.take();
    }

    fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }
}

/// Triangle mesh decoded from STL
///
/// Geometry can only be changed through [`weld`](Mesh::weld) and
/// [`normalize`](Mesh::normalize); every other accessor is read-only. The caches use
/// interior mutability, so a mesh shared between threads needs external locking.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: Option<String>,
    /// Corners (3 per triangle) before welding, unique positions after
    vertices: Vec<[f32; 3]>,
    face_normals: Vec<[f32; 3]>,
    face_colors: Option<Vec<[f32; 3]>>,
    default_color: Option<[f32; 4]>,
    /// Set by welding
    face_indices: Option<Vec<u32>>,
    edges: Cached<Vec<[u32; 2]>>,
    bounding_box: Cached<BoundingBox>,
}

impl Mesh {
    /// Create a mesh from decoded triangles
    pub fn from_soup(soup: TriangleSoup) -> Self {
        Self {
            name: soup.name,
            vertices: soup.vertices,
            face_normals: soup.face_normals,
            face_colors: soup.face_colors,
            default_color: soup.default_color,
            face_indices: None,
            edges: Cached::default(),
            bounding_box: Cached::default(),
        }
    }

    /// Solid name (ASCII) or header text (binary)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Vertex positions: triangle corners before welding, unique positions after
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Vertex positions as a flat `x, y, z, x, y, z, ...` slice
    pub fn vertex_components(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// One normal per triangle
    pub fn face_normals(&self) -> &[[f32; 3]] {
        &self.face_normals
    }

    /// Face normals as a flat slice
    pub fn normal_components(&self) -> &[f32] {
        bytemuck::cast_slice(&self.face_normals)
    }

    /// One RGB color per triangle, if the file carried colors
    pub fn face_colors(&self) -> Option<&[[f32; 3]]> {
        self.face_colors.as_deref()
    }

    /// Default RGBA color from a binary `COLOR=` header
    pub fn default_color(&self) -> Option<[f32; 4]> {
        self.default_color
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        match &self.face_indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    /// Check if the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Check if [`weld`](Mesh::weld) has run
    pub fn is_welded(&self) -> bool {
        self.face_indices.is_some()
    }

    /// Indexed faces (3 indices per triangle), available after welding
    pub fn face_indices(&self) -> Result<&[u32], MeshError> {
        self.face_indices
            .as_deref()
            .ok_or(MeshError::IndicesUnavailable)
    }

    /// Corner positions of one triangle
    pub fn triangle(&self, index: usize) -> Option<[[f32; 3]; 3]> {
        let corner = |k: usize| -> Option<[f32; 3]> {
            let vertex = match &self.face_indices {
                Some(indices) => *indices.get(k)? as usize,
                None => k,
            };
            self.vertices.get(vertex).copied()
        };

        let first = index.checked_mul(3)?;
        Some([corner(first)?, corner(first + 1)?, corner(first + 2)?])
    }

    /// Edges of the current triangulation
    ///
    /// After welding every undirected edge appears once. Before welding each triangle
    /// contributes its own three edges, indexing its private corners, so shared edges
    /// show up once per triangle.
    pub fn edges(&self) -> &[[u32; 2]] {
        self.edges.get_or_compute(|| match &self.face_indices {
            Some(indices) => indexed_edges(indices),
            None => soup_edges(self.vertices.len()),
        })
    }

    /// Edges as a flat list of index pairs
    pub fn edge_indices(&self) -> &[u32] {
        bytemuck::cast_slice(self.edges())
    }

    /// Bounding box of the current vertex positions
    pub fn bounding_box(&self) -> BoundingBox {
        *self
            .bounding_box
            .get_or_compute(|| BoundingBox::from_points(&self.vertices))
    }

    /// Merge coincident vertices and index the faces
    ///
    /// Replaces the vertices with the unique positions and drops cached edges. Welding
    /// an already welded mesh gives the same result again.
    pub fn weld(&mut self) -> &mut Self {
        let welded = match &self.face_indices {
            Some(indices) => {
                weld_positions(indices.iter().map(|&i| self.vertices[i as usize]))
            }
            None => weld_positions(self.vertices.iter().copied()),
        };

        tracing::debug!(
            "Welded {} corners into {} vertices",
            welded.face_indices.len(),
            welded.vertices.len()
        );

        self.vertices = welded.vertices;
        self.face_indices = Some(welded.face_indices);
        self.edges.invalidate();
        self
    }

    /// Scale vertex positions (in place) into a unit bounding box centered on the origin
    ///
    /// The scale is uniform: the longest axis spans exactly 1.0 afterwards.
    pub fn normalize(&mut self) -> &mut Self {
        let bbox = self.bounding_box();
        normalize_points(&mut self.vertices, &bbox);
        self.bounding_box.invalidate();
        self
    }

    /// Check whether edges are currently cached
    pub fn has_cached_edges(&self) -> bool {
        self.edges.is_computed()
    }

    /// Check whether the bounding box is currently cached
    pub fn has_cached_bounding_box(&self) -> bool {
        self.bounding_box.is_computed()
    }
}

impl From<TriangleSoup> for Mesh {
    fn from(soup: TriangleSoup) -> Self {
        Self::from_soup(soup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles sharing an edge, unwelded
    fn quad() -> Mesh {
        Mesh::from_soup(TriangleSoup::new(
            vec![
                [0.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [2.0, 0.0, 0.0],
                [2.0, 1.0, 0.0],
            ],
            vec![[0.0, 0.0, 1.0]; 2],
        ))
    }

    #[test]
    fn test_face_indices_require_weld() {
        let mesh = quad();
        assert_eq!(mesh.face_indices(), Err(MeshError::IndicesUnavailable));
        assert!(!mesh.is_welded());
    }

    #[test]
    fn test_weld() {
        let mut mesh = quad();
        mesh.weld();

        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.face_indices().unwrap(), &[0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face_normals().len(), 2);
    }

    #[test]
    fn test_weld_is_idempotent() {
        let mut mesh = quad();
        mesh.weld();
        let vertices = mesh.vertices().to_vec();
        let indices = mesh.face_indices().unwrap().to_vec();

        mesh.weld();
        assert_eq!(mesh.vertices(), vertices.as_slice());
        assert_eq!(mesh.face_indices().unwrap(), indices.as_slice());
    }

    #[test]
    fn test_weld_without_duplicates_is_identity() {
        let mut mesh = Mesh::from_soup(TriangleSoup::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]],
        ));
        mesh.weld();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.face_indices().unwrap(), &[0, 1, 2]);
    }

    #[test]
    fn test_edges_before_and_after_weld() {
        let mut mesh = quad();
        assert_eq!(mesh.edges().len(), 6);
        assert_eq!(mesh.edge_indices().len(), 12);
        assert!(mesh.has_cached_edges());

        mesh.weld();
        assert!(!mesh.has_cached_edges());
        assert_eq!(mesh.edges(), &[[0, 1], [1, 2], [2, 0], [1, 3], [3, 2]]);
    }

    #[test]
    fn test_bounding_box_cache() {
        let mut mesh = quad();
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, [0.0, 0.0, 0.0]);
        assert_eq!(bbox.max, [2.0, 1.0, 0.0]);
        assert!(mesh.has_cached_bounding_box());

        // Welding keeps the same set of positions
        mesh.weld();
        assert!(mesh.has_cached_bounding_box());
        assert_eq!(mesh.bounding_box(), bbox);

        mesh.normalize();
        assert!(!mesh.has_cached_bounding_box());
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, [-0.5, -0.25, 0.0]);
        assert_eq!(bbox.max, [0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_chaining() {
        let mut mesh = quad();
        let count = mesh.weld().normalize().vertices().len();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_triangle_lookup() {
        let mut mesh = quad();
        let before = mesh.triangle(1).unwrap();
        mesh.weld();
        assert_eq!(mesh.triangle(1), Some(before));
        assert_eq!(mesh.triangle(2), None);
    }

    #[test]
    fn test_flat_views() {
        let mesh = quad();
        assert_eq!(mesh.vertex_components().len(), 18);
        assert_eq!(&mesh.vertex_components()[3..6], &[2.0, 0.0, 0.0]);
        assert_eq!(mesh.normal_components(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_mesh() {
        let mut mesh = Mesh::from(TriangleSoup::default());
        assert!(mesh.is_empty());
        assert!(mesh.edges().is_empty());
        assert!(mesh.bounding_box().is_empty());

        mesh.weld().normalize();
        assert!(mesh.vertices().is_empty());
        assert_eq!(mesh.face_indices().unwrap(), &[] as &[u32]);
    }
}
