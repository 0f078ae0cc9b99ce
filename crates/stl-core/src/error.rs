//! Error types

/// Errors raised while decoding STL data
///
/// Facet numbers are 1-based and counted across every solid in the file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StlError {
    #[error("facet {facet}: expected exactly one normal")]
    MalformedFacetNormal { facet: usize },

    #[error("facet {facet}: expected 3 vertices, found {count}")]
    MalformedFacetVertexCount { facet: usize, count: usize },

    #[error("facet {facet}: invalid number {token:?}")]
    MalformedNumber { facet: usize, token: String },

    #[error("facet {facet}: missing endfacet")]
    UnterminatedFacet { facet: usize },

    #[error("truncated binary STL: expected {expected} bytes, got {actual}")]
    TruncatedBuffer { expected: u64, actual: usize },
}

/// Errors raised by [`Mesh`](crate::Mesh) accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("face indices are unavailable until the mesh has been welded")]
    IndicesUnavailable,
}
