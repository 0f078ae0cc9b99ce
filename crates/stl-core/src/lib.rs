//! STL decoding core
//!
//! This crate turns raw STL bytes into a [`Mesh`] and derives secondary data from it:
//! - Format sniffing (binary vs ASCII)
//! - Binary and ASCII decoding into a triangle soup
//! - Exact-position vertex welding into indexed faces
//! - Undirected edge extraction
//! - Bounding boxes and unit normalization
//!
//! Byte acquisition (files, network, stdin) is left to the caller; nothing in here
//! touches the filesystem.

pub mod ascii;
pub mod binary;
pub mod bounds;
pub mod error;
pub mod format;
pub mod mesh;
pub mod soup;

pub use ascii::decode_ascii;
pub use binary::decode_binary;
pub use bounds::BoundingBox;
pub use error::{MeshError, StlError};
pub use format::{StlFormat, sniff};
pub use mesh::Mesh;
pub use soup::TriangleSoup;

/// Parse an in-memory STL buffer (binary or ASCII) into a [`Mesh`]
pub fn parse(bytes: &[u8]) -> Result<Mesh, StlError> {
    let format = sniff(bytes);
    let soup = match format {
        StlFormat::Binary => decode_binary(bytes)?,
        StlFormat::Ascii => decode_ascii(&String::from_utf8_lossy(bytes))?,
    };

    tracing::debug!(
        "Decoded {} STL: {} triangles",
        format.name(),
        soup.triangle_count()
    );

    Ok(Mesh::from_soup(soup))
}

/// Parse STL data that was handed over as text
pub fn parse_str(text: &str) -> Result<Mesh, StlError> {
    parse(text.as_bytes())
}
