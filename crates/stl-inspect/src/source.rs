//! Byte acquisition: resolve a source to a complete buffer, then hand it to the decoder

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use stl_core::{Mesh, StlError, StlFormat};
use tokio::io::AsyncReadExt;

/// Where STL bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    Path(PathBuf),
    Stdin,
}

impl ByteSource {
    /// Interpret a command-line argument; `-` or nothing means stdin
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => ByteSource::Path(path.to_path_buf()),
            _ => ByteSource::Stdin,
        }
    }
}

impl fmt::Display for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteSource::Path(path) => write!(f, "{}", path.display()),
            ByteSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// A decoded mesh and the encoding it was read from
#[derive(Debug)]
pub struct LoadedMesh {
    pub format: StlFormat,
    pub mesh: Mesh,
}

/// Errors from loading a mesh
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {input}: {error}")]
    Io {
        input: String,
        #[source]
        error: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] StlError),
}

/// Read a source completely
pub fn read_bytes(source: &ByteSource) -> Result<Vec<u8>, LoadError> {
    let result = match source {
        ByteSource::Path(path) => std::fs::read(path),
        ByteSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes).map(|_| bytes)
        }
    };

    result.map_err(|error| LoadError::Io {
        input: source.to_string(),
        error,
    })
}

/// Read a source completely without blocking the runtime
pub async fn read_bytes_async(source: &ByteSource) -> Result<Vec<u8>, LoadError> {
    let result = match source {
        ByteSource::Path(path) => tokio::fs::read(path).await,
        ByteSource::Stdin => {
            let mut bytes = Vec::new();
            tokio::io::stdin().read_to_end(&mut bytes).await.map(|_| bytes)
        }
    };

    result.map_err(|error| LoadError::Io {
        input: source.to_string(),
        error,
    })
}

/// Decode a buffer that has already been read
pub fn decode(bytes: &[u8]) -> Result<LoadedMesh, LoadError> {
    let format = stl_core::sniff(bytes);
    let mesh = stl_core::parse(bytes)?;
    Ok(LoadedMesh { format, mesh })
}

/// Load and decode an STL source
pub fn load(source: &ByteSource) -> Result<LoadedMesh, LoadError> {
    let bytes = read_bytes(source)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), source);
    decode(&bytes)
}

/// Load and decode an STL source, reading asynchronously
pub async fn load_async(source: &ByteSource) -> Result<LoadedMesh, LoadError> {
    let bytes = read_bytes_async(source).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), source);
    decode(&bytes)
}
