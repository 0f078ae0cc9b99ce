//! STL inspector
//!
//! Resolves a byte source (file or stdin), hands the bytes to `stl_core`, applies the
//! configured processing and summarizes the result.

pub mod config;
pub mod report;
pub mod source;

pub use config::{ConfigError, ConfigManager, InspectConfig};
pub use report::{MeshReport, inspect};
pub use source::{ByteSource, LoadError, LoadedMesh, load, load_async};
