use std::fs;
use std::io::Read;

use error_stack::{Report, ResultExt};
use geo::Geometry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryIoError {
    #[error("Failed to read input")]
    Read,
    #[error("Malformed geometry json")]
    Parse,
    #[error("Failed to write output")]
    Write,
}

/// Reads a single json geometry from a reader.
pub fn read_geometry(mut input: impl Read) -> Result<Geometry, Report<GeometryIoError>> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .change_context(GeometryIoError::Read)?;
    serde_json::from_str(&raw).change_context(GeometryIoError::Parse)
}

/// Writes a geometry as json to a file.
pub fn write_geometry(geometry: &Geometry, path: &str) -> Result<(), Report<GeometryIoError>> {
    let raw = serde_json::to_string(geometry).change_context(GeometryIoError::Write)?;
    fs::write(path, raw).change_context(GeometryIoError::Write)
}
