use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::models::ConvertError;

/// Read a vendor transcript file into a JSON value
pub fn read_transcript_file(path: &Path) -> Result<Value, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Read {} bytes from {:?}", content.len(), path);
    parse_transcript_json(&content)
}

/// Parse a vendor transcript string into a JSON value
pub fn parse_transcript_json(json: &str) -> Result<Value, ConvertError> {
    Ok(serde_json::from_str(json)?)
}
