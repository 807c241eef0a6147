// src/storage/chunks.rs
use std::fs;
use std::path::Path;
use serde_json::Value;
use crate::utils::error::StorageError;

/// Reads an embedded-chunk file. The top level must be a JSON array; the
/// records themselves are kept as raw values so unknown fields survive.
pub fn load_chunks(path: &Path) -> Result<Vec<Value>, StorageError> {
    let raw = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&raw)
        .map_err(|e| StorageError::SerializationError(format!("{}: {}", path.display(), e)))?;

    match parsed {
        Value::Array(chunks) => Ok(chunks),
        _ => Err(StorageError::MalformedChunks(path.to_path_buf())),
    }
}

/// Rewrites the chunk file in place, pretty-printed with two-space indentation.
pub fn save_chunks(path: &Path, chunks: &[Value]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(chunks)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}
